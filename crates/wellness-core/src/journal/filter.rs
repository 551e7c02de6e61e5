use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::entry::JournalEntry;
use super::mood::Mood;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyFilter {
    #[default]
    All,
    Private,
    Public,
}

/// How far back to look, relative to "now".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    #[default]
    All,
    /// Same calendar day (UTC)
    Today,
    /// Last 7 days
    Week,
    /// Last 30 days
    Month,
    /// Last 365 days
    Year,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalFilter {
    pub tag: Option<String>,
    /// Case-insensitive match on title, content and tags
    pub search: Option<String>,
    pub mood: Option<Mood>,
    pub privacy: PrivacyFilter,
    pub timeframe: Timeframe,
    pub sort: SortOrder,
}

impl Timeframe {
    fn includes(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let window = match self {
            Timeframe::All => return true,
            Timeframe::Today => return timestamp.date_naive() == now.date_naive(),
            Timeframe::Week => Duration::days(7),
            Timeframe::Month => Duration::days(30),
            Timeframe::Year => Duration::days(365),
        };
        timestamp >= now - window
    }
}

impl JournalFilter {
    pub fn matches(&self, entry: &JournalEntry, now: DateTime<Utc>) -> bool {
        if let Some(tag) = self.tag.as_deref().filter(|t| !t.trim().is_empty()) {
            if !entry.has_tag(tag) {
                return false;
            }
        }
        if let Some(mood) = self.mood {
            if entry.mood != Some(mood) {
                return false;
            }
        }
        match self.privacy {
            PrivacyFilter::All => {}
            PrivacyFilter::Private if !entry.is_private => return false,
            PrivacyFilter::Public if entry.is_private => return false,
            _ => {}
        }
        if !self.timeframe.includes(entry.timestamp, now) {
            return false;
        }
        if let Some(needle) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = needle.to_lowercase();
            let hit = entry.title.to_lowercase().contains(&needle)
                || entry.content.to_lowercase().contains(&needle)
                || entry.tags.iter().any(|t| t.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        true
    }

    /// Matching entries, sorted by timestamp. Ties keep stored order.
    pub fn apply(&self, entries: &[JournalEntry], now: DateTime<Utc>) -> Vec<JournalEntry> {
        let mut out: Vec<JournalEntry> = entries
            .iter()
            .filter(|e| self.matches(e, now))
            .cloned()
            .collect();
        match self.sort {
            SortOrder::Newest => out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
            SortOrder::Oldest => out.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(id: &str, days_ago: i64, private: bool, tags: &[&str]) -> JournalEntry {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        JournalEntry {
            id: id.into(),
            title: format!("Entry {id}"),
            content: "Walked by the river".into(),
            mood: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            is_private: private,
            timestamp: now - Duration::days(days_ago),
            analysis: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_timeframe_week() {
        let entries = vec![entry("a", 1, false, &[]), entry("b", 10, false, &[])];
        let filter = JournalFilter {
            timeframe: Timeframe::Week,
            ..Default::default()
        };
        let ids: Vec<String> = filter.apply(&entries, now()).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_privacy_and_tag() {
        let entries = vec![
            entry("a", 0, true, &["sleep"]),
            entry("b", 0, false, &["sleep"]),
            entry("c", 0, true, &["work"]),
        ];
        let filter = JournalFilter {
            tag: Some("Sleep".into()),
            privacy: PrivacyFilter::Private,
            ..Default::default()
        };
        let out = filter.apply(&entries, now());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "a");
    }

    #[test]
    fn test_search_case_insensitive() {
        let entries = vec![entry("a", 0, false, &[])];
        let filter = JournalFilter {
            search: Some("RIVER".into()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&entries, now()).len(), 1);
    }

    #[test]
    fn test_search_matches_mixed_case_imported_tag() {
        let imported = r#"[{"id":"1","title":"Night","content":"Went to bed early",
            "tags":["Sleep"],"timestamp":"2025-06-14T22:00:00Z"}]"#;
        let entries = crate::journal::transfer::parse_export(imported).unwrap();
        assert_eq!(entries[0].tags, vec!["Sleep".to_string()]);

        let filter = JournalFilter {
            search: Some("sleep".into()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&entries, now()).len(), 1);
    }

    #[test]
    fn test_sort_oldest_first() {
        let entries = vec![entry("new", 0, false, &[]), entry("old", 3, false, &[])];
        let filter = JournalFilter {
            sort: SortOrder::Oldest,
            ..Default::default()
        };
        let out = filter.apply(&entries, now());
        assert_eq!(out[0].id, "old");
    }
}
