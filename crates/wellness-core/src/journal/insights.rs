use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::entry::JournalEntry;
use super::mood::Mood;

const TOP_TAG_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalInsights {
    pub total_entries: u32,
    pub private_entries: u32,
    pub entries_last_7_days: u32,
    pub total_words: u64,
    pub mood_distribution: BTreeMap<Mood, u32>,
    pub top_tags: Vec<TagCount>,
    /// Mean analysed sentiment; None when nothing has been analysed
    pub average_sentiment: Option<Decimal>,
    /// Consecutive writing days ending today or yesterday
    pub current_streak_days: u32,
    pub longest_streak_days: u32,
}

pub fn journal_insights(entries: &[JournalEntry], now: DateTime<Utc>) -> JournalInsights {
    let week_ago = now - Duration::days(7);

    let mut mood_distribution: BTreeMap<Mood, u32> = BTreeMap::new();
    // Imported entries keep their tag casing; count them together
    let mut tag_counts: HashMap<String, u32> = HashMap::new();
    let mut sentiment_sum = Decimal::ZERO;
    let mut sentiment_n = 0u32;

    for entry in entries {
        if let Some(mood) = entry.mood {
            *mood_distribution.entry(mood).or_insert(0) += 1;
        }
        for tag in &entry.tags {
            *tag_counts.entry(tag.trim().to_lowercase()).or_insert(0) += 1;
        }
        if let Some(analysis) = &entry.analysis {
            sentiment_sum += analysis.score;
            sentiment_n += 1;
        }
    }

    let mut top_tags: Vec<TagCount> = tag_counts
        .into_iter()
        .map(|(tag, count)| TagCount { tag, count })
        .collect();
    top_tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    top_tags.truncate(TOP_TAG_LIMIT);

    let days: BTreeSet<NaiveDate> = entries.iter().map(|e| e.timestamp.date_naive()).collect();
    let (current_streak_days, longest_streak_days) = streaks(&days, now.date_naive());

    JournalInsights {
        total_entries: entries.len() as u32,
        private_entries: entries.iter().filter(|e| e.is_private).count() as u32,
        entries_last_7_days: entries.iter().filter(|e| e.timestamp >= week_ago).count() as u32,
        total_words: entries.iter().map(|e| e.word_count() as u64).sum(),
        mood_distribution,
        top_tags,
        average_sentiment: (sentiment_n > 0)
            .then(|| sentiment_sum / Decimal::from(sentiment_n)),
        current_streak_days,
        longest_streak_days,
    }
}

/// (current, longest) runs of consecutive days.
fn streaks(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> (u32, u32) {
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;

    for &day in days {
        run = match prev {
            Some(p) if day - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(day);
    }

    let current = match prev {
        Some(last) if last == today || last == today - Duration::days(1) => run,
        _ => 0,
    };
    (current, longest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry_on(day: u32, mood: Option<Mood>, tags: &[&str]) -> JournalEntry {
        JournalEntry {
            id: format!("e{day}"),
            title: "t".into(),
            content: "one two three".into(),
            mood,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            is_private: false,
            timestamp: Utc.with_ymd_and_hms(2025, 6, day, 8, 0, 0).unwrap(),
            analysis: None,
        }
    }

    #[test]
    fn test_tag_counts_ignore_case() {
        let entries = vec![
            entry_on(1, None, &["Sleep"]),
            entry_on(2, None, &["sleep"]),
            entry_on(3, None, &["work"]),
        ];
        let now = Utc.with_ymd_and_hms(2025, 6, 3, 9, 0, 0).unwrap();
        let insights = journal_insights(&entries, now);
        assert_eq!(
            insights.top_tags[0],
            TagCount {
                tag: "sleep".into(),
                count: 2
            }
        );
        assert_eq!(insights.top_tags.len(), 2);
    }

    #[test]
    fn test_streaks() {
        let entries = vec![
            entry_on(1, None, &[]),
            entry_on(2, None, &[]),
            entry_on(3, None, &[]),
            entry_on(10, None, &[]),
            entry_on(11, None, &[]),
        ];
        let now = Utc.with_ymd_and_hms(2025, 6, 12, 9, 0, 0).unwrap();
        let insights = journal_insights(&entries, now);
        assert_eq!(insights.longest_streak_days, 3);
        assert_eq!(insights.current_streak_days, 2);
    }

    #[test]
    fn test_streak_broken() {
        let entries = vec![entry_on(1, None, &[])];
        let now = Utc.with_ymd_and_hms(2025, 6, 5, 9, 0, 0).unwrap();
        assert_eq!(journal_insights(&entries, now).current_streak_days, 0);
    }

    #[test]
    fn test_moods_and_tags() {
        let entries = vec![
            entry_on(1, Some(Mood::Calm), &["sleep", "yoga"]),
            entry_on(2, Some(Mood::Calm), &["yoga"]),
            entry_on(3, Some(Mood::Anxious), &["work"]),
        ];
        let now = Utc.with_ymd_and_hms(2025, 6, 3, 9, 0, 0).unwrap();
        let insights = journal_insights(&entries, now);
        assert_eq!(insights.mood_distribution.get(&Mood::Calm), Some(&2));
        assert_eq!(insights.top_tags[0].tag, "yoga");
        assert_eq!(insights.total_words, 9);
        assert!(insights.average_sentiment.is_none());
    }
}
