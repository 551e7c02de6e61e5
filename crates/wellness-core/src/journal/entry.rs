use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::mood::{Mood, SentimentAnalysis};
use crate::error::WellnessError;
use crate::WellnessResult;

/// One stored journal entry. Field names follow the browser documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_private: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<SentimentAnalysis>,
}

/// User-supplied fields for a new or edited entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_private: bool,
}

impl NewEntry {
    pub fn validate(&self) -> WellnessResult<()> {
        if self.title.trim().is_empty() {
            return Err(WellnessError::invalid("title", "Title cannot be empty."));
        }
        if self.content.trim().is_empty() {
            return Err(WellnessError::invalid("content", "Content cannot be empty."));
        }
        Ok(())
    }

    /// Build a stored entry with a fresh id.
    pub fn into_entry(self, now: DateTime<Utc>) -> WellnessResult<JournalEntry> {
        self.validate()?;
        Ok(JournalEntry {
            id: Uuid::new_v4().to_string(),
            title: self.title.trim().to_string(),
            content: self.content,
            mood: self.mood,
            tags: normalize_tags(&self.tags),
            is_private: self.is_private,
            timestamp: now,
            analysis: None,
        })
    }
}

impl JournalEntry {
    /// Apply an edit, keeping id and timestamp. A stale analysis is dropped.
    pub fn apply_edit(&mut self, edit: NewEntry) -> WellnessResult<()> {
        edit.validate()?;
        if self.content != edit.content {
            self.analysis = None;
        }
        self.title = edit.title.trim().to_string();
        self.content = edit.content;
        self.mood = edit.mood;
        self.tags = normalize_tags(&edit.tags);
        self.is_private = edit.is_private;
        Ok(())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.trim().to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == wanted)
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// Trim, lowercase, drop blanks and duplicates, keeping first-seen order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let t = tag.trim().trim_start_matches('#').to_lowercase();
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}
