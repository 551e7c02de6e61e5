use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::entry::{JournalEntry, NewEntry};
use super::filter::JournalFilter;
use super::mood::MoodAnalyzer;
use super::transfer::{self, ImportMode, ImportSummary};
use crate::error::WellnessError;
use crate::storage::{load_json, save_json, KeyValueStore};
use crate::WellnessResult;

/// Storage key for the entries array.
pub const JOURNAL_KEY: &str = "wellness-journal-entries";

/// Journal entries kept as one JSON array, newest first. Every mutation
/// reads the whole array and writes it back.
#[derive(Debug)]
pub struct JournalStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> JournalStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn entries(&self) -> WellnessResult<Vec<JournalEntry>> {
        let entries: Vec<JournalEntry> = load_json(&self.store, JOURNAL_KEY)?.unwrap_or_default();
        debug!(count = entries.len(), "loaded journal entries");
        Ok(entries)
    }

    fn save(&self, entries: &[JournalEntry]) -> WellnessResult<()> {
        save_json(&self.store, JOURNAL_KEY, entries)
    }

    pub fn get(&self, id: &str) -> WellnessResult<JournalEntry> {
        self.entries()?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| WellnessError::not_found("Journal entry", id))
    }

    /// Validate and prepend a new entry.
    pub fn add(&self, draft: NewEntry, now: DateTime<Utc>) -> WellnessResult<JournalEntry> {
        let entry = draft.into_entry(now)?;
        let mut entries = self.entries()?;
        entries.insert(0, entry.clone());
        self.save(&entries)?;
        info!(id = %entry.id, "journal entry added");
        Ok(entry)
    }

    pub fn update(&self, id: &str, edit: NewEntry) -> WellnessResult<JournalEntry> {
        let mut entries = self.entries()?;
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| WellnessError::not_found("Journal entry", id))?;
        entry.apply_edit(edit)?;
        let updated = entry.clone();
        self.save(&entries)?;
        info!(id, "journal entry updated");
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> WellnessResult<JournalEntry> {
        let mut entries = self.entries()?;
        let pos = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| WellnessError::not_found("Journal entry", id))?;
        let removed = entries.remove(pos);
        self.save(&entries)?;
        info!(id, "journal entry deleted");
        Ok(removed)
    }

    /// Run the analyzer over an entry and store the result on it.
    pub fn analyze(&self, id: &str, analyzer: &dyn MoodAnalyzer) -> WellnessResult<JournalEntry> {
        let mut entries = self.entries()?;
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| WellnessError::not_found("Journal entry", id))?;
        let analysis = analyzer.analyze(&format!("{}\n{}", entry.title, entry.content))?;
        if entry.mood.is_none() {
            entry.mood = Some(analysis.suggested_mood);
        }
        entry.analysis = Some(analysis);
        let analysed = entry.clone();
        self.save(&entries)?;
        debug!(id, "journal entry analysed");
        Ok(analysed)
    }

    pub fn query(&self, filter: &JournalFilter, now: DateTime<Utc>) -> WellnessResult<Vec<JournalEntry>> {
        Ok(filter.apply(&self.entries()?, now))
    }

    /// The JSON export document for the stored entries.
    pub fn export(&self) -> WellnessResult<String> {
        transfer::export_entries(&self.entries()?)
    }

    pub fn import(&self, json: &str, mode: ImportMode) -> WellnessResult<ImportSummary> {
        let imported = transfer::parse_export(json)?;
        let existing = match mode {
            ImportMode::Replace => Vec::new(),
            ImportMode::Merge => self.entries()?,
        };
        let (combined, summary) = transfer::combine(existing, imported, mode);
        self.save(&combined)?;
        info!(
            imported = summary.imported,
            skipped = summary.skipped_duplicates,
            "journal import finished"
        );
        Ok(summary)
    }

    pub fn clear(&self) -> WellnessResult<()> {
        self.store.remove(JOURNAL_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::mood::LexiconAnalyzer;
    use crate::storage::MemoryStore;

    fn draft(title: &str) -> NewEntry {
        NewEntry {
            title: title.into(),
            content: "A calm and peaceful evening.".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_prepends() {
        let journal = JournalStore::new(MemoryStore::new());
        journal.add(draft("first"), Utc::now()).unwrap();
        journal.add(draft("second"), Utc::now()).unwrap();
        let titles: Vec<String> = journal.entries().unwrap().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[test]
    fn test_invalid_add_leaves_storage() {
        let journal = JournalStore::new(MemoryStore::new());
        assert!(journal.add(draft(""), Utc::now()).is_err());
        assert!(journal.entries().unwrap().is_empty());
    }

    #[test]
    fn test_delete_unknown_id() {
        let journal = JournalStore::new(MemoryStore::new());
        assert!(matches!(
            journal.delete("missing"),
            Err(WellnessError::NotFound { .. })
        ));
    }

    #[test]
    fn test_analyze_sets_mood() {
        let journal = JournalStore::new(MemoryStore::new());
        let entry = journal.add(draft("evening"), Utc::now()).unwrap();
        let analysed = journal.analyze(&entry.id, &LexiconAnalyzer::new()).unwrap();
        assert!(analysed.analysis.is_some());
        assert_eq!(analysed.mood, Some(crate::journal::mood::Mood::Calm));
    }
}
