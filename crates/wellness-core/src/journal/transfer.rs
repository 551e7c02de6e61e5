//! Export and import of the raw entries array.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::entry::JournalEntry;
use crate::error::WellnessError;
use crate::WellnessResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Swap the stored array for the imported one
    #[default]
    Replace,
    /// Prepend imported entries whose id is not already stored
    Merge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub mode: ImportMode,
    pub imported: usize,
    pub skipped_duplicates: usize,
    pub total_entries: usize,
}

/// `wellness-journal-export-<YYYY-MM-DD>.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("wellness-journal-export-{}.json", date.format("%Y-%m-%d"))
}

/// Pretty-printed JSON array of the entries, in stored order.
pub fn export_entries(entries: &[JournalEntry]) -> WellnessResult<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Parse an exported array. Every entry must carry a distinct, non-empty id.
pub fn parse_export(json: &str) -> WellnessResult<Vec<JournalEntry>> {
    let entries: Vec<JournalEntry> = serde_json::from_str(json)?;
    let mut seen = HashSet::new();
    for entry in &entries {
        if entry.id.trim().is_empty() {
            return Err(WellnessError::invalid("id", "Imported entry has an empty id."));
        }
        if !seen.insert(entry.id.as_str()) {
            return Err(WellnessError::invalid(
                "id",
                format!("Duplicate entry id in import: {}", entry.id),
            ));
        }
    }
    Ok(entries)
}

/// Combine stored and imported entries according to `mode`.
pub fn combine(
    existing: Vec<JournalEntry>,
    imported: Vec<JournalEntry>,
    mode: ImportMode,
) -> (Vec<JournalEntry>, ImportSummary) {
    match mode {
        ImportMode::Replace => {
            let count = imported.len();
            let summary = ImportSummary {
                mode,
                imported: count,
                skipped_duplicates: 0,
                total_entries: count,
            };
            (imported, summary)
        }
        ImportMode::Merge => {
            let known: HashSet<String> = existing.iter().map(|e| e.id.clone()).collect();
            let before = imported.len();
            let mut merged: Vec<JournalEntry> = imported
                .into_iter()
                .filter(|e| !known.contains(&e.id))
                .collect();
            let added = merged.len();
            merged.extend(existing);
            let summary = ImportSummary {
                mode,
                imported: added,
                skipped_duplicates: before - added,
                total_entries: merged.len(),
            };
            (merged, summary)
        }
    }
}
