//! Journal entries: storage, filtering, export/import, mood annotation and
//! writing insights.

pub mod entry;
pub mod filter;
pub mod insights;
pub mod mood;
pub mod store;
pub mod transfer;

pub use entry::{JournalEntry, NewEntry};
pub use filter::{JournalFilter, PrivacyFilter, SortOrder, Timeframe};
pub use insights::{journal_insights, JournalInsights};
pub use mood::{LexiconAnalyzer, Mood, MoodAnalyzer, SentimentAnalysis, SentimentLabel};
pub use store::{JournalStore, JOURNAL_KEY};
pub use transfer::{export_file_name, ImportMode, ImportSummary};
