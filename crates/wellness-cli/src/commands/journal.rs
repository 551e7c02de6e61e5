use chrono::Utc;
use clap::{Args, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;

use wellness_core::journal::{
    export_file_name, journal_insights, ImportMode, JournalFilter, JournalStore, LexiconAnalyzer,
    Mood, NewEntry, PrivacyFilter, SortOrder, Timeframe,
};
use wellness_core::storage::KeyValueStore;

use super::parse_keyword;
use crate::config::AppContext;
use crate::input;

#[derive(Subcommand)]
pub enum JournalCommand {
    /// Write a new entry
    Add(EntryArgs),
    /// List entries, optionally filtered
    List(ListArgs),
    /// Show one entry
    Show { id: String },
    /// Edit an entry; omitted fields keep their current value
    Edit {
        id: String,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Delete an entry
    Delete { id: String },
    /// Score an entry's sentiment and suggest a mood
    Analyze { id: String },
    /// Write all entries to a dated JSON export file
    Export {
        /// Target directory or file (default: current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Load entries from an export file
    Import {
        file: String,
        /// Keep existing entries and add new ids instead of replacing
        #[arg(long)]
        merge: bool,
    },
    /// Totals, mood distribution, top tags and writing streaks
    Insights,
    /// Delete every entry
    Clear {
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },
}

/// Fields for a new entry
#[derive(Args)]
pub struct EntryArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub content: Option<String>,

    /// joyful, grateful, calm, neutral, anxious, sad or angry
    #[arg(long, value_parser = parse_keyword::<Mood>)]
    pub mood: Option<Mood>,

    /// Tag (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Mark the entry private
    #[arg(long)]
    pub private: bool,

    /// Path to JSON file with the entry fields
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub content: Option<String>,

    #[arg(long, value_parser = parse_keyword::<Mood>)]
    pub mood: Option<Mood>,

    /// Remove the mood
    #[arg(long, conflicts_with = "mood")]
    pub clear_mood: bool,

    /// Replace the tags (repeatable)
    #[arg(long = "tag")]
    pub tags: Option<Vec<String>>,

    /// Set privacy explicitly (true/false)
    #[arg(long)]
    pub private: Option<bool>,
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(long)]
    pub tag: Option<String>,

    /// Case-insensitive text search
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long, value_parser = parse_keyword::<Mood>)]
    pub mood: Option<Mood>,

    /// all, private or public
    #[arg(long, value_parser = parse_keyword::<PrivacyFilter>, default_value = "all")]
    pub privacy: PrivacyFilter,

    /// all, today, week, month or year
    #[arg(long, value_parser = parse_keyword::<Timeframe>, default_value = "all")]
    pub timeframe: Timeframe,

    /// newest or oldest
    #[arg(long, value_parser = parse_keyword::<SortOrder>, default_value = "newest")]
    pub sort: SortOrder,
}

impl From<ListArgs> for JournalFilter {
    fn from(args: ListArgs) -> Self {
        JournalFilter {
            tag: args.tag,
            search: args.search,
            mood: args.mood,
            privacy: args.privacy,
            timeframe: args.timeframe,
            sort: args.sort,
        }
    }
}

pub fn run_journal(command: JournalCommand, ctx: &AppContext) -> Result<Value, Box<dyn std::error::Error>> {
    let journal = JournalStore::new(ctx.open_store()?);
    execute(command, &journal)
}

fn execute<S: KeyValueStore>(
    command: JournalCommand,
    journal: &JournalStore<S>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let now = Utc::now();
    match command {
        JournalCommand::Add(args) => {
            let draft = new_entry(args)?;
            Ok(serde_json::to_value(journal.add(draft, now)?)?)
        }
        JournalCommand::List(args) => {
            let filter = JournalFilter::from(args);
            Ok(serde_json::to_value(journal.query(&filter, now)?)?)
        }
        JournalCommand::Show { id } => Ok(serde_json::to_value(journal.get(&id)?)?),
        JournalCommand::Edit { id, fields } => {
            let current = journal.get(&id)?;
            let edit = NewEntry {
                title: fields.title.unwrap_or(current.title),
                content: fields.content.unwrap_or(current.content),
                mood: if fields.clear_mood {
                    None
                } else {
                    fields.mood.or(current.mood)
                },
                tags: fields.tags.unwrap_or(current.tags),
                is_private: fields.private.unwrap_or(current.is_private),
            };
            Ok(serde_json::to_value(journal.update(&id, edit)?)?)
        }
        JournalCommand::Delete { id } => {
            let removed = journal.delete(&id)?;
            Ok(json!({ "deleted": removed.id, "title": removed.title }))
        }
        JournalCommand::Analyze { id } => {
            let analysed = journal.analyze(&id, &LexiconAnalyzer::new())?;
            Ok(serde_json::to_value(analysed)?)
        }
        JournalCommand::Export { out } => {
            let file_name = export_file_name(now.date_naive());
            let target = match out {
                Some(path) if path.is_dir() => path.join(file_name),
                Some(path) => path,
                None => PathBuf::from(file_name),
            };
            let document = journal.export()?;
            input::file::write_new(&target, &document)?;
            Ok(json!({
                "file": target.display().to_string(),
                "entries": journal.entries()?.len(),
            }))
        }
        JournalCommand::Import { file, merge } => {
            let (_, text) = input::file::read_text(&file)?;
            let mode = if merge { ImportMode::Merge } else { ImportMode::Replace };
            Ok(serde_json::to_value(journal.import(&text, mode)?)?)
        }
        JournalCommand::Insights => {
            let entries = journal.entries()?;
            Ok(serde_json::to_value(journal_insights(&entries, now))?)
        }
        JournalCommand::Clear { yes } => {
            if !yes {
                return Err("Refusing to clear the journal without --yes".into());
            }
            journal.clear()?;
            Ok(json!({ "cleared": true }))
        }
    }
}

fn new_entry(args: EntryArgs) -> Result<NewEntry, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Ok(NewEntry {
        title: args.title.ok_or("--title is required (or provide --input)")?,
        content: args.content.ok_or("--content is required (or provide --input)")?,
        mood: args.mood,
        tags: args.tags,
        is_private: args.private,
    })
}
