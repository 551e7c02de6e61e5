use chrono::Utc;
use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use wellness_core::storage::KeyValueStore;
use wellness_core::yoga::{NewSession, YogaStore};

use crate::config::AppContext;
use crate::input;

#[derive(Subcommand)]
pub enum YogaCommand {
    /// Record a scored practice session
    Log(LogArgs),
    /// Level and scores for one pose, or every pose practised
    Progress { pose: Option<String> },
    /// Recorded sessions, newest first
    History {
        #[arg(long)]
        pose: Option<String>,
    },
    /// Remove a session
    Delete { id: String },
}

#[derive(Args)]
pub struct LogArgs {
    #[arg(long)]
    pub pose: Option<String>,

    /// Pose score from 0 to 100
    #[arg(long)]
    pub score: Option<Decimal>,

    /// Time held, in seconds
    #[arg(long, default_value = "0")]
    pub duration: u32,

    #[arg(long)]
    pub notes: Option<String>,

    /// Path to JSON file with the session fields
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_yoga(command: YogaCommand, ctx: &AppContext) -> Result<Value, Box<dyn std::error::Error>> {
    let store = YogaStore::new(ctx.open_store()?);
    execute(command, &store)
}

fn execute<S: KeyValueStore>(
    command: YogaCommand,
    store: &YogaStore<S>,
) -> Result<Value, Box<dyn std::error::Error>> {
    match command {
        YogaCommand::Log(args) => {
            let draft: NewSession = if let Some(ref path) = args.input {
                input::file::read_json(path)?
            } else if let Some(data) = input::stdin::read_stdin()? {
                serde_json::from_value(data)?
            } else {
                NewSession {
                    pose: args.pose.ok_or("--pose is required (or provide --input)")?,
                    score: args.score.ok_or("--score is required (or provide --input)")?,
                    duration_seconds: args.duration,
                    notes: args.notes,
                }
            };
            Ok(serde_json::to_value(store.record(draft, Utc::now())?)?)
        }
        YogaCommand::Progress { pose: Some(pose) } => Ok(serde_json::to_value(store.progress(&pose)?)?),
        YogaCommand::Progress { pose: None } => Ok(serde_json::to_value(store.summary()?)?),
        YogaCommand::History { pose } => {
            let mut sessions = store.sessions()?;
            if let Some(pose) = pose {
                let wanted = pose.trim().to_lowercase();
                sessions.retain(|s| s.pose.to_lowercase() == wanted);
            }
            sessions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            Ok(serde_json::to_value(sessions)?)
        }
        YogaCommand::Delete { id } => {
            let removed = store.delete(&id)?;
            Ok(json!({ "deleted": removed.id, "pose": removed.pose }))
        }
    }
}
