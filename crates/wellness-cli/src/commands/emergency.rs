use clap::Subcommand;
use serde_json::{json, Value};

use wellness_core::emergency::{ChecklistKind, EmergencyLocation, EmergencyStore};
use wellness_core::storage::KeyValueStore;

use crate::config::AppContext;

#[derive(Subcommand)]
pub enum EmergencyCommand {
    /// Items of one checklist in stored order
    List { kind: ChecklistKind },
    /// Items of one checklist grouped by id prefix
    Grouped { kind: ChecklistKind },
    /// Add a custom item
    Add {
        kind: ChecklistKind,
        /// Group prefix for the new id (e.g. water, med)
        #[arg(long, default_value = "custom")]
        prefix: String,
        text: String,
    },
    /// Flip an item between done and not done
    Toggle { kind: ChecklistKind, id: String },
    /// Remove an item
    Delete { kind: ChecklistKind, id: String },
    /// Restore a checklist to its default items
    Reset { kind: ChecklistKind },
    /// Completion for one checklist, or all of them
    Progress { kind: Option<ChecklistKind> },
    /// Household meeting location
    #[command(subcommand)]
    Location(LocationCommand),
}

#[derive(Subcommand)]
pub enum LocationCommand {
    Show,
    Set {
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "")]
        meeting_point: String,
        #[arg(long = "contact", default_value = "")]
        out_of_area_contact: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    Clear,
}

pub fn run_emergency(command: EmergencyCommand, ctx: &AppContext) -> Result<Value, Box<dyn std::error::Error>> {
    let store = EmergencyStore::new(ctx.open_store()?);
    execute(command, &store)
}

fn execute<S: KeyValueStore>(
    command: EmergencyCommand,
    store: &EmergencyStore<S>,
) -> Result<Value, Box<dyn std::error::Error>> {
    match command {
        EmergencyCommand::List { kind } => Ok(serde_json::to_value(store.items(kind)?)?),
        EmergencyCommand::Grouped { kind } => Ok(json!({
            "title": kind.title(),
            "groups": store.grouped(kind)?,
        })),
        EmergencyCommand::Add { kind, prefix, text } => {
            Ok(serde_json::to_value(store.add(kind, &prefix, &text)?)?)
        }
        EmergencyCommand::Toggle { kind, id } => Ok(serde_json::to_value(store.toggle(kind, &id)?)?),
        EmergencyCommand::Delete { kind, id } => {
            let removed = store.delete(kind, &id)?;
            Ok(json!({ "deleted": removed.id }))
        }
        EmergencyCommand::Reset { kind } => Ok(serde_json::to_value(store.reset(kind)?)?),
        EmergencyCommand::Progress { kind: Some(kind) } => {
            Ok(serde_json::to_value(store.progress(kind)?)?)
        }
        EmergencyCommand::Progress { kind: None } => {
            let all = ChecklistKind::ALL
                .iter()
                .map(|&kind| store.progress(kind))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(serde_json::to_value(all)?)
        }
        EmergencyCommand::Location(LocationCommand::Show) => match store.location()? {
            Some(location) => Ok(serde_json::to_value(location)?),
            None => Err("No emergency location saved".into()),
        },
        EmergencyCommand::Location(LocationCommand::Set {
            address,
            meeting_point,
            out_of_area_contact,
            notes,
        }) => {
            let location = EmergencyLocation {
                address,
                meeting_point,
                out_of_area_contact,
                notes,
            };
            store.set_location(&location)?;
            Ok(serde_json::to_value(location)?)
        }
        EmergencyCommand::Location(LocationCommand::Clear) => {
            store.clear_location()?;
            Ok(json!({ "cleared": true }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellness_core::storage::MemoryStore;

    #[test]
    fn test_progress_for_all_lists() {
        let store = EmergencyStore::new(MemoryStore::new());
        store.toggle(ChecklistKind::Food, "water-1").unwrap();

        let value = execute(EmergencyCommand::Progress { kind: None }, &store).unwrap();
        let lists = value.as_array().unwrap();
        assert_eq!(lists.len(), 3);
        assert_eq!(lists[2]["completed"], json!(1));
        assert_eq!(lists[0]["completed"], json!(0));
    }

    #[test]
    fn test_location_requires_address_or_meeting_point() {
        let store = EmergencyStore::new(MemoryStore::new());
        let result = execute(
            EmergencyCommand::Location(LocationCommand::Set {
                address: String::new(),
                meeting_point: String::new(),
                out_of_area_contact: "Aunt May".into(),
                notes: String::new(),
            }),
            &store,
        );
        assert!(result.is_err());
        assert!(execute(EmergencyCommand::Location(LocationCommand::Show), &store).is_err());
    }
}
