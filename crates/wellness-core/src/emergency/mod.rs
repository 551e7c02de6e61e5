//! Emergency preparedness: three checklists grouped by id prefix, plus the
//! household's meeting location.

pub mod checklist;
pub mod location;
pub mod store;

pub use checklist::{ChecklistGroup, ChecklistItem, ChecklistKind, ChecklistProgress};
pub use location::EmergencyLocation;
pub use store::EmergencyStore;
