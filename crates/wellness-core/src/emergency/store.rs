use tracing::{debug, info};

use super::checklist::{self, ChecklistGroup, ChecklistItem, ChecklistKind, ChecklistProgress};
use super::location::{EmergencyLocation, LOCATION_KEY};
use crate::error::WellnessError;
use crate::storage::{load_json, save_json, KeyValueStore};
use crate::WellnessResult;

/// The three checklists and the location record. Each list lives under its
/// own key and is rewritten whole on every change.
#[derive(Debug)]
pub struct EmergencyStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> EmergencyStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Items of one list. A list that was never stored is seeded with its
    /// defaults and written back. An unreadable list reads as the defaults
    /// but stays on disk until the next change.
    pub fn items(&self, kind: ChecklistKind) -> WellnessResult<Vec<ChecklistItem>> {
        let key = kind.storage_key();
        if self.store.get(key)?.is_none() {
            let defaults = kind.default_items();
            self.save(kind, &defaults)?;
            debug!(list = key, "seeded default checklist");
            return Ok(defaults);
        }
        Ok(load_json::<Vec<ChecklistItem>>(&self.store, key)?.unwrap_or_else(|| kind.default_items()))
    }

    fn save(&self, kind: ChecklistKind, items: &[ChecklistItem]) -> WellnessResult<()> {
        save_json(&self.store, kind.storage_key(), items)
    }

    pub fn grouped(&self, kind: ChecklistKind) -> WellnessResult<Vec<ChecklistGroup>> {
        Ok(checklist::group_items(kind, &self.items(kind)?))
    }

    pub fn progress(&self, kind: ChecklistKind) -> WellnessResult<ChecklistProgress> {
        Ok(checklist::progress(kind, &self.items(kind)?))
    }

    /// Append an item under `prefix`, numbering it after the highest
    /// existing id with the same prefix.
    pub fn add(&self, kind: ChecklistKind, prefix: &str, text: &str) -> WellnessResult<ChecklistItem> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty()
            || !prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(WellnessError::invalid(
                "prefix",
                "Prefix may only contain letters, digits, '-' and '_'.",
            ));
        }
        if text.trim().is_empty() {
            return Err(WellnessError::invalid("text", "Item text cannot be empty."));
        }

        let mut items = self.items(kind)?;
        let next = items
            .iter()
            .filter_map(|item| {
                let (p, n) = item.id.rsplit_once('-')?;
                (p == prefix).then(|| n.parse::<u32>().ok()).flatten()
            })
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| {
                WellnessError::invalid("prefix", format!("No item numbers left for '{prefix}'."))
            })?;

        let item = ChecklistItem {
            id: format!("{prefix}-{next}"),
            text: text.trim().to_string(),
            completed: false,
        };
        items.push(item.clone());
        self.save(kind, &items)?;
        info!(list = kind.storage_key(), id = %item.id, "checklist item added");
        Ok(item)
    }

    /// Flip an item's completion flag.
    pub fn toggle(&self, kind: ChecklistKind, id: &str) -> WellnessResult<ChecklistItem> {
        let mut items = self.items(kind)?;
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| WellnessError::not_found("Checklist item", id))?;
        item.completed = !item.completed;
        let toggled = item.clone();
        self.save(kind, &items)?;
        Ok(toggled)
    }

    pub fn delete(&self, kind: ChecklistKind, id: &str) -> WellnessResult<ChecklistItem> {
        let mut items = self.items(kind)?;
        let pos = items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| WellnessError::not_found("Checklist item", id))?;
        let removed = items.remove(pos);
        self.save(kind, &items)?;
        info!(list = kind.storage_key(), id, "checklist item deleted");
        Ok(removed)
    }

    /// Replace a list with its defaults.
    pub fn reset(&self, kind: ChecklistKind) -> WellnessResult<Vec<ChecklistItem>> {
        let defaults = kind.default_items();
        self.save(kind, &defaults)?;
        info!(list = kind.storage_key(), "checklist reset");
        Ok(defaults)
    }

    pub fn location(&self) -> WellnessResult<Option<EmergencyLocation>> {
        load_json(&self.store, LOCATION_KEY)
    }

    pub fn set_location(&self, location: &EmergencyLocation) -> WellnessResult<()> {
        location.validate()?;
        save_json(&self.store, LOCATION_KEY, location)
    }

    pub fn clear_location(&self) -> WellnessResult<()> {
        self.store.remove(LOCATION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_first_read_seeds_defaults() {
        let mem = MemoryStore::new();
        let store = EmergencyStore::new(&mem);
        let items = store.items(ChecklistKind::FirstAid).unwrap();
        assert_eq!(items, ChecklistKind::FirstAid.default_items());
        assert!(mem.get("emergency_firstaid").unwrap().is_some());
    }

    #[test]
    fn test_emptied_list_stays_empty() {
        let store = EmergencyStore::new(MemoryStore::new());
        for item in store.items(ChecklistKind::Food).unwrap() {
            store.delete(ChecklistKind::Food, &item.id).unwrap();
        }
        assert!(store.items(ChecklistKind::Food).unwrap().is_empty());
    }

    #[test]
    fn test_add_numbers_after_highest() {
        let store = EmergencyStore::new(MemoryStore::new());
        let item = store.add(ChecklistKind::FirstAid, "med", "Antihistamines").unwrap();
        assert_eq!(item.id, "med-3");
        let item = store.add(ChecklistKind::FirstAid, "splint", "SAM splint").unwrap();
        assert_eq!(item.id, "splint-1");
    }

    #[test]
    fn test_toggle_round_trip() {
        let store = EmergencyStore::new(MemoryStore::new());
        assert!(store.toggle(ChecklistKind::Supplies, "water-1").unwrap().completed);
        assert!(!store.toggle(ChecklistKind::Supplies, "water-1").unwrap().completed);
    }

    #[test]
    fn test_location_requires_content() {
        let store = EmergencyStore::new(MemoryStore::new());
        assert!(store.set_location(&EmergencyLocation::default()).is_err());
        assert!(store.location().unwrap().is_none());
    }

    #[test]
    fn test_add_after_highest_possible_number() {
        let mem = MemoryStore::new();
        mem.set(
            "emergency_supplies",
            r#"[{"id":"water-4294967295","text":"Cistern","completed":false}]"#,
        )
        .unwrap();
        let store = EmergencyStore::new(&mem);
        assert!(matches!(
            store.add(ChecklistKind::Supplies, "water", "More water"),
            Err(WellnessError::InvalidInput { .. })
        ));
        assert_eq!(store.items(ChecklistKind::Supplies).unwrap().len(), 1);
    }

    #[test]
    fn test_reading_corrupt_list_leaves_it_in_place() {
        let mem = MemoryStore::new();
        mem.set("emergency_foods", "{not json").unwrap();
        let store = EmergencyStore::new(&mem);

        assert_eq!(
            store.items(ChecklistKind::Food).unwrap(),
            ChecklistKind::Food.default_items()
        );
        store.progress(ChecklistKind::Food).unwrap();
        assert_eq!(mem.get("emergency_foods").unwrap().as_deref(), Some("{not json"));

        // The next change replaces it
        store.toggle(ChecklistKind::Food, "water-1").unwrap();
        assert!(store.items(ChecklistKind::Food).unwrap()[0].completed);
    }
}
