use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Label for items whose id prefix is not in the group table.
pub const OTHER_GROUP: &str = "Other";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistKind {
    Supplies,
    FirstAid,
    Food,
}

impl ChecklistKind {
    pub const ALL: [ChecklistKind; 3] = [
        ChecklistKind::Supplies,
        ChecklistKind::FirstAid,
        ChecklistKind::Food,
    ];

    pub fn storage_key(&self) -> &'static str {
        match self {
            ChecklistKind::Supplies => "emergency_supplies",
            ChecklistKind::FirstAid => "emergency_firstaid",
            ChecklistKind::Food => "emergency_foods",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChecklistKind::Supplies => "Emergency Supplies",
            ChecklistKind::FirstAid => "First Aid Kit",
            ChecklistKind::Food => "Food & Water",
        }
    }

    /// Prefix to display-group table, in display order.
    pub fn groups(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            ChecklistKind::Supplies => &[
                ("water", "Water"),
                ("battery", "Batteries & Power"),
                ("flashlight", "Batteries & Power"),
                ("radio", "Communication"),
                ("phone", "Communication"),
                ("tool", "Tools & Safety"),
                ("whistle", "Tools & Safety"),
                ("doc", "Important Documents"),
                ("cash", "Important Documents"),
                ("hygiene", "Sanitation & Hygiene"),
                ("clothing", "Clothing & Bedding"),
            ],
            ChecklistKind::FirstAid => &[
                ("bandage", "Wound Care"),
                ("gauze", "Wound Care"),
                ("antiseptic", "Wound Care"),
                ("med", "Medications"),
                ("instrument", "Instruments"),
                ("ppe", "Protection"),
                ("guide", "Reference"),
            ],
            ChecklistKind::Food => &[
                ("water", "Water"),
                ("canned", "Canned Goods"),
                ("dry", "Dry Goods"),
                ("snack", "Ready to Eat"),
                ("baby", "Infant & Special Diet"),
                ("pet", "Pet Supplies"),
                ("utensil", "Cooking & Utensils"),
            ],
        }
    }

    /// Display group for an item id, derived only from its prefix.
    pub fn group_for(&self, id: &str) -> &'static str {
        let prefix = id_prefix(id);
        self.groups()
            .iter()
            .find(|(p, _)| *p == prefix)
            .map(|(_, label)| *label)
            .unwrap_or(OTHER_GROUP)
    }

    /// Seed items for a list that has never been stored.
    pub fn default_items(&self) -> Vec<ChecklistItem> {
        let seed: &[(&str, &str)] = match self {
            ChecklistKind::Supplies => &[
                ("water-1", "One gallon of water per person per day (3-day supply)"),
                ("battery-1", "Extra batteries for flashlights and radio"),
                ("flashlight-1", "Flashlight for each household member"),
                ("radio-1", "Battery-powered or hand-crank radio"),
                ("phone-1", "Cell phone chargers and backup battery"),
                ("tool-1", "Multi-purpose tool and wrench to turn off utilities"),
                ("whistle-1", "Whistle to signal for help"),
                ("doc-1", "Copies of insurance policies and identification"),
                ("cash-1", "Cash in small bills"),
                ("hygiene-1", "Moist towelettes, garbage bags and plastic ties"),
                ("clothing-1", "Change of clothes and sturdy shoes"),
            ],
            ChecklistKind::FirstAid => &[
                ("bandage-1", "Adhesive bandages in assorted sizes"),
                ("gauze-1", "Sterile gauze pads"),
                ("antiseptic-1", "Antiseptic wipes"),
                ("med-1", "Pain relievers"),
                ("med-2", "Prescription medications (7-day supply)"),
                ("instrument-1", "Tweezers and scissors"),
                ("instrument-2", "Thermometer"),
                ("ppe-1", "Disposable gloves"),
                ("guide-1", "First aid manual"),
            ],
            ChecklistKind::Food => &[
                ("water-1", "Bottled water"),
                ("canned-1", "Canned meats, fish and beans"),
                ("canned-2", "Canned fruits and vegetables"),
                ("dry-1", "Rice, pasta and oats"),
                ("snack-1", "Protein bars and trail mix"),
                ("baby-1", "Infant formula and special dietary foods"),
                ("pet-1", "Pet food"),
                ("utensil-1", "Manual can opener"),
            ],
        };
        seed.iter()
            .map(|(id, text)| ChecklistItem {
                id: id.to_string(),
                text: text.to_string(),
                completed: false,
            })
            .collect()
    }
}

impl std::str::FromStr for ChecklistKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "supplies" => Ok(ChecklistKind::Supplies),
            "first_aid" | "firstaid" => Ok(ChecklistKind::FirstAid),
            "food" | "foods" => Ok(ChecklistKind::Food),
            other => Err(format!("Unknown checklist '{other}' (supplies, first-aid, food)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistGroup {
    pub label: String,
    pub completed: u32,
    pub total: u32,
    pub items: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistProgress {
    pub kind: ChecklistKind,
    pub completed: u32,
    pub total: u32,
    /// 0-100, rounded to one decimal place
    pub percent_complete: Decimal,
}

/// The part of an id before its final `-<number>`, or the whole id.
pub fn id_prefix(id: &str) -> &str {
    match id.rsplit_once('-') {
        Some((prefix, suffix)) if suffix.chars().all(|c| c.is_ascii_digit()) && !suffix.is_empty() => {
            prefix
        }
        _ => id,
    }
}

/// Group items for display, following the kind's table order with
/// unmatched items collected last under "Other".
pub fn group_items(kind: ChecklistKind, items: &[ChecklistItem]) -> Vec<ChecklistGroup> {
    let mut labels: Vec<&'static str> = Vec::new();
    for (_, label) in kind.groups() {
        if !labels.contains(label) {
            labels.push(*label);
        }
    }
    labels.push(OTHER_GROUP);

    labels
        .into_iter()
        .filter_map(|label| {
            let members: Vec<ChecklistItem> = items
                .iter()
                .filter(|item| kind.group_for(&item.id) == label)
                .cloned()
                .collect();
            if members.is_empty() {
                return None;
            }
            Some(ChecklistGroup {
                label: label.to_string(),
                completed: members.iter().filter(|i| i.completed).count() as u32,
                total: members.len() as u32,
                items: members,
            })
        })
        .collect()
}

pub fn progress(kind: ChecklistKind, items: &[ChecklistItem]) -> ChecklistProgress {
    let total = items.len() as u32;
    let completed = items.iter().filter(|i| i.completed).count() as u32;
    let percent_complete = if total == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(completed) * dec!(100) / Decimal::from(total)).round_dp(1)
    };
    ChecklistProgress {
        kind,
        completed,
        total,
        percent_complete,
    }
}
