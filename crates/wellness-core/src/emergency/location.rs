use serde::{Deserialize, Serialize};

use crate::error::WellnessError;
use crate::WellnessResult;

/// Storage key for the household's emergency location record.
pub const LOCATION_KEY: &str = "emergency_location";

/// Where the household regroups and who to call from outside the area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmergencyLocation {
    pub address: String,
    pub meeting_point: String,
    pub out_of_area_contact: String,
    pub notes: String,
}

impl EmergencyLocation {
    pub fn validate(&self) -> WellnessResult<()> {
        if self.address.trim().is_empty() && self.meeting_point.trim().is_empty() {
            return Err(WellnessError::invalid(
                "location",
                "Provide at least an address or a meeting point.",
            ));
        }
        Ok(())
    }
}
