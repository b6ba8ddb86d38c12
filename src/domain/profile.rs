use serde::{Deserialize, Serialize};

use crate::dto::api::ProfileRecord;

/// Account summary shown in the dashboard header tiles.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub total_bookings: String,
    pub pending_bookings: String,
    pub balance: String,
    pub first_name: String,
    pub last_name: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            total_bookings: "0".to_string(),
            pending_bookings: "0".to_string(),
            balance: "0".to_string(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }
}

impl From<ProfileRecord> for Profile {
    fn from(record: ProfileRecord) -> Self {
        let defaults = Profile::default();
        Self {
            total_bookings: record.total_bookings.unwrap_or(defaults.total_bookings),
            pending_bookings: record.pending_bookings.unwrap_or(defaults.pending_bookings),
            balance: record.balance.unwrap_or(defaults.balance),
            first_name: record.first_name.unwrap_or_default(),
            last_name: record.last_name.unwrap_or_default(),
        }
    }
}
