//! Response-only RSVP shape that predates the unified guest list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One submitted RSVP in the historical format. Guests who never answered
/// have no record at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LegacyRsvpRecord {
    pub guest_name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub attending: bool,
    #[serde(default = "default_number_of_guests")]
    pub number_of_guests: u32,
    #[serde(default)]
    pub plus_one_name: Option<String>,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
    #[serde(default)]
    pub song_suggestion: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

fn default_number_of_guests() -> u32 {
    1
}
