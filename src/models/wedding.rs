//! Wedding model and the stored guest-list snapshot.

use serde::{Deserialize, Serialize};

use super::{GuestListSummary, GuestRecord, LegacyRsvpRecord};

/// A wedding as stored, without its guest data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wedding {
    pub id: String,
    pub couple_names: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wedding_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub version: i64,
}

/// Everything the store holds about one wedding's guests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredGuestList {
    /// Names entered when the wedding was created
    pub guest_name_list: Vec<String>,
    /// Read-only fossil of the pre-unified RSVP format
    pub legacy_rsvps: Option<Vec<LegacyRsvpRecord>>,
    /// Authoritative list once it exists
    pub unified_list: Option<Vec<GuestRecord>>,
    pub version: i64,
}

/// Request body for creating a wedding.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWeddingRequest {
    pub couple_names: String,
    #[serde(default)]
    pub wedding_date: Option<String>,
    #[serde(default)]
    pub guest_name_list: Vec<String>,
    /// Historical responses carried over from the old RSVP format
    #[serde(default)]
    pub legacy_rsvps: Option<Vec<LegacyRsvpRecord>>,
}

/// First names of the couple for display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CoupleFirstNames {
    pub first: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second: Option<String>,
}

/// Wedding plus headcount, served to the admin dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeddingOverview {
    #[serde(flatten)]
    pub wedding: Wedding,
    pub couple_first_names: CoupleFirstNames,
    pub guests: GuestListSummary,
}
