//! Guest record model and the request bodies that mutate it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// RSVP state of a single guest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RsvpStatus {
    Yes,
    No,
    #[default]
    Pending,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Yes => "yes",
            RsvpStatus::No => "no",
            RsvpStatus::Pending => "pending",
        }
    }

    pub fn from_attending(attending: bool) -> Self {
        if attending {
            RsvpStatus::Yes
        } else {
            RsvpStatus::No
        }
    }
}

/// One invited guest in a wedding's unified guest list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GuestRecord {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub rsvp_status: RsvpStatus,
    #[serde(default)]
    pub plus_one: bool,
    #[serde(default)]
    pub plus_one_name: Option<String>,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
    #[serde(default)]
    pub song_suggestion: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl GuestRecord {
    /// A guest who has not answered yet.
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            rsvp_status: RsvpStatus::Pending,
            plus_one: false,
            plus_one_name: None,
            dietary_restrictions: None,
            song_suggestion: None,
            submitted_at: None,
        }
    }
}

/// The RSVP fields a guest fills in on the public form.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpSubmission {
    pub email: String,
    pub attending: bool,
    #[serde(default)]
    pub plus_one: bool,
    #[serde(default)]
    pub plus_one_name: Option<String>,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
    #[serde(default)]
    pub song_suggestion: Option<String>,
}

/// Request body for the public RSVP endpoint: the name typed by the visitor
/// plus their answers.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpRequest {
    pub name: String,
    #[serde(flatten)]
    pub submission: RsvpSubmission,
}

/// Request body for manually adding a guest.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddGuestRequest {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Request body for an administrator editing a guest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGuestRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub rsvp_status: Option<RsvpStatus>,
    /// Expected list version for optimistic concurrency control
    #[serde(default)]
    pub expected_version: Option<i64>,
}

/// One row produced by a CSV or spreadsheet import.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Request body for bulk import.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportGuestsRequest {
    pub entries: Vec<ImportEntry>,
}

/// Outcome counts of a bulk import.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub added: usize,
    pub skipped_duplicates: usize,
    pub skipped_invalid: usize,
}

/// Headcount overview for the admin dashboard.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GuestListSummary {
    pub total: usize,
    pub attending: usize,
    pub declined: usize,
    pub pending: usize,
    pub plus_ones: usize,
    pub expected_headcount: usize,
}
