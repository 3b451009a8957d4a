//! Administrative edits to the unified guest list: manual adds, edits,
//! bulk imports and headcount.
//!
//! Name collisions here use exact name identity (case and whitespace
//! insensitive), never the fuzzy search cascade.

use std::collections::HashSet;

use crate::models::{
    GuestListSummary, GuestRecord, ImportEntry, ImportSummary, RsvpStatus, UpdateGuestRequest,
};

use super::normalize::name_key;
use super::{non_blank, GuestNotInListError};

/// Why an administrative edit was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// Input failed validation
    Invalid(String),
    /// Edit would create a second record with the same name or e-mail
    Duplicate(String),
    /// Edited guest does not exist
    NotInList(GuestNotInListError),
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::Invalid(msg) => write!(f, "{}", msg),
            RosterError::Duplicate(msg) => write!(f, "{}", msg),
            RosterError::NotInList(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for RosterError {}

impl From<GuestNotInListError> for RosterError {
    fn from(err: GuestNotInListError) -> Self {
        RosterError::NotInList(err)
    }
}

/// Append imported rows whose names are not on the list yet.
///
/// Blank names are skipped as invalid; names already present, or repeated
/// within the batch, are skipped as duplicates. Neither aborts the batch.
pub fn merge_imports(
    guests: &[GuestRecord],
    entries: &[ImportEntry],
) -> (Vec<GuestRecord>, ImportSummary) {
    let mut known: HashSet<String> = guests.iter().map(|g| name_key(&g.name)).collect();
    let mut updated = guests.to_vec();
    let mut summary = ImportSummary::default();

    for entry in entries {
        let key = name_key(&entry.name);
        if key.is_empty() {
            summary.skipped_invalid += 1;
            continue;
        }
        if !known.insert(key) {
            summary.skipped_duplicates += 1;
            continue;
        }
        updated.push(GuestRecord {
            email: non_blank(entry.email.as_deref()),
            ..GuestRecord::pending(entry.name.trim())
        });
        summary.added += 1;
    }

    (updated, summary)
}

/// Append a single pending guest.
pub fn add_guest(
    guests: &[GuestRecord],
    name: &str,
    email: Option<&str>,
) -> Result<Vec<GuestRecord>, RosterError> {
    let key = name_key(name);
    if key.is_empty() {
        return Err(RosterError::Invalid("Guest name is required".to_string()));
    }
    if guests.iter().any(|g| name_key(&g.name) == key) {
        return Err(RosterError::Duplicate(format!(
            "Guest '{}' is already on the list",
            name.trim()
        )));
    }
    let email = non_blank(email);
    if let Some(owner) = email_owner(guests, email.as_deref(), None) {
        return Err(RosterError::Duplicate(format!(
            "E-mail is already used by '{}'",
            owner.name
        )));
    }

    let mut updated = guests.to_vec();
    updated.push(GuestRecord {
        email,
        ..GuestRecord::pending(name.trim())
    });
    Ok(updated)
}

/// Edit the name, e-mail or status of the guest called `name`.
///
/// A blank e-mail in the patch clears the stored address.
pub fn update_guest(
    guests: &[GuestRecord],
    name: &str,
    patch: &UpdateGuestRequest,
) -> Result<Vec<GuestRecord>, RosterError> {
    let key = name_key(name);
    let index = guests
        .iter()
        .position(|g| name_key(&g.name) == key)
        .ok_or_else(|| GuestNotInListError::new(name))?;

    let mut record = guests[index].clone();

    if let Some(new_name) = &patch.name {
        let new_key = name_key(new_name);
        if new_key.is_empty() {
            return Err(RosterError::Invalid("Guest name is required".to_string()));
        }
        let collides = guests
            .iter()
            .enumerate()
            .any(|(i, g)| i != index && name_key(&g.name) == new_key);
        if collides {
            return Err(RosterError::Duplicate(format!(
                "Guest '{}' is already on the list",
                new_name.trim()
            )));
        }
        record.name = new_name.trim().to_string();
    }

    if let Some(email) = &patch.email {
        let email = non_blank(Some(email));
        if let Some(owner) = email_owner(guests, email.as_deref(), Some(index)) {
            return Err(RosterError::Duplicate(format!(
                "E-mail is already used by '{}'",
                owner.name
            )));
        }
        record.email = email;
    }

    if let Some(status) = patch.rsvp_status {
        record.rsvp_status = status;
    }

    let mut updated = guests.to_vec();
    updated[index] = record;
    Ok(updated)
}

fn email_owner<'a>(
    guests: &'a [GuestRecord],
    email: Option<&str>,
    except: Option<usize>,
) -> Option<&'a GuestRecord> {
    let wanted = email?.to_lowercase();
    guests.iter().enumerate().find_map(|(i, g)| {
        let same = Some(i) != except
            && g
                .email
                .as_deref()
                .is_some_and(|e| e.trim().to_lowercase() == wanted);
        same.then_some(g)
    })
}

/// Count responses and expected heads.
pub fn summarize(guests: &[GuestRecord]) -> GuestListSummary {
    let mut summary = GuestListSummary {
        total: guests.len(),
        ..Default::default()
    };
    for guest in guests {
        match guest.rsvp_status {
            RsvpStatus::Yes => {
                summary.attending += 1;
                if guest.plus_one {
                    summary.plus_ones += 1;
                }
            }
            RsvpStatus::No => summary.declined += 1,
            RsvpStatus::Pending => summary.pending += 1,
        }
    }
    summary.expected_headcount = summary.attending + summary.plus_ones;
    summary
}
