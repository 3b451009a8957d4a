//! Guest directory operations backed by a [`GuestListStore`].
//!
//! Every write follows the same cycle: load the whole list, apply a pure
//! change from [`crate::guests`], save with the version that was loaded.
//! A version mismatch means another request saved in between; the cycle is
//! then rerun from a fresh read, since the changes themselves are pure.

use std::future::Future;

use crate::errors::AppError;
use crate::guests;
use crate::models::{
    AddGuestRequest, GuestRecord, ImportEntry, ImportSummary, RsvpRequest, StoredGuestList,
    UpdateGuestRequest,
};

/// Attempts at a read-modify-write cycle before giving up on a busy list.
const MAX_SAVE_ATTEMPTS: usize = 3;

/// Persistence capability for one wedding's guest data.
pub trait GuestListStore: Send + Sync {
    /// Load everything stored about a wedding's guests, or `None` for an unknown wedding.
    fn load(
        &self,
        wedding_id: &str,
    ) -> impl Future<Output = Result<Option<StoredGuestList>, AppError>> + Send;

    /// Replace the unified list if the stored version still equals
    /// `expected_version`, returning the new version.
    ///
    /// Fails with [`AppError::Conflict`] when the version moved on.
    fn save(
        &self,
        wedding_id: &str,
        guests: &[GuestRecord],
        expected_version: i64,
    ) -> impl Future<Output = Result<i64, AppError>> + Send;
}

/// A value read from or written to a wedding's list, with the list version.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub data: T,
    pub version: i64,
}

fn wedding_not_found(wedding_id: &str) -> AppError {
    AppError::NotFound(format!("Wedding {} not found", wedding_id))
}

/// Load the unified guest list, building it from the legacy data first if
/// the wedding does not have one yet.
pub async fn load_guest_list<S: GuestListStore>(
    store: &S,
    wedding_id: &str,
) -> Result<Versioned<Vec<GuestRecord>>, AppError> {
    let mut current_version = 0;

    for _ in 0..MAX_SAVE_ATTEMPTS {
        let stored = store
            .load(wedding_id)
            .await?
            .ok_or_else(|| wedding_not_found(wedding_id))?;

        if let Some(unified) = stored.unified_list {
            return Ok(Versioned {
                data: unified,
                version: stored.version,
            });
        }

        let legacy = stored.legacy_rsvps.unwrap_or_default();
        let unified = guests::migrate(&stored.guest_name_list, &legacy);

        match store.save(wedding_id, &unified, stored.version).await {
            Ok(version) => {
                tracing::info!(wedding_id, guests = unified.len(), "Created unified guest list");
                return Ok(Versioned {
                    data: unified,
                    version,
                });
            }
            Err(AppError::Conflict {
                current_version: v, ..
            }) => {
                // Someone else migrated first; their list is read on the next pass
                tracing::debug!(wedding_id, "Unified guest list created concurrently");
                current_version = v;
            }
            Err(e) => return Err(e),
        }
    }

    Err(busy(wedding_id, current_version))
}

fn busy(wedding_id: &str, current_version: i64) -> AppError {
    AppError::Conflict {
        message: format!(
            "Guest list for wedding {} changed repeatedly, please retry",
            wedding_id
        ),
        current_version,
    }
}

/// Run one load-change-save cycle, retrying on version conflicts.
///
/// With `expected_version` set the caller has pinned the version it edited
/// against, so any mismatch is reported instead of retried.
async fn modify_guest_list<S, T, F>(
    store: &S,
    wedding_id: &str,
    expected_version: Option<i64>,
    mut change: F,
) -> Result<Versioned<T>, AppError>
where
    S: GuestListStore,
    F: FnMut(&[GuestRecord]) -> Result<(Vec<GuestRecord>, T), AppError>,
{
    let attempts = if expected_version.is_some() {
        1
    } else {
        MAX_SAVE_ATTEMPTS
    };
    let mut current_version = 0;

    for attempt in 1..=attempts {
        let current = load_guest_list(store, wedding_id).await?;

        if let Some(expected) = expected_version {
            if current.version != expected {
                return Err(AppError::Conflict {
                    message: format!(
                        "Version mismatch: expected {}, current {}",
                        expected, current.version
                    ),
                    current_version: current.version,
                });
            }
        }

        let (updated, outcome) = change(&current.data)?;

        match store.save(wedding_id, &updated, current.version).await {
            Ok(version) => {
                return Ok(Versioned {
                    data: outcome,
                    version,
                })
            }
            Err(AppError::Conflict {
                current_version: v, ..
            }) => {
                tracing::warn!(wedding_id, attempt, "Guest list changed while saving");
                current_version = v;
            }
            Err(e) => return Err(e),
        }
    }

    Err(busy(wedding_id, current_version))
}

fn find_by_name(list: &[GuestRecord], name: &str) -> Option<GuestRecord> {
    let key = guests::name_key(name);
    list.iter()
        .find(|g| guests::name_key(&g.name) == key)
        .cloned()
}

/// Look a guest up by whatever the visitor typed.
pub async fn search_guest<S: GuestListStore>(
    store: &S,
    wedding_id: &str,
    query: &str,
) -> Result<Versioned<Option<GuestRecord>>, AppError> {
    let list = load_guest_list(store, wedding_id).await?;
    let found = guests::find_guest(query, &list.data).cloned();
    Ok(Versioned {
        data: found,
        version: list.version,
    })
}

/// Record a visitor's RSVP against the guest their typed name matches.
pub async fn submit_rsvp<S: GuestListStore>(
    store: &S,
    wedding_id: &str,
    request: &RsvpRequest,
) -> Result<Versioned<GuestRecord>, AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if request.submission.email.trim().is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }

    let saved = modify_guest_list(store, wedding_id, None, |current| {
        let matched = guests::find_guest(&request.name, current)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No guest matching '{}' is on the guest list",
                    request.name.trim()
                ))
            })?;
        let updated = guests::apply_rsvp(&matched, &request.submission, current)?;
        let record = find_by_name(&updated, &matched.name)
            .ok_or_else(|| guests::GuestNotInListError::new(&matched.name))?;
        Ok((updated, record))
    })
    .await?;

    tracing::info!(
        wedding_id,
        guest = %saved.data.name,
        status = saved.data.rsvp_status.as_str(),
        "RSVP recorded"
    );
    Ok(saved)
}

/// Append imported names that are not on the list yet.
pub async fn import_guests<S: GuestListStore>(
    store: &S,
    wedding_id: &str,
    entries: &[ImportEntry],
) -> Result<Versioned<ImportSummary>, AppError> {
    let saved = modify_guest_list(store, wedding_id, None, |current| {
        Ok(guests::merge_imports(current, entries))
    })
    .await?;

    tracing::info!(
        wedding_id,
        added = saved.data.added,
        skipped_duplicates = saved.data.skipped_duplicates,
        skipped_invalid = saved.data.skipped_invalid,
        "Imported guests"
    );
    Ok(saved)
}

/// Add one guest by hand.
pub async fn add_guest<S: GuestListStore>(
    store: &S,
    wedding_id: &str,
    request: &AddGuestRequest,
) -> Result<Versioned<GuestRecord>, AppError> {
    modify_guest_list(store, wedding_id, None, |current| {
        let updated = guests::add_guest(current, &request.name, request.email.as_deref())?;
        let record = find_by_name(&updated, &request.name)
            .ok_or_else(|| guests::GuestNotInListError::new(&request.name))?;
        Ok((updated, record))
    })
    .await
}

/// Edit one guest's name, e-mail or status.
pub async fn update_guest<S: GuestListStore>(
    store: &S,
    wedding_id: &str,
    name: &str,
    request: &UpdateGuestRequest,
) -> Result<Versioned<GuestRecord>, AppError> {
    modify_guest_list(store, wedding_id, request.expected_version, |current| {
        let updated = guests::update_guest(current, name, request)?;
        let new_name = request.name.as_deref().unwrap_or(name);
        let record = find_by_name(&updated, new_name)
            .ok_or_else(|| guests::GuestNotInListError::new(new_name))?;
        Ok((updated, record))
    })
    .await
}
