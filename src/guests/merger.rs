//! Applies a guest's RSVP answers to the unified list.

use chrono::{DateTime, Utc};

use crate::models::{GuestRecord, RsvpStatus, RsvpSubmission};

use super::normalize::name_key;
use super::{non_blank, GuestNotInListError};

/// Merge `submission` into the record for `matched`, stamped with the current time.
///
/// See [`apply_rsvp_at`].
pub fn apply_rsvp(
    matched: &GuestRecord,
    submission: &RsvpSubmission,
    guests: &[GuestRecord],
) -> Result<Vec<GuestRecord>, GuestNotInListError> {
    apply_rsvp_at(matched, submission, guests, Utc::now())
}

/// Merge `submission` into the record for `matched` and return the new list.
///
/// The record keeps its canonical name. Every other record carrying the
/// submitted e-mail is dropped as a stale duplicate of the same person.
/// The input list is never modified; persisting the result is up to the caller.
pub fn apply_rsvp_at(
    matched: &GuestRecord,
    submission: &RsvpSubmission,
    guests: &[GuestRecord],
    now: DateTime<Utc>,
) -> Result<Vec<GuestRecord>, GuestNotInListError> {
    let key = name_key(&matched.name);
    let index = guests
        .iter()
        .position(|g| name_key(&g.name) == key)
        .ok_or_else(|| GuestNotInListError::new(&matched.name))?;

    let email = non_blank(Some(&submission.email));
    let email_key = email.as_deref().map(str::to_lowercase);

    let mut updated = guests.to_vec();
    let record = &mut updated[index];
    record.email = email;
    record.rsvp_status = RsvpStatus::from_attending(submission.attending);
    record.plus_one = submission.plus_one;
    record.plus_one_name = if submission.plus_one {
        non_blank(submission.plus_one_name.as_deref())
    } else {
        None
    };
    record.dietary_restrictions = non_blank(submission.dietary_restrictions.as_deref());
    record.song_suggestion = non_blank(submission.song_suggestion.as_deref());
    record.submitted_at = Some(now);

    let Some(email_key) = email_key else {
        return Ok(updated);
    };

    let kept_name = updated[index].name.clone();
    let mut position = 0;
    updated.retain(|guest| {
        let is_duplicate = position != index
            && guest
                .email
                .as_deref()
                .is_some_and(|e| e.trim().to_lowercase() == email_key);
        if is_duplicate {
            tracing::info!(
                kept = %kept_name,
                removed = %guest.name,
                "Removed duplicate guest sharing an e-mail address"
            );
        }
        position += 1;
        !is_duplicate
    });

    Ok(updated)
}
