//! One-way upgrade from the legacy RSVP list to the unified guest list.

use std::collections::{HashMap, HashSet};

use crate::models::{GuestRecord, LegacyRsvpRecord, RsvpStatus};

use super::non_blank;
use super::normalize::name_key;

/// Build the unified guest list from the invite names and legacy responses.
///
/// Invited names come first, in invite order; responders who were never on
/// the invite list follow in the order they first responded. When a guest
/// responded more than once, the last response wins. Blank and repeated
/// invite names are skipped.
pub fn migrate(guest_name_list: &[String], legacy_rsvps: &[LegacyRsvpRecord]) -> Vec<GuestRecord> {
    let mut latest: HashMap<String, &LegacyRsvpRecord> = HashMap::new();
    let mut response_order = Vec::new();
    for rsvp in legacy_rsvps {
        let key = name_key(&rsvp.guest_name);
        if key.is_empty() {
            continue;
        }
        if latest.insert(key.clone(), rsvp).is_none() {
            response_order.push(key);
        }
    }

    let mut produced = HashSet::new();
    let mut unified = Vec::with_capacity(guest_name_list.len() + response_order.len());

    for name in guest_name_list {
        let key = name_key(name);
        if key.is_empty() || !produced.insert(key.clone()) {
            continue;
        }
        let record = match latest.get(&key) {
            Some(rsvp) => from_legacy(name.trim(), rsvp),
            None => GuestRecord::pending(name.trim()),
        };
        unified.push(record);
    }

    let invited = unified.len();
    for key in response_order {
        if produced.contains(&key) {
            continue;
        }
        if let Some(rsvp) = latest.get(&key) {
            unified.push(from_legacy(rsvp.guest_name.trim(), rsvp));
            produced.insert(key);
        }
    }

    tracing::info!(
        invited,
        uninvited_responders = unified.len() - invited,
        legacy_responses = legacy_rsvps.len(),
        "Migrated legacy RSVPs into unified guest list"
    );

    unified
}

fn from_legacy(name: &str, rsvp: &LegacyRsvpRecord) -> GuestRecord {
    GuestRecord {
        name: name.to_string(),
        email: non_blank(rsvp.email.as_deref()),
        rsvp_status: RsvpStatus::from_attending(rsvp.attending),
        plus_one: rsvp.number_of_guests > 1,
        plus_one_name: non_blank(rsvp.plus_one_name.as_deref()),
        dietary_restrictions: non_blank(rsvp.dietary_restrictions.as_deref()),
        song_suggestion: non_blank(rsvp.song_suggestion.as_deref()),
        submitted_at: rsvp.submitted_at,
    }
}
