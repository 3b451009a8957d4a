//! Free-text guest lookup.
//!
//! Strategies run from most to least precise and the first one that finds
//! anything wins. Within a strategy the earliest guest in list order wins.

use crate::models::GuestRecord;

use super::normalize::normalize;

/// The lookup strategies, in cascade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Whole name equal, ignoring case
    ExactName,
    /// Every query token is a token of the guest name
    TokenSet,
    /// Same first token, and a later query token prefixes a later name token
    AnchoredPartial,
    /// First tokens and last tokens each contain one another
    LoosePartial,
    /// Query equals the guest's e-mail, ignoring case
    Email,
}

impl MatchStrategy {
    pub const CASCADE: [MatchStrategy; 5] = [
        MatchStrategy::ExactName,
        MatchStrategy::TokenSet,
        MatchStrategy::AnchoredPartial,
        MatchStrategy::LoosePartial,
        MatchStrategy::Email,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStrategy::ExactName => "exact_name",
            MatchStrategy::TokenSet => "token_set",
            MatchStrategy::AnchoredPartial => "anchored_partial",
            MatchStrategy::LoosePartial => "loose_partial",
            MatchStrategy::Email => "email",
        }
    }

    fn needs_multiple_tokens(&self) -> bool {
        matches!(
            self,
            MatchStrategy::AnchoredPartial | MatchStrategy::LoosePartial
        )
    }

    fn matches(&self, query: &Query, guest: &GuestRecord) -> bool {
        match self {
            MatchStrategy::ExactName => guest.name.trim().to_lowercase() == query.lowered,
            MatchStrategy::TokenSet => {
                let name_tokens = normalize(&guest.name);
                query.tokens.iter().all(|t| name_tokens.contains(t))
            }
            MatchStrategy::AnchoredPartial => {
                let name_tokens = normalize(&guest.name);
                if name_tokens.len() < 2 || name_tokens[0] != query.tokens[0] {
                    return false;
                }
                query.tokens[1..].iter().any(|q| {
                    name_tokens[1..]
                        .iter()
                        .any(|n| n.starts_with(q.as_str()))
                })
            }
            MatchStrategy::LoosePartial => {
                let name_tokens = normalize(&guest.name);
                match (
                    name_tokens.first(),
                    name_tokens.last(),
                    query.tokens.first(),
                    query.tokens.last(),
                ) {
                    (Some(name_first), Some(name_last), Some(query_first), Some(query_last)) => {
                        overlaps(name_first, query_first) && overlaps(name_last, query_last)
                    }
                    _ => false,
                }
            }
            MatchStrategy::Email => guest
                .email
                .as_deref()
                .is_some_and(|email| email.trim().to_lowercase() == query.lowered),
        }
    }
}

struct Query {
    lowered: String,
    tokens: Vec<String>,
}

fn overlaps(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Find the guest a visitor most likely meant by `query`.
///
/// Returns `None` for a blank query, an empty list, or when no strategy
/// matches. Not finding anyone is routine and is not an error.
pub fn find_guest<'a>(query: &str, guests: &'a [GuestRecord]) -> Option<&'a GuestRecord> {
    find_guest_with_strategy(query, guests).map(|(guest, _)| guest)
}

/// Like [`find_guest`], also reporting which strategy produced the match.
pub fn find_guest_with_strategy<'a>(
    query: &str,
    guests: &'a [GuestRecord],
) -> Option<(&'a GuestRecord, MatchStrategy)> {
    let trimmed = query.trim();
    if trimmed.is_empty() || guests.is_empty() {
        return None;
    }

    let query = Query {
        lowered: trimmed.to_lowercase(),
        tokens: normalize(trimmed),
    };

    for strategy in MatchStrategy::CASCADE {
        if strategy.needs_multiple_tokens() && query.tokens.len() < 2 {
            continue;
        }
        if let Some(guest) = guests.iter().find(|g| strategy.matches(&query, g)) {
            tracing::debug!(
                strategy = strategy.as_str(),
                guest = %guest.name,
                "Guest search matched"
            );
            return Some((guest, strategy));
        }
    }

    tracing::debug!(query = trimmed, "Guest search found no match");
    None
}
