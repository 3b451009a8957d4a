//! Guest directory reconciliation.
//!
//! Pure functions over in-memory guest lists: name search, merging RSVP
//! answers, the legacy list upgrade and administrative edits. Nothing in
//! here performs I/O; callers load and persist lists through
//! [`crate::directory::GuestListStore`].

mod couple;
mod matcher;
mod merger;
mod migrate;
mod normalize;
mod roster;

pub use couple::*;
pub use matcher::*;
pub use merger::*;
pub use migrate::*;
pub use normalize::*;
pub use roster::*;

/// The guest an RSVP was applied to is not in the list it was applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestNotInListError {
    pub name: String,
}

impl GuestNotInListError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl std::fmt::Display for GuestNotInListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Guest '{}' is not in the guest list", self.name)
    }
}

impl std::error::Error for GuestNotInListError {}

/// Trimmed copy of `value`, or `None` when it is missing or blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
