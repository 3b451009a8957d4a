//! Data models for the wedding guest backend.
//!
//! Field names serialize as camelCase to match the website's JSON documents.

mod guest;
mod legacy;
mod wedding;

pub use guest::*;
pub use legacy::*;
pub use wedding::*;
