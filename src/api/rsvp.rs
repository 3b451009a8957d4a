//! Public RSVP endpoint.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{respond, ApiResult};
use crate::directory;
use crate::models::{GuestRecord, RsvpRequest};
use crate::AppState;

/// POST /api/weddings/:id/rsvp - Record a guest's answer.
///
/// The guest is found by the typed name the same way the search endpoint
/// finds them.
pub async fn submit_rsvp(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RsvpRequest>,
) -> ApiResult<GuestRecord> {
    respond(directory::submit_rsvp(state.repo.as_ref(), &id, &request).await)
}
