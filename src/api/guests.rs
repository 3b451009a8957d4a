//! Guest list API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::{error, respond, ApiResult};
use crate::directory;
use crate::errors::AppError;
use crate::models::{
    AddGuestRequest, GuestRecord, ImportGuestsRequest, ImportSummary, UpdateGuestRequest,
};
use crate::AppState;

/// Query string of the guest search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// GET /api/weddings/:id/guests - List the unified guest list.
pub async fn list_guests(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<GuestRecord>> {
    respond(directory::load_guest_list(state.repo.as_ref(), &id).await)
}

/// GET /api/weddings/:id/guests/search?q= - Find the guest a visitor means.
///
/// `data` is null when nobody matches.
pub async fn search_guests(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Option<GuestRecord>> {
    let Some(query) = params.q else {
        return error(
            AppError::BadRequest("Query parameter q is required".to_string()),
            0,
        );
    };

    respond(directory::search_guest(state.repo.as_ref(), &id, &query).await)
}

/// POST /api/weddings/:id/guests - Add a guest by hand.
pub async fn add_guest(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AddGuestRequest>,
) -> ApiResult<GuestRecord> {
    respond(directory::add_guest(state.repo.as_ref(), &id, &request).await)
}

/// PUT /api/weddings/:id/guests/:name - Edit a guest.
pub async fn update_guest(
    State(state): State<AppState>,
    Path((id, name)): Path<(String, String)>,
    Json(request): Json<UpdateGuestRequest>,
) -> ApiResult<GuestRecord> {
    respond(directory::update_guest(state.repo.as_ref(), &id, &name, &request).await)
}

/// POST /api/weddings/:id/guests/import - Append rows from a guest spreadsheet.
pub async fn import_guests(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ImportGuestsRequest>,
) -> ApiResult<ImportSummary> {
    respond(directory::import_guests(state.repo.as_ref(), &id, &request.entries).await)
}
