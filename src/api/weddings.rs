//! Wedding API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::directory;
use crate::errors::AppError;
use crate::guests;
use crate::models::{CoupleFirstNames, CreateWeddingRequest, Wedding, WeddingOverview};
use crate::AppState;

/// POST /api/weddings - Create a wedding and its guest list.
///
/// Without legacy responses every invited name starts out pending right
/// away; with them, the unified list is built on first access.
pub async fn create_wedding(
    State(state): State<AppState>,
    Json(request): Json<CreateWeddingRequest>,
) -> ApiResult<Wedding> {
    if request.couple_names.trim().is_empty() {
        return error(
            AppError::Validation("Couple names are required".to_string()),
            0,
        );
    }

    let unified = match request.legacy_rsvps {
        Some(_) => None,
        None => Some(guests::migrate(&request.guest_name_list, &[])),
    };

    match state.repo.create_wedding(&request, unified.as_deref()).await {
        Ok(wedding) => {
            tracing::info!(wedding_id = %wedding.id, "Wedding created");
            let version = wedding.version;
            success(wedding, version)
        }
        Err(e) => error(e, 0),
    }
}

/// GET /api/weddings/:id - Wedding details with headcount.
pub async fn get_wedding(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<WeddingOverview> {
    let mut wedding = match state.repo.get_wedding(&id).await {
        Ok(Some(wedding)) => wedding,
        Ok(None) => {
            return error(
                AppError::NotFound(format!("Wedding {} not found", id)),
                0,
            )
        }
        Err(e) => return error(e, 0),
    };

    let list = match directory::load_guest_list(state.repo.as_ref(), &id).await {
        Ok(list) => list,
        Err(e) => return error(e, wedding.version),
    };
    wedding.version = list.version;

    let (first, second) = guests::split_couple_names(&wedding.couple_names);
    let overview = WeddingOverview {
        couple_first_names: CoupleFirstNames { first, second },
        guests: guests::summarize(&list.data),
        wedding,
    };

    success(overview, list.version)
}
