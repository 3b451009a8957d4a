//! REST API module.
//!
//! Contains all API routes and handlers. Every response carries the
//! wedding's guest-list version as `revisionId`.

mod guests;
mod rsvp;
mod weddings;

pub use guests::*;
pub use rsvp::*;
pub use weddings::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::directory::Versioned;
use crate::errors::{AppError, AppErrorWithRevision};

/// Success response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub revision_id: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, revision_id: i64) -> Self {
        Self {
            success: true,
            data,
            revision_id,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppErrorWithRevision>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T, revision_id: i64) -> ApiResult<T> {
    Ok(ApiResponse::new(data, revision_id))
}

/// Create an error API response.
pub fn error<T: Serialize>(err: AppError, revision_id: i64) -> ApiResult<T> {
    Err(AppErrorWithRevision {
        error: err,
        revision_id,
    })
}

/// Turn a directory result into a response, reporting the version the
/// client conflicted with when there is one.
pub fn respond<T: Serialize>(result: Result<Versioned<T>, AppError>) -> ApiResult<T> {
    match result {
        Ok(versioned) => success(versioned.data, versioned.version),
        Err(e) => {
            let revision_id = match &e {
                AppError::Conflict {
                    current_version, ..
                } => *current_version,
                _ => 0,
            };
            error(e, revision_id)
        }
    }
}
