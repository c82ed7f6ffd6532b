//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! The store's error taxonomy maps onto HTTP statuses: `NotFound` → 404,
//! `SchemaViolation` → 422 (with per-field detail), `UniquenessViolation`
//! → 409, everything else → 500.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] kontor_core::Error);

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    use kontor_core::Error;

    let message = self.0.to_string();
    match self.0 {
      Error::NotFound { .. } => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": message })))
          .into_response()
      }
      Error::SchemaViolation { violations, .. } => (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": message, "violations": violations })),
      )
        .into_response(),
      Error::UniquenessViolation { .. } => {
        (StatusCode::CONFLICT, Json(json!({ "error": message })))
          .into_response()
      }
      Error::StoreUnavailable(_) | Error::Serialization(_) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
      )
        .into_response(),
    }
  }
}
