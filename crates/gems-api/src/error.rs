//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict with {existing_name:?}")]
  Conflict { message: String, existing_name: String },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<gems_core::Error> for ApiError {
  fn from(e: gems_core::Error) -> Self {
    let message = e.to_string();
    match e {
      gems_core::Error::Validation(_) => ApiError::BadRequest(message),
      gems_core::Error::Conflict { existing_name } => {
        ApiError::Conflict { message, existing_name }
      }
      gems_core::Error::Storage(e) => ApiError::Store(e),
    }
  }
}

impl From<gems_core::ValidationError> for ApiError {
  fn from(e: gems_core::ValidationError) -> Self {
    ApiError::BadRequest(e.to_string())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::BadRequest(m) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": m }))).into_response()
      }
      ApiError::Conflict { message, existing_name } => (
        StatusCode::CONFLICT,
        Json(json!({ "error": message, "conflictingName": existing_name })),
      )
        .into_response(),
      ApiError::Store(e) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
      )
        .into_response(),
    }
  }
}
