//! Handlers for the `/gems` endpoint.
//!
//! | Method | Path    | Notes |
//! |--------|---------|-------|
//! | `GET`  | `/gems` | JSON array of [`GemRecord`] |
//! | `POST` | `/gems` | 201 + [`SubmitResponse`]; 400 invalid, 409 duplicate |

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use gems_core::{gem::GemRecord, service::GemService, store::GemStore};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{
  error::ApiError,
  normalize::{INVALID_BODY, normalize},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /gems`
pub async fn list<S>(
  State(service): State<Arc<GemService<S>>>,
) -> Result<Json<Vec<GemRecord>>, ApiError>
where
  S: GemStore,
{
  Ok(Json(service.list_all().await?))
}

// ─── Submit ───────────────────────────────────────────────────────────────────

/// Body returned by a successful `POST /gems`.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
  pub success: bool,
  pub id:      Uuid,
  pub message: &'static str,
}

/// `POST /gems` — body: `{"name", "description", "latitude", "longitude",
/// "submittedBy"?}` (aliases accepted, see [`crate::normalize`]).
pub async fn submit<S>(
  State(service): State<Arc<GemService<S>>>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: GemStore,
{
  let Json(body) =
    body.map_err(|_| ApiError::BadRequest(INVALID_BODY.to_owned()))?;
  let submission = normalize(&body)?;

  let record = service.submit(submission).await?;
  Ok((
    StatusCode::CREATED,
    Json(SubmitResponse {
      success: true,
      id:      record.id,
      message: "Hidden gem submitted successfully",
    }),
  ))
}
