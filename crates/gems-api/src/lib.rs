//! JSON REST API for the hidden-gems service.
//!
//! Exposes an axum [`Router`] backed by a [`GemService`] over any
//! [`gems_core::store::GemStore`]. TLS and other transport concerns are the
//! caller's responsibility.
//!
//! | Method | Path    | Notes |
//! |--------|---------|-------|
//! | `GET`  | `/gems` | Every stored gem |
//! | `POST` | `/gems` | Body: gem fields, see [`normalize`]; returns 201 + id |

pub mod error;
pub mod gems;
pub mod normalize;

use std::sync::Arc;

use axum::{Router, routing::get};
use gems_core::{service::GemService, store::GemStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be merged or nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(service: Arc<GemService<S>>) -> Router<()>
where
  S: GemStore + 'static,
{
  Router::new()
    .route("/gems", get(gems::list::<S>).post(gems::submit::<S>))
    .with_state(service)
}
