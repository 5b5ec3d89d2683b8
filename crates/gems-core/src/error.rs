//! Error types for `gems-core`.
//!
//! Every rejected submission surfaces as one of the [`Error`] variants; none
//! of them is fatal to the process.

use thiserror::Error;

/// Why a submission failed the validation stage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
  #[error("missing required fields: {}", .0.join(", "))]
  MissingFields(Vec<&'static str>),

  #[error("{0} must be a string")]
  NotText(&'static str),

  #[error("latitude and longitude must be numeric")]
  NonNumericCoordinates,

  #[error("{field} {value} is out of range")]
  OutOfRange { field: &'static str, value: f64 },
}

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("this location/name is too similar to an existing gem: {existing_name:?}")]
  Conflict { existing_name: String },

  #[error("store error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
