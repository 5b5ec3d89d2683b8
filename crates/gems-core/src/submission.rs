//! Raw submissions and the validation stage of the submission flow.
//!
//! A [`Submission`] holds fields exactly as the client sent them (after alias
//! normalization by the transport). [`Submission::validate`] turns it into a
//! [`NewGem`] or a [`ValidationError`].

use crate::{
  error::ValidationError,
  gem::{ANONYMOUS, Coordinates, NewGem},
};

/// A coordinate as received on the wire: JSON clients send either numbers or
/// numeric strings.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateInput {
  Number(f64),
  Text(String),
}

impl CoordinateInput {
  /// The value in degrees, or `None` if it is not a finite number.
  pub fn to_degrees(&self) -> Option<f64> {
    let value = match self {
      Self::Number(n) => *n,
      Self::Text(s) => s.trim().parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
  }
}

impl From<f64> for CoordinateInput {
  fn from(n: f64) -> Self { Self::Number(n) }
}

impl From<&str> for CoordinateInput {
  fn from(s: &str) -> Self { Self::Text(s.to_owned()) }
}

/// Unvalidated submission fields. `None` means the field was absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission {
  pub name:         Option<String>,
  pub description:  Option<String>,
  pub latitude:     Option<CoordinateInput>,
  pub longitude:    Option<CoordinateInput>,
  pub submitted_by: Option<String>,
}

fn check_range(
  field: &'static str,
  value: f64,
  limit: f64,
) -> Result<f64, ValidationError> {
  if (-limit..=limit).contains(&value) {
    Ok(value)
  } else {
    Err(ValidationError::OutOfRange { field, value })
  }
}

impl Submission {
  /// Require non-blank text fields and finite, in-range coordinates.
  ///
  /// All missing fields are reported together. A blank or absent submitter
  /// becomes [`ANONYMOUS`].
  pub fn validate(self) -> Result<NewGem, ValidationError> {
    let name = self.name.filter(|s| !s.trim().is_empty());
    let description = self.description.filter(|s| !s.trim().is_empty());

    let mut missing = Vec::new();
    if name.is_none() {
      missing.push("name");
    }
    if description.is_none() {
      missing.push("description");
    }
    if self.latitude.is_none() {
      missing.push("latitude");
    }
    if self.longitude.is_none() {
      missing.push("longitude");
    }

    let (Some(name), Some(description), Some(latitude), Some(longitude)) =
      (name, description, self.latitude, self.longitude)
    else {
      return Err(ValidationError::MissingFields(missing));
    };

    let (Some(latitude), Some(longitude)) =
      (latitude.to_degrees(), longitude.to_degrees())
    else {
      return Err(ValidationError::NonNumericCoordinates);
    };

    let coordinates = Coordinates::new(
      check_range("latitude", latitude, 90.0)?,
      check_range("longitude", longitude, 180.0)?,
    );

    let submitted_by = self
      .submitted_by
      .filter(|s| !s.trim().is_empty())
      .unwrap_or_else(|| ANONYMOUS.to_owned());

    Ok(NewGem { name, description, coordinates, submitted_by })
  }
}
