//! Input normalization for `POST /gems` bodies.
//!
//! Clients name fields inconsistently, so each logical field is looked up
//! under a fixed list of keys. The first key holding a non-null value wins;
//! the canonical name is always listed first.
//!
//! | Field         | Keys, in precedence order |
//! |---------------|---------------------------|
//! | name          | `name` |
//! | description   | `description` |
//! | latitude      | `latitude`, `lat` |
//! | longitude     | `longitude`, `lon` |
//! | submitted by  | `submittedBy`, `submitted_by`, `uploaded_by`, `uploadedBy` |

use gems_core::{
  ValidationError,
  submission::{CoordinateInput, Submission},
};
use serde_json::{Map, Value};

use crate::error::ApiError;

const NAME_KEYS: &[&str] = &["name"];
const DESCRIPTION_KEYS: &[&str] = &["description"];
const LATITUDE_KEYS: &[&str] = &["latitude", "lat"];
const LONGITUDE_KEYS: &[&str] = &["longitude", "lon"];
const SUBMITTER_KEYS: &[&str] =
  &["submittedBy", "submitted_by", "uploaded_by", "uploadedBy"];

pub const INVALID_BODY: &str = "invalid or missing JSON body";

fn first_present<'a>(
  body: &'a Map<String, Value>,
  keys: &[&str],
) -> Option<&'a Value> {
  keys
    .iter()
    .filter_map(|k| body.get(*k))
    .find(|v| !v.is_null())
}

fn text_field(
  body: &Map<String, Value>,
  field: &'static str,
  keys: &[&str],
) -> Result<Option<String>, ValidationError> {
  match first_present(body, keys) {
    None => Ok(None),
    Some(Value::String(s)) => Ok(Some(s.clone())),
    Some(_) => Err(ValidationError::NotText(field)),
  }
}

fn coordinate_field(
  body: &Map<String, Value>,
  keys: &[&str],
) -> Option<CoordinateInput> {
  first_present(body, keys).map(|v| match v {
    Value::Number(n) => CoordinateInput::Number(n.as_f64().unwrap_or(f64::NAN)),
    Value::String(s) => CoordinateInput::Text(s.clone()),
    // Booleans, arrays and objects never parse as degrees.
    other => CoordinateInput::Text(other.to_string()),
  })
}

/// Map a decoded JSON body onto a [`Submission`].
///
/// Anything other than a non-empty object is rejected as an invalid body.
pub fn normalize(body: &Value) -> Result<Submission, ApiError> {
  let body = match body {
    Value::Object(map) if !map.is_empty() => map,
    _ => return Err(ApiError::BadRequest(INVALID_BODY.to_owned())),
  };

  Ok(Submission {
    name:         text_field(body, "name", NAME_KEYS)?,
    description:  text_field(body, "description", DESCRIPTION_KEYS)?,
    latitude:     coordinate_field(body, LATITUDE_KEYS),
    longitude:    coordinate_field(body, LONGITUDE_KEYS),
    submitted_by: text_field(body, "submittedBy", SUBMITTER_KEYS)?,
  })
}
