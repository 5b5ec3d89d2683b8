//! Encoding and decoding helpers between the domain types and the plain
//! values stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings, and coordinates as `REAL`.

use chrono::{DateTime, Utc};
use gems_core::gem::{GemRecord, GemStatus};
use rusqlite::types::Value;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── GemStatus ───────────────────────────────────────────────────────────────

pub fn encode_status(s: &GemStatus) -> String { s.as_str().to_owned() }

/// Never fails: statuses this crate does not know are kept as
/// [`GemStatus::Other`].
pub fn decode_status(s: &str) -> GemStatus { GemStatus::from(s) }

// ─── Coordinates ─────────────────────────────────────────────────────────────

/// Read a coordinate column leniently. SQLite column affinity lets rows
/// written by other tools hold integers or text in a `REAL` column; numeric
/// text is accepted, anything else (or a non-finite value) is `None`.
pub fn decode_coordinate(value: &Value) -> Option<f64> {
  let degrees = match value {
    Value::Real(f) => *f,
    Value::Integer(i) => *i as f64,
    Value::Text(s) => s.trim().parse().ok()?,
    Value::Null | Value::Blob(_) => return None,
  };
  degrees.is_finite().then_some(degrees)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `hidden_gems` row.
pub struct RawGem {
  pub id:           String,
  pub name:         String,
  pub description:  String,
  pub latitude:     Value,
  pub longitude:    Value,
  pub submitted_by: String,
  pub created_at:   String,
  pub status:       String,
}

impl RawGem {
  /// Decode the row. `Ok(None)` means the coordinates are unusable and the
  /// row should be skipped.
  pub fn into_record(self) -> Result<Option<GemRecord>> {
    let (Some(latitude), Some(longitude)) = (
      decode_coordinate(&self.latitude),
      decode_coordinate(&self.longitude),
    ) else {
      return Ok(None);
    };

    Ok(Some(GemRecord {
      id: decode_uuid(&self.id)?,
      name: self.name,
      description: self.description,
      latitude,
      longitude,
      submitted_by: self.submitted_by,
      created_at: decode_dt(&self.created_at)?,
      status: decode_status(&self.status),
    }))
  }
}
