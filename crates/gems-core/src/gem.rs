//! Gem records — the single persisted entity of the service.
//!
//! A record is written once on the accept path of a submission and is never
//! updated or deleted afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Submitter recorded when the client does not name one.
pub const ANONYMOUS: &str = "anonymous";

// ─── Status ──────────────────────────────────────────────────────────────────

/// Moderation status of a gem. New records are always [`GemStatus::Pending`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GemStatus {
  #[default]
  Pending,
  Approved,
  Rejected,
  /// A status written by another tool; kept verbatim.
  #[serde(untagged)]
  Other(String),
}

impl GemStatus {
  pub fn as_str(&self) -> &str {
    match self {
      Self::Pending => "pending",
      Self::Approved => "approved",
      Self::Rejected => "rejected",
      Self::Other(s) => s,
    }
  }
}

impl From<&str> for GemStatus {
  fn from(s: &str) -> Self {
    match s {
      "pending" => Self::Pending,
      "approved" => Self::Approved,
      "rejected" => Self::Rejected,
      other => Self::Other(other.to_owned()),
    }
  }
}

// ─── Coordinates ─────────────────────────────────────────────────────────────

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
  pub latitude:  f64,
  pub longitude: f64,
}

impl Coordinates {
  pub fn new(latitude: f64, longitude: f64) -> Self {
    Self { latitude, longitude }
  }

  pub fn is_finite(&self) -> bool {
    self.latitude.is_finite() && self.longitude.is_finite()
  }
}

// ─── GemRecord ───────────────────────────────────────────────────────────────

/// A stored hidden gem. Serialises to the camelCase shape returned by the
/// list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GemRecord {
  pub id:           Uuid,
  pub name:         String,
  pub description:  String,
  pub latitude:     f64,
  pub longitude:    f64,
  pub submitted_by: String,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at:   DateTime<Utc>,
  pub status:       GemStatus,
}

impl GemRecord {
  pub fn coordinates(&self) -> Coordinates {
    Coordinates::new(self.latitude, self.longitude)
  }
}

// ─── NewGem ──────────────────────────────────────────────────────────────────

/// A submission that passed validation. `id`, `created_at` and `status` are
/// assigned by [`NewGem::into_record`], never accepted from callers.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGem {
  pub name:         String,
  pub description:  String,
  pub coordinates:  Coordinates,
  pub submitted_by: String,
}

impl NewGem {
  /// Stamp the gem with a fresh identifier and the current UTC time.
  pub fn into_record(self) -> GemRecord {
    GemRecord {
      id:           Uuid::new_v4(),
      name:         self.name,
      description:  self.description,
      latitude:     self.coordinates.latitude,
      longitude:    self.coordinates.longitude,
      submitted_by: self.submitted_by,
      created_at:   Utc::now(),
      status:       GemStatus::Pending,
    }
  }
}
