//! Duplicate detection for new submissions.
//!
//! A candidate conflicts with an existing gem when it lies within
//! [`DuplicateDetector::max_distance_m`] of it, or when either name contains
//! the other case-insensitively. Records are scanned in the order given and
//! the first match wins; the location test runs before the name test for each
//! record.

use crate::gem::{Coordinates, GemRecord};

/// Mean Earth radius used by the spherical model, in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Default proximity threshold, in metres.
pub const DEFAULT_MAX_DISTANCE_M: f64 = 100.0;

/// Great-circle distance in metres between two positions (haversine).
pub fn haversine_m(from: Coordinates, to: Coordinates) -> f64 {
  let phi1 = from.latitude.to_radians();
  let phi2 = to.latitude.to_radians();
  let delta_phi = (to.latitude - from.latitude).to_radians();
  let delta_lambda = (to.longitude - from.longitude).to_radians();

  let a = (delta_phi / 2.0).sin().powi(2)
    + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
  // Rounding can push `a` a hair past 1 for antipodal points.
  let a = a.clamp(0.0, 1.0);
  let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

  EARTH_RADIUS_M * c
}

/// Case-insensitive substring match in either direction. Empty names never
/// match.
fn names_overlap(candidate: &str, existing: &str) -> bool {
  if candidate.is_empty() || existing.is_empty() {
    return false;
  }
  let candidate = candidate.to_lowercase();
  let existing = existing.to_lowercase();
  candidate.contains(&existing) || existing.contains(&candidate)
}

/// Outcome of [`DuplicateDetector::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuplicateVerdict {
  Clear,
  /// Carries the name of the existing gem that triggered the match.
  ConflictsWith(String),
}

impl DuplicateVerdict {
  pub fn is_clear(&self) -> bool { matches!(self, Self::Clear) }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuplicateDetector {
  /// Candidates at or within this distance of an existing gem are rejected.
  pub max_distance_m: f64,
}

impl Default for DuplicateDetector {
  fn default() -> Self {
    Self { max_distance_m: DEFAULT_MAX_DISTANCE_M }
  }
}

impl DuplicateDetector {
  pub fn new(max_distance_m: f64) -> Self { Self { max_distance_m } }

  /// Scan `existing` for a gem that the candidate would duplicate.
  ///
  /// Callers must pass finite candidate coordinates; existing records with
  /// non-finite coordinates are skipped entirely.
  pub fn check<'a, I>(
    &self,
    name: &str,
    at: Coordinates,
    existing: I,
  ) -> DuplicateVerdict
  where
    I: IntoIterator<Item = &'a GemRecord>,
  {
    for record in existing {
      let there = record.coordinates();
      if !there.is_finite() {
        continue;
      }

      if haversine_m(at, there) <= self.max_distance_m
        || names_overlap(name, &record.name)
      {
        return DuplicateVerdict::ConflictsWith(record.name.clone());
      }
    }

    DuplicateVerdict::Clear
  }
}
