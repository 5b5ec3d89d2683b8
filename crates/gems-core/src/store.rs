//! The `GemStore` trait.
//!
//! Implemented by storage backends (e.g. `gems-store-sqlite`). The submission
//! service and the HTTP layer depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::gem::GemRecord;

/// Abstraction over a hidden-gem storage backend.
///
/// The table is insert-only: there is no update or delete. All methods return
/// `Send` futures so the trait can be used in multi-threaded async runtimes
/// (e.g. tokio with `axum`).
pub trait GemStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append one record. Fails if `record.id` is already taken or the
  /// underlying write fails.
  fn insert<'a>(
    &'a self,
    record: &'a GemRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Return every stored record, in insertion order where the backend can
  /// provide it.
  ///
  /// Rows whose coordinates cannot be read as finite numbers are skipped
  /// rather than failing the whole read.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<GemRecord>, Self::Error>> + Send + '_;
}
