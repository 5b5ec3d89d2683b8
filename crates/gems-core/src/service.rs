//! [`GemService`] — the submission flow over any [`GemStore`].
//!
//! A submission moves through three stages: validation, duplicate checking
//! against a full read of the store, and persistence. Checking and persisting
//! run under a single write lock so that two concurrent submissions for the
//! same spot cannot both observe a clear store and both be accepted. Reads do
//! not take the lock.
//!
//! The lock is per process. Several processes writing one database are not
//! serialised against each other.

use tokio::sync::Mutex;

use crate::{
  Error, Result,
  duplicate::{DuplicateDetector, DuplicateVerdict},
  gem::GemRecord,
  store::GemStore,
  submission::Submission,
};

pub struct GemService<S> {
  store:      S,
  detector:   DuplicateDetector,
  write_lock: Mutex<()>,
}

impl<S: GemStore> GemService<S> {
  pub fn new(store: S, detector: DuplicateDetector) -> Self {
    Self { store, detector, write_lock: Mutex::new(()) }
  }

  pub fn store(&self) -> &S { &self.store }

  /// Validate, check for duplicates, and persist a new pending gem.
  ///
  /// Returns the stored record on success. Validation failures never touch
  /// the store.
  #[tracing::instrument(skip_all)]
  pub async fn submit(&self, submission: Submission) -> Result<GemRecord> {
    let new_gem = submission.validate().inspect_err(|e| {
      tracing::debug!(error = %e, "submission failed validation");
    })?;

    let _guard = self.write_lock.lock().await;

    let existing = self.store.list_all().await.map_err(storage_error)?;
    let verdict =
      self.detector.check(&new_gem.name, new_gem.coordinates, &existing);

    if let DuplicateVerdict::ConflictsWith(existing_name) = verdict {
      tracing::debug!(
        name = %new_gem.name,
        conflicts_with = %existing_name,
        "submission rejected as duplicate"
      );
      return Err(Error::Conflict { existing_name });
    }

    let record = new_gem.into_record();
    self.store.insert(&record).await.map_err(storage_error)?;

    tracing::info!(
      gem_id = %record.id,
      name = %record.name,
      latitude = record.latitude,
      longitude = record.longitude,
      "accepted hidden gem submission"
    );
    Ok(record)
  }

  /// Every stored gem, in store order.
  pub async fn list_all(&self) -> Result<Vec<GemRecord>> {
    self.store.list_all().await.map_err(storage_error)
  }
}

fn storage_error<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  tracing::error!(error = %e, "gem store operation failed");
  Error::Storage(Box::new(e))
}
