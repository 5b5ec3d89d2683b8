//! [`SqliteStore`] — the SQLite implementation of [`GemStore`].

use std::path::Path;

use gems_core::{gem::GemRecord, store::GemStore};
use rusqlite::ffi;

use crate::{
  Error, Result,
  encode::{RawGem, encode_dt, encode_status, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A gem store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Create the table if it does not exist. Safe to call repeatedly.
  pub async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// True only for a clash on the `id` primary key; NOT NULL and other
/// constraint failures are reported as plain database errors.
fn is_primary_key_violation(e: &tokio_rusqlite::Error) -> bool {
  matches!(
    e,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, _))
      if f.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
  )
}

// ─── GemStore impl ───────────────────────────────────────────────────────────

impl GemStore for SqliteStore {
  type Error = Error;

  async fn insert(&self, record: &GemRecord) -> Result<()> {
    let id           = record.id;
    let id_str       = encode_uuid(record.id);
    let name         = record.name.clone();
    let description  = record.description.clone();
    let latitude     = record.latitude;
    let longitude    = record.longitude;
    let submitted_by = record.submitted_by.clone();
    let created_at   = encode_dt(record.created_at);
    let status       = encode_status(&record.status);

    let result = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO hidden_gems (
             id, name, description, latitude, longitude,
             submitted_by, created_at, status
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            name,
            description,
            latitude,
            longitude,
            submitted_by,
            created_at,
            status,
          ],
        )?;
        Ok(())
      })
      .await;

    match result {
      Ok(()) => Ok(()),
      Err(e) if is_primary_key_violation(&e) => Err(Error::DuplicateId(id)),
      Err(e) => Err(e.into()),
    }
  }

  async fn list_all(&self) -> Result<Vec<GemRecord>> {
    let raws: Vec<RawGem> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, description, latitude, longitude,
                  submitted_by, created_at, status
           FROM hidden_gems
           ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawGem {
              id:           row.get(0)?,
              name:         row.get(1)?,
              description:  row.get(2)?,
              latitude:     row.get(3)?,
              longitude:    row.get(4)?,
              submitted_by: row.get(5)?,
              created_at:   row.get(6)?,
              status:       row.get(7)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut records = Vec::with_capacity(raws.len());
    for raw in raws {
      let id = raw.id.clone();
      match raw.into_record()? {
        Some(record) => records.push(record),
        None => tracing::warn!(gem_id = %id, "skipping gem with unreadable coordinates"),
      }
    }
    Ok(records)
  }
}
