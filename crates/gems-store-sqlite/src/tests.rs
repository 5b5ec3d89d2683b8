//! Integration tests for `SqliteStore` and the submission flow against an
//! in-memory database.

use std::sync::Arc;

use gems_core::{
  Error as CoreError, ValidationError,
  duplicate::DuplicateDetector,
  gem::{Coordinates, GemStatus, NewGem},
  service::GemService,
  store::GemStore,
  submission::{CoordinateInput, Submission},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn service() -> GemService<SqliteStore> {
  GemService::new(store().await, DuplicateDetector::default())
}

fn new_gem(name: &str, latitude: f64, longitude: f64) -> NewGem {
  NewGem {
    name:         name.into(),
    description:  format!("{name}, worth the detour"),
    coordinates:  Coordinates::new(latitude, longitude),
    submitted_by: "anonymous".into(),
  }
}

fn submission(name: &str, latitude: f64, longitude: f64) -> Submission {
  Submission {
    name:         Some(name.into()),
    description:  Some(format!("{name}, worth the detour")),
    latitude:     Some(CoordinateInput::Number(latitude)),
    longitude:    Some(CoordinateInput::Number(longitude)),
    submitted_by: None,
  }
}

/// Write a row bypassing the domain types, as an external tool might.
async fn insert_raw(s: &SqliteStore, id: &str, name: &str, latitude: &str) {
  let id = id.to_owned();
  let name = name.to_owned();
  let latitude = latitude.to_owned();
  s.conn
    .call(move |conn| {
      conn.execute(
        "INSERT INTO hidden_gems
           (id, name, description, latitude, longitude, submitted_by, created_at, status)
         VALUES (?1, ?2, 'raw', ?3, 20.0, 'tool', '2024-01-01T00:00:00+00:00', 'pending')",
        rusqlite::params![id, name, latitude],
      )?;
      Ok(())
    })
    .await
    .unwrap();
}

// ─── Store ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn init_schema_is_idempotent() {
  let s = store().await;
  s.insert(&new_gem("Old Mill", 30.0, 40.0).into_record()).await.unwrap();

  s.init_schema().await.unwrap();
  s.init_schema().await.unwrap();

  assert_eq!(s.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn empty_store_lists_nothing() {
  let s = store().await;
  assert!(s.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn insert_and_list_roundtrip() {
  let s = store().await;
  let mut record = new_gem("Secret Falls", 10.0, 20.0).into_record();
  record.submitted_by = "mira".into();

  s.insert(&record).await.unwrap();

  let all = s.list_all().await.unwrap();
  assert_eq!(all, vec![record]);
}

#[tokio::test]
async fn list_all_preserves_insertion_order() {
  let s = store().await;
  let names = ["Zeta Cove", "Alpha Ridge", "Mid Spring"];
  for (i, name) in names.iter().enumerate() {
    let record = new_gem(name, i as f64, i as f64).into_record();
    s.insert(&record).await.unwrap();
  }

  let listed: Vec<String> =
    s.list_all().await.unwrap().into_iter().map(|g| g.name).collect();
  assert_eq!(listed, names);
}

#[tokio::test]
async fn duplicate_id_is_rejected() {
  let s = store().await;
  let record = new_gem("Old Mill", 30.0, 40.0).into_record();
  s.insert(&record).await.unwrap();

  let mut clash = new_gem("Other", -10.0, -10.0).into_record();
  clash.id = record.id;
  let err = s.insert(&clash).await.unwrap_err();
  assert!(matches!(err, Error::DuplicateId(id) if id == record.id));

  assert_eq!(s.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn non_pending_status_roundtrips() {
  let s = store().await;
  let mut record = new_gem("Old Mill", 30.0, 40.0).into_record();
  record.status = GemStatus::Approved;
  s.insert(&record).await.unwrap();

  assert_eq!(s.list_all().await.unwrap()[0].status, GemStatus::Approved);
}

#[tokio::test]
async fn not_null_failure_is_not_reported_as_duplicate_id() {
  let s = store().await;
  // NaN binds as NULL and trips the NOT NULL constraint on `latitude`.
  let mut record = new_gem("Nowhere", 0.0, 0.0).into_record();
  record.latitude = f64::NAN;

  let err = s.insert(&record).await.unwrap_err();
  assert!(matches!(err, Error::Database(_)), "got {err:?}");
  assert!(s.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn unrecognised_status_is_read_back_verbatim() {
  let s = store().await;
  s.conn
    .call(|conn| {
      conn.execute(
        "INSERT INTO hidden_gems
           (id, name, description, latitude, longitude, submitted_by, created_at, status)
         VALUES ('8b3e3e0a-4f9c-4e3a-9c5d-2f7a3b4c5d6e', 'Flagged Spot', 'raw',
                 -50.0, -50.0, 'moderator', '2024-01-01T00:00:00+00:00', 'flagged')",
        [],
      )?;
      Ok(())
    })
    .await
    .unwrap();

  let all = s.list_all().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].status, GemStatus::Other("flagged".into()));

  let svc = GemService::new(s, DuplicateDetector::default());
  let accepted = svc.submit(submission("Unrelated Spot", 10.0, 20.0)).await.unwrap();
  assert_eq!(accepted.status, GemStatus::Pending);
  assert_eq!(svc.list_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn malformed_coordinates_are_skipped_on_read() {
  let s = store().await;
  insert_raw(&s, "6f1c1c8e-2d7a-4c1e-9a3b-0d5e1f2a3b4c", "Broken", "not-a-number").await;
  insert_raw(&s, "7a2d2d9f-3e8b-4d2f-8b4c-1e6f2a3b4c5d", "Texty", "12.5").await;
  s.insert(&new_gem("Old Mill", 30.0, 40.0).into_record()).await.unwrap();

  let all = s.list_all().await.unwrap();
  let names: Vec<&str> = all.iter().map(|g| g.name.as_str()).collect();
  assert_eq!(names, ["Texty", "Old Mill"]);
  assert_eq!(all[0].latitude, 12.5);
}

// ─── Submission flow ─────────────────────────────────────────────────────────

#[tokio::test]
async fn brand_new_spot_is_accepted_and_listed() {
  let svc = service().await;

  let accepted = svc.submit(submission("Brand New Spot", 0.0, 0.0)).await.unwrap();
  assert_eq!(accepted.status, GemStatus::Pending);
  assert_eq!(accepted.submitted_by, "anonymous");

  let all = svc.list_all().await.unwrap();
  assert_eq!(all.len(), 1);
  let listed = &all[0];
  assert_eq!(listed, &accepted);
  assert_eq!(listed.name, "Brand New Spot");
  assert_eq!(listed.description, "Brand New Spot, worth the detour");
  assert_eq!((listed.latitude, listed.longitude), (0.0, 0.0));
  assert_eq!(listed.status, GemStatus::Pending);
}

#[tokio::test]
async fn secret_fall_is_rejected_as_secret_falls() {
  let svc = service().await;
  svc.submit(submission("Secret Falls", 10.0, 20.0)).await.unwrap();
  svc.submit(submission("Old Mill", 30.0, 40.0)).await.unwrap();

  let err = svc
    .submit(submission("Secret Fall", 10.0001, 20.0001))
    .await
    .unwrap_err();
  assert!(
    matches!(&err, CoreError::Conflict { existing_name } if existing_name == "Secret Falls"),
    "got {err:?}"
  );
  assert_eq!(svc.list_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn similar_name_far_away_is_rejected() {
  let svc = service().await;
  svc.submit(submission("Old Mill", 30.0, 40.0)).await.unwrap();

  let err = svc.submit(submission("the old mill", -30.0, -40.0)).await.unwrap_err();
  assert!(matches!(err, CoreError::Conflict { existing_name } if existing_name == "Old Mill"));
}

#[tokio::test]
async fn distinct_gems_are_all_accepted() {
  let svc = service().await;
  svc.submit(submission("Secret Falls", 10.0, 20.0)).await.unwrap();
  svc.submit(submission("Old Mill", 30.0, 40.0)).await.unwrap();
  svc.submit(submission("Hidden Cove", 10.01, 20.0)).await.unwrap();

  assert_eq!(svc.list_all().await.unwrap().len(), 3);
}

#[tokio::test]
async fn validation_failure_does_not_write() {
  let svc = service().await;

  let mut missing = submission("Nameless", 1.0, 1.0);
  missing.description = None;
  let err = svc.submit(missing).await.unwrap_err();
  assert!(matches!(
    err,
    CoreError::Validation(ValidationError::MissingFields(ref f)) if f == &["description"]
  ));

  let mut bad = submission("Bad Coords", 1.0, 1.0);
  bad.latitude = Some(CoordinateInput::Text("north-ish".into()));
  let err = svc.submit(bad).await.unwrap_err();
  assert!(matches!(
    err,
    CoreError::Validation(ValidationError::NonNumericCoordinates)
  ));

  assert!(svc.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn configured_radius_is_honoured() {
  let svc = GemService::new(store().await, DuplicateDetector::new(5_000.0));
  svc.submit(submission("Lighthouse", 0.0, 0.0)).await.unwrap();

  // ~1.1 km away: clear under the default radius, a duplicate here.
  let err = svc.submit(submission("Tide Pools", 0.01, 0.0)).await.unwrap_err();
  assert!(matches!(err, CoreError::Conflict { .. }));
}

#[tokio::test]
async fn malformed_rows_neither_cause_nor_block_matches() {
  let svc = service().await;
  insert_raw(
    svc.store(),
    "8b3e3e0a-4f9c-4e3a-9c5d-2f7a3b4c5d6e",
    "Secret Falls",
    "garbage",
  )
  .await;

  svc.submit(submission("Secret Falls", 10.0, 20.0)).await.unwrap();
  let names: Vec<String> =
    svc.list_all().await.unwrap().into_iter().map(|g| g.name).collect();
  assert_eq!(names, ["Secret Falls"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicates_accept_exactly_one() {
  let svc = Arc::new(service().await);

  let handles: Vec<_> = (0..8)
    .map(|i| {
      let svc = Arc::clone(&svc);
      tokio::spawn(async move {
        svc.submit(submission(&format!("Spot {i}"), 45.0, 7.0)).await
      })
    })
    .collect();

  let mut accepted = 0;
  let mut conflicts = 0;
  for handle in handles {
    match handle.await.unwrap() {
      Ok(_) => accepted += 1,
      Err(CoreError::Conflict { .. }) => conflicts += 1,
      Err(e) => panic!("unexpected error: {e}"),
    }
  }

  assert_eq!(accepted, 1);
  assert_eq!(conflicts, 7);
  assert_eq!(svc.list_all().await.unwrap().len(), 1);
}
