//! HTTP server assembly for the hidden-gems service.
//!
//! Loads [`ServerConfig`], opens the SQLite store, and wraps the
//! [`gems_api`] router in request tracing.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::Router;
use gems_core::{
  duplicate::{DEFAULT_MAX_DISTANCE_M, DuplicateDetector},
  service::GemService,
  store::GemStore,
};
use gems_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `GEMS_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:               String,
  #[serde(default = "default_port")]
  pub port:               u16,
  #[serde(default = "default_store_path")]
  pub store_path:         PathBuf,
  /// Submissions within this many metres of an existing gem are rejected.
  #[serde(default = "default_duplicate_radius_m")]
  pub duplicate_radius_m: f64,
}

fn default_host() -> String { "0.0.0.0".to_owned() }

fn default_port() -> u16 { 5000 }

fn default_store_path() -> PathBuf { PathBuf::from("gems.db") }

fn default_duplicate_radius_m() -> f64 { DEFAULT_MAX_DISTANCE_M }

impl ServerConfig {
  /// Read `path` (optional) layered under `GEMS_*` environment variables.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    Self::layered(
      config::File::from(path).required(false),
      config::Environment::with_prefix("GEMS"),
    )
  }

  /// Environment values override the file. Numeric variables such as
  /// `GEMS_PORT` are parsed rather than kept as strings.
  fn layered<F>(file: F, env: config::Environment) -> anyhow::Result<Self>
  where
    F: config::Source + Send + Sync + 'static,
  {
    let settings = config::Config::builder()
      .add_source(file)
      .add_source(env.try_parsing(true))
      .build()
      .context("failed to read configuration")?;
    Self::from_settings(settings)
  }

  fn from_settings(settings: config::Config) -> anyhow::Result<Self> {
    let cfg: ServerConfig = settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")?;
    anyhow::ensure!(
      cfg.duplicate_radius_m.is_finite() && cfg.duplicate_radius_m >= 0.0,
      "duplicate_radius_m must be a non-negative number, got {}",
      cfg.duplicate_radius_m
    );
    Ok(cfg)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Assembly ─────────────────────────────────────────────────────────────────

/// Open the configured store and wrap it in a [`GemService`].
pub async fn open_service(
  cfg: &ServerConfig,
) -> anyhow::Result<Arc<GemService<SqliteStore>>> {
  let store_path = expand_tilde(&cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  tracing::info!(
    store = %store_path.display(),
    duplicate_radius_m = cfg.duplicate_radius_m,
    "gem store ready"
  );
  Ok(Arc::new(GemService::new(
    store,
    DuplicateDetector::new(cfg.duplicate_radius_m),
  )))
}

/// Build the full application router with HTTP request tracing.
pub fn router<S>(service: Arc<GemService<S>>) -> Router
where
  S: GemStore + 'static,
{
  gems_api::api_router(service).layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
