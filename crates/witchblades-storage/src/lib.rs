pub mod config;
pub mod models;
pub mod repository;
pub mod schema;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use thiserror::Error;
use tracing::info;

use witchblades_config::ConfigError;
use witchblades_core::ports::RepoError;

pub use config::StorageConfig;
pub use repository::CatalogSession;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Errors raised while opening the store. Per-request failures use [`RepoError`].
#[derive(Debug, Error)]
pub enum StorageError {
  #[error("config error: {0}")]
  Config(#[from] ConfigError),
  #[error("pool error: {0}")]
  Pool(#[from] PoolError),
  #[error("migration error: {0}")]
  Migration(String),
  #[error("invalid storage option: {0}")]
  InvalidOption(String),
}

/// Pragmas applied to every connection the pool hands out.
#[derive(Debug)]
struct ConnectionOptions {
  journal_mode: Option<String>,
}

impl ConnectionOptions {
  fn new(cfg: &StorageConfig) -> Result<Self, StorageError> {
    if let Some(mode) = cfg.journal_mode.as_ref().filter(|m| !m.chars().all(|c| c.is_ascii_alphabetic())) {
      return Err(StorageError::InvalidOption(format!("journal_mode {mode:?}")));
    }
    Ok(Self { journal_mode: cfg.journal_mode.clone() })
  }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
  fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
    let mut pragmas = String::from("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;");
    if let Some(mode) = &self.journal_mode {
      pragmas.push_str(&format!(" PRAGMA journal_mode = {mode};"));
    }
    conn.batch_execute(&pragmas).map_err(diesel::r2d2::Error::QueryError)
  }
}

/// Persistence context: a connection pool plus the schema it was migrated to.
///
/// Cheap to clone. Each request takes its own [`CatalogSession`] via [`CatalogStore::session`].
#[derive(Clone)]
pub struct CatalogStore {
  pool: SqlitePool,
}

impl CatalogStore {
  /// Opens the store described by the `[storage]` config section.
  pub fn new_from_config() -> Result<Self, StorageError> {
    let cfg = StorageConfig::load()?;
    Self::open(&cfg)
  }

  /// Fresh, migrated in-memory database (one pooled connection, never recycled).
  pub fn in_memory() -> Result<Self, StorageError> {
    Self::open(&StorageConfig::in_memory())
  }

  pub fn open(cfg: &StorageConfig) -> Result<Self, StorageError> {
    let manager = ConnectionManager::<SqliteConnection>::new(&cfg.database_url);
    let mut builder = Pool::builder().connection_customizer(Box::new(ConnectionOptions::new(cfg)?));

    // Every `:memory:` connection is its own database, so memory mode must
    // keep exactly one connection alive for the lifetime of the pool.
    builder = if cfg.is_in_memory() {
      builder.max_size(1).min_idle(Some(1)).idle_timeout(None).max_lifetime(None)
    } else {
      builder.max_size(cfg.pool_size.max(1))
    };

    let pool = builder.build(manager)?;

    {
      let mut conn = pool.get()?;
      let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| StorageError::Migration(e.to_string()))?;
      info!(database = %cfg.database_url, migrations = applied.len(), "catalog store ready");
    }

    Ok(Self { pool })
  }

  /// Checks out a connection for one unit of work.
  pub fn session(&self) -> Result<CatalogSession, RepoError> {
    let conn = self.pool.get().map_err(|e| RepoError::Storage(format!("connection pool: {e}")))?;
    Ok(CatalogSession::new(conn))
  }
}
