use serde::{Deserialize, Serialize};
use witchblades_config::{CONFIG_BACKEND, ConfigBackend, ConfigError, PATHS};

/// Database URL that selects the in-memory store.
pub const IN_MEMORY_URL: &str = ":memory:";

/// Overrides `database_url` for a single run; never written back to the config file.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
  /// SQLite path, or `:memory:`.
  pub database_url: String,

  /// Connections kept by the pool. Ignored in memory mode, which always uses one.
  pub pool_size: u32,

  pub journal_mode: Option<String>,
}

impl Default for StorageConfig {
  fn default() -> Self {
    let db_path = PATHS.data_dir.join("witchblades.db");
    StorageConfig {
      database_url: db_path.to_string_lossy().into_owned(),
      pool_size: 8,
      journal_mode: Some("WAL".to_string()),
    }
  }
}

impl StorageConfig {
  pub fn in_memory() -> Self {
    StorageConfig { database_url: IN_MEMORY_URL.to_string(), pool_size: 1, journal_mode: None }
  }

  pub fn is_in_memory(&self) -> bool {
    self.database_url == IN_MEMORY_URL
  }

  pub fn load() -> Result<Self, ConfigError> {
    let mut cfg: StorageConfig = CONFIG_BACKEND.load_section_with_default("storage")?;
    CONFIG_BACKEND.save_section("storage", &cfg)?;

    if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
      cfg.database_url = url;
    }

    Ok(cfg)
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    CONFIG_BACKEND.save_section("storage", self)
  }
}
