mod backend;
mod io;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use io::atomic_write_str;
pub use paths::{BASE_DIR_ENV, CatalogPaths, ConfigError};

use once_cell::sync::Lazy;

/// Process-wide paths, resolved once (portable base dir or platform dirs).
pub static PATHS: Lazy<CatalogPaths> = Lazy::new(|| CatalogPaths::detect().expect("failed to init CatalogPaths"));

/// Process-wide config backend over `PATHS.config_file()`.
pub static CONFIG_BACKEND: Lazy<TomlConfigBackend> = Lazy::new(|| TomlConfigBackend::new(PATHS.clone()));
