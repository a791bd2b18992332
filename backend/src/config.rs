use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use witchblades_config::{CONFIG_BACKEND, ConfigBackend, ConfigError};

/// `[server]` section of `witchblades.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub address: IpAddr,

  pub port: u16,

  /// Serve the OpenAPI document and Swagger UI. On by default in debug builds only.
  pub api_docs: bool,

  /// `tracing` filter used when `RUST_LOG` is not set.
  pub log_filter: String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    ServerConfig {
      address: IpAddr::V4(Ipv4Addr::LOCALHOST),
      port: 8000,
      api_docs: cfg!(debug_assertions),
      log_filter: "info".to_string(),
    }
  }
}

impl ServerConfig {
  pub fn load() -> Result<Self, ConfigError> {
    let cfg = CONFIG_BACKEND.load_section_with_default("server")?;
    CONFIG_BACKEND.save_section("server", &cfg)?;
    Ok(cfg)
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    CONFIG_BACKEND.save_section("server", self)
  }
}
