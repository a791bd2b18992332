#![recursion_limit = "256"]

pub mod config;
mod db;
pub mod docs;
pub mod dto;
pub mod error;
pub mod logging;
pub mod routes;

use rocket::{Build, Rocket};
use tracing::info;
use witchblades_storage::CatalogStore;

use crate::config::ServerConfig;

/// Assembles the HTTP application around an already opened store.
///
/// Tests hand in `CatalogStore::in_memory()`; the binary opens the configured
/// database. Nothing else is shared between requests.
pub fn build_rocket(store: CatalogStore, server: &ServerConfig) -> Rocket<Build> {
  let figment = rocket::Config::figment().merge(("address", server.address)).merge(("port", server.port));

  let app = rocket::custom(figment)
    .manage(store)
    .mount("/api", routes::api_routes())
    .register("/", error::catchers());

  if server.api_docs {
    info!("api docs enabled at {}", docs::OPENAPI_PATH);
    app.mount("/", docs::routes())
  } else {
    app
  }
}

/// Entry point of the server binary.
pub async fn run() -> anyhow::Result<()> {
  // A missing .env file is fine.
  dotenvy::dotenv().ok();

  // --- Configuration ---
  let server = ServerConfig::load()?;
  logging::init_logging(&server.log_filter)?;

  // --- Persistence ---
  // Opens (and migrates) the database selected by [storage] / DATABASE_URL.
  let store = CatalogStore::new_from_config()?;

  // --- HTTP ---
  info!(address = %server.address, port = server.port, "starting witchblades api");
  build_rocket(store, &server).launch().await?;

  Ok(())
}
