use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. Rocket logs through the
/// `log` facade; those records are bridged into the same subscriber.
pub fn init_logging(default_filter: &str) -> anyhow::Result<()> {
  let filter = match EnvFilter::try_from_default_env() {
    Ok(filter) => filter,
    Err(_) => EnvFilter::try_new(default_filter)?,
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(true)
    .try_init()
    .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
