//! tricks-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) plus `TRICKS_*`
//! environment variables, opens the SQLite store, and serves the JSON API over
//! HTTP.
//!
//! ```text
//! cargo run -p tricks-server -- --config ~/.config/tricks/config.toml
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tricks_core::reference::NamePolicy;
use tricks_server::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "TricksVault API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Override the configured name policy
  /// (`exact`, `trim`, or `case_insensitive`).
  #[arg(long)]
  name_policy: Option<NamePolicy>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration: file, then environment, then flags.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("TRICKS").try_parsing(true))
    .set_override_option("name_policy", cli.name_policy.map(|p| p.to_string()))?
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // A store that cannot be opened is fatal.
  let store = tricks_server::open_store(&server_cfg)
    .await
    .with_context(|| format!("failed to open store at {:?}", server_cfg.store_path))?;

  let app = tricks_server::router(Arc::new(store));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}

async fn shutdown_signal() {
  let _ = tokio::signal::ctrl_c().await;
  tracing::info!("shutdown requested");
}
