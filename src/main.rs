//! Formdeck Server
//!
//! Run with: cargo run --bin formdeck
//!
//! # Configuration
//!
//! Read from `FORMDECK_CONFIG`, `<config dir>/formdeck/config.toml`,
//! `/etc/formdeck/config.toml` or `./config.toml`, then overridden by
//! environment variables:
//! - `FORMDECK_HOST`, `FORMDECK_PORT`: Bind address (default: 0.0.0.0:8080)
//! - `FORMDECK_FORMS_DIR`: Where form files are written (default: ./forms)
//! - `FORMDECK_VALUE_SCOPE`: `global` or `field_scoped` value matching
//! - `FORMDECK_LOG_LEVEL`, `FORMDECK_LOG_FORMAT`: Logging (`pretty` or `json`)
//! - `RUST_LOG`: Takes precedence over the configured level

use anyhow::Context;
use formdeck::config::{Config, LoggingConfig};
use formdeck::index::{ClockIds, FormIndex};
use formdeck::storage::{FormFileStore, TemplateLibrary};
use formdeck::{serve, AppState};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SESSION_PRUNE_INTERVAL: Duration = Duration::from_secs(10 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    init_tracing(&config.logging);

    tracing::info!("Starting Formdeck v{}", env!("CARGO_PKG_VERSION"));

    let files = FormFileStore::new(&config.storage.forms_dir)
        .await
        .with_context(|| format!("cannot open forms directory {}", config.storage.forms_dir))?;
    tracing::info!("Forms directory: {:?}", files.dir());

    let index = FormIndex::with_config(config.index_config(), Arc::new(ClockIds::new()));
    tracing::info!("Value scope: {}", index.config().value_scope);

    let templates = TemplateLibrary::new();
    let loaded = templates
        .load_dir(Path::new(&config.templates.dir))
        .await
        .with_context(|| format!("cannot load templates from {}", config.templates.dir))?;
    tracing::info!("Preloaded {} templates from {}", loaded, config.templates.dir);

    let api_config = config.api_config();
    let state = AppState::new(Arc::new(index), files, Arc::new(templates), api_config.clone());

    let pruning = Arc::clone(&state.sessions).start_pruning(SESSION_PRUNE_INTERVAL);

    serve(state, &api_config).await?;
    pruning.abort();

    tracing::info!("Formdeck stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("formdeck={},tower_http=debug", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
