//! Application entry point for the `silent-watch` backend service.
//!
//! This binary orchestrates the full startup sequence:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Connecting the selected store (creating the Postgres schema if needed)
//! - Spawning the dashboard poller
//! - Mounting all API routes via the `routes` gateway (EMBP pattern)
//! - Serving until Ctrl+C / SIGTERM, then stopping the poller
//!
//! # Environment Variables
//! See [`silent_watch::config::load_from_env`] for the store and operator
//! settings. Logging is controlled by:
//! - `AXUM_LOG_LEVEL` (optional) – log verbosity (default: `debug`)
//! - `AXUM_SPAN_EVENTS` (optional) – span event mode for tracing
//! - `FORCE_COLOR` (optional) – override TTY colour detection
use std::{env, sync::Arc};

use anyhow::{anyhow, Result};
use axum::Router;
use dotenvy::dotenv;
use is_terminal::IsTerminal;
use sqlx::postgres::PgPoolOptions;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use silent_watch::config::{self, mask_db_url};
use silent_watch::{
    routes, schema, AppState, Config, MemoryStore, PgStore, Poller, ReadingGenerator, RestStore,
    SensorStore, StoreBackend,
};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    init_tracing();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let store = connect_store(&cfg).await?;
    let state = AppState::new(
        store,
        cfg.principal(),
        ReadingGenerator::new(cfg.sensor_location.clone()),
    );

    let cancel = CancellationToken::new();
    let poller = Poller::new(
        Arc::clone(&state.store),
        state.principal.clone(),
        state.snapshot.clone(),
        cfg.poll_interval,
    )
    .spawn(cancel.clone());

    // Build app from routes gateway (EMBP)
    let app: Router = routes::router(state);

    tracing::info!("Listening on {}", cfg.bind_addr);

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cancel.cancel();
    poller.await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

// ---

/// Build the store selected by `STORE_BACKEND`.
async fn connect_store(cfg: &Config) -> Result<Arc<dyn SensorStore>> {
    // ---
    match &cfg.backend {
        StoreBackend::Postgres {
            db_url,
            db_pool_max,
        } => {
            let masked = mask_db_url(db_url);
            tracing::info!("Attempting to connect to database: {}", masked);

            let pool = PgPoolOptions::new()
                .max_connections(*db_pool_max)
                .connect(db_url)
                .await
                .map_err(|e| anyhow!("Failed to connect to database '{}': {}", masked, e))?;

            tracing::info!("Successfully connected to database");

            schema::create_schema(&pool).await?;
            Ok(Arc::new(PgStore::new(pool)))
        }
        StoreBackend::Supabase {
            url,
            anon_key,
            access_token,
        } => {
            tracing::info!("Using Supabase REST store at {}", url);
            Ok(Arc::new(RestStore::new(
                url,
                anon_key,
                access_token.as_deref(),
            )))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; readings and alerts are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    // ---
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

/// Initialize the global tracing subscriber for structured logging.
///
/// This function configures the [`tracing_subscriber`] with:
/// - Log target, file, and line number output enabled
/// - Color output controlled by TTY detection and `FORCE_COLOR` env var:
///   - `FORCE_COLOR=1|true|yes`: force colors on
///   - `FORCE_COLOR=0|false|no`: force colors off
///   - unset or other values: auto-detect TTY
/// - Span event emission mode controlled by the `AXUM_SPAN_EVENTS` env var:
///   - `"full"`       : emit ENTER, EXIT, and CLOSE events with timing
///   - `"enter_exit"` : emit ENTER and EXIT only
///   - unset or other values: emit CLOSE events only (default)
/// - Log level controlled by `RUST_LOG`, falling back to `AXUM_LOG_LEVEL`
///
/// Call once at startup before any logging macros run.
fn init_tracing() {
    // ---
    let span_events = match env::var("AXUM_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stdout().is_terminal(),
    };

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("AXUM_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("warn") => "warn",
            Some("error") => "error",
            _ => "debug",
        };
        EnvFilter::new(format!("{level},sqlx::query=warn,hyper=info,reqwest=info"))
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
