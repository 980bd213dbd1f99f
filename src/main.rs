//! Time Timer - A personal stopwatch service
//!
//! This is the main entry point for the time-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use time_timer::{
    config::Config,
    state::{AppState, TimerAccumulator},
    api::create_router,
    tasks::TICK_PERIOD,
    utils::{shutdown_signal, Clock, SystemClock},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("time_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting time-timer v{}", env!("CARGO_PKG_VERSION"));
    match config.state_path() {
        Some(path) => info!("Persisting today's time to {}", path.display()),
        None => info!("Running in memory; today's time will not be persisted"),
    }
    info!("Configuration: host={}, port={}, save_every={}s",
          config.host, config.port, config.save_every);

    // Load today's total, rolling over if the saved day is stale
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let timer = TimerAccumulator::load(config.build_store(), config.save_every, clock.now());
    let state = AppState::new(timer, clock, TICK_PERIOD, config.host.clone(), config.port);

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /toggle  - Start or pause the timer");
    info!("  POST /reset   - Clear the current session");
    info!("  GET  /status  - Current session and today's total");
    info!("  GET  /events  - Stream of timer snapshots");
    info!("  GET  /health  - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = state.shutdown(config.save_on_exit) {
        tracing::error!("Failed to stop timer cleanly: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
