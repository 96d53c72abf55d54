//! Workout Trainer - timed workout sessions over a small HTTP API
//!
//! This is the main entry point for the workout-trainer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use workout_trainer::{
    api::create_router,
    config::Config,
    services::{Catalog, InMemoryWorkoutService},
    state::AppState,
    tasks::spawn_workout_clock,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("workout_trainer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting workout-trainer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms",
          config.host, config.port, config.tick_millis);

    let catalog = match &config.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::seven_minute_workout(),
    };
    let workouts = Arc::new(InMemoryWorkoutService::from_catalog(catalog));

    // Create application state
    let state = Arc::new(AppState::new(
        workouts,
        config.tick_period(),
        config.port,
        config.host.clone(),
    ));

    // Start the workout clock background task
    let clock = spawn_workout_clock(Arc::clone(&state));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /workouts                 - List workouts");
    info!("  GET  /workouts/:name           - Show a workout");
    info!("  GET  /workouts/:name/available - Check a workout name");
    info!("  POST /workouts/:name/start     - Start a workout");
    info!("  GET  /exercises                - List exercises");
    info!("  POST /runner/pause             - Pause the running workout");
    info!("  POST /runner/resume            - Resume the paused workout");
    info!("  POST /runner/toggle            - Toggle pause");
    info!("  POST /runner/stop              - Stop the running workout");
    info!("  GET  /status                   - Runner status");
    info!("  GET  /history                  - Workout history");
    info!("  GET  /health                   - Health check");

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

    clock.abort();
    info!("Server shutdown complete");
    Ok(())
}
