//! Carousel Autoplay - demo host
//!
//! Runs the autoplay coordinator against an in-memory carousel and exposes
//! its operations over HTTP, the way a UI's interaction layer would call them.

use std::sync::Arc;
use tokio::{net::TcpListener, runtime::Handle};
use tracing::info;

use carousel_autoplay::{
    api::create_router,
    config::Config,
    services::{InMemoryCarousel, TokioTimer, VisibilityFlag},
    state::AppState,
    tasks::Autoplay,
    utils::shutdown_signal,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("carousel_autoplay={},tower_http=info", config.log_level()))
        .init();

    info!("Starting carousel-autoplay v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, items={}, autoplay={}, timeout={}ms",
          config.host, config.port, config.items, config.autoplay, config.timeout_ms);

    let carousel = Arc::new(InMemoryCarousel::new(config.items, config.settings()));
    let timer = Arc::new(TokioTimer::new(Handle::current()));
    let visibility = Arc::new(VisibilityFlag::new());

    let autoplay = Autoplay::builder(carousel.clone(), timer)
        .visibility(visibility.clone())
        .build();
    autoplay.attach();
    carousel.initialize();

    let state = Arc::new(AppState::new(
        carousel,
        Arc::clone(&autoplay),
        visibility,
        config.port,
        config.host.clone(),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /play             - Start or resume autoplay");
    info!("  POST /stop             - Stop autoplay");
    info!("  POST /pause            - Pause autoplay");
    info!("  POST /pointer/enter    - Pointer entered (hover pause)");
    info!("  POST /pointer/leave    - Pointer left (resume)");
    info!("  POST /touch/start      - Touch started (hover pause)");
    info!("  POST /touch/end        - Touch ended (resume)");
    info!("  PUT  /autoplay/stopped - Suspend autoplay indefinitely");
    info!("  POST /settings         - Patch carousel settings");
    info!("  POST /resize           - Resize the carousel");
    info!("  POST /visibility       - Hide or show the carousel");
    info!("  POST /interacting      - Start or finish a drag");
    info!("  GET  /status           - Carousel and autoplay status");
    info!("  GET  /health           - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Failed to listen for shutdown signals: {}", e),
            }
        }
    }

    autoplay.teardown();
    info!("Server shutdown complete");
    Ok(())
}
