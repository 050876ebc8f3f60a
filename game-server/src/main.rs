use std::sync::Arc;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::info;

use game_core::GameSession;
use game_server::{config::Config, create_routes, engine::run_engine, websocket::RoomHub};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Sketch Arena server...");

    let config = Config::new();
    let hub = Arc::new(RoomHub::new());

    // The engine owns the session: every client event and timer tick goes
    // through this one queue.
    let (engine_tx, engine_rx) = mpsc::unbounded_channel();
    let session = GameSession::default();
    tokio::spawn(run_engine(
        session,
        hub.clone(),
        engine_tx.clone(),
        engine_rx,
    ));

    let routes = create_routes(hub, engine_tx);

    info!("Server starting on {}:{}", config.host, config.port);

    let addr = (
        config.host.parse::<std::net::IpAddr>().unwrap(),
        config.port,
    );

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt()).unwrap();
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate()).unwrap();

            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    });

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}
