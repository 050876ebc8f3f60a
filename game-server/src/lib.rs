use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use warp::Filter;

pub mod config;
pub mod engine;
pub mod scheduler;
pub mod websocket;

use engine::Command;
use websocket::RoomHub;

pub fn create_routes(
    hub: Arc<RoomHub>,
    engine_tx: UnboundedSender<Command>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let hub_filter = warp::any().map({
        let hub = hub.clone();
        move || hub.clone()
    });

    let engine_filter = warp::any().map({
        let engine_tx = engine_tx.clone();
        move || engine_tx.clone()
    });

    // WebSocket endpoint
    let websocket = warp::path("ws")
        .and(warp::ws())
        .and(hub_filter)
        .and(engine_filter)
        .map(|ws: warp::ws::Ws, hub, engine_tx| {
            ws.on_upgrade(move |socket| websocket::handle_connection(socket, hub, engine_tx))
        });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", warp::http::StatusCode::OK));

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST"]);

    websocket
        .or(health)
        .with(cors)
        .with(warp::log("sketch_arena"))
}
