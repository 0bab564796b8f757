use std::convert::Infallible;
use std::net::SocketAddr;

use log::{error, info, warn};
use warp::{self, Filter};

use quickpair::config::ServerConfig;
use quickpair::constants::WS_PATH;
use quickpair::core::lobby::{create_lobby, SharedLobby};
use quickpair::handlers::websocket::handle_ws_client;

#[tokio::main]
async fn main() {
    // Initialize env
    match dotenvy::dotenv() {
        Ok(_) => info!("Environment variables loaded from .env file"),
        Err(e) => warn!("Failed to load .env file: {}", e),
    };

    // Initialize logging
    env_logger::init();

    // Load config from the environment
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Configuration: host={}, port={}, match_interval={:?}",
        config.host, config.port, config.match_interval
    );

    // Create the shared lobby
    let lobby = create_lobby(config.match_interval);

    // Create WebSocket route
    let ws_route = warp::path(WS_PATH)
        .and(warp::ws())
        .and(with_lobby(lobby.clone()))
        .map(|ws: warp::ws::Ws, lobby| {
            info!("New websocket connection");
            ws.on_upgrade(move |socket| handle_ws_client(socket, lobby))
        });

    // Create health check route
    let health_route = warp::path("health").map(|| "OK");

    // Combine routes
    let routes = ws_route.or(health_route);

    // Build the server address
    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Failed to parse server address: {}", e);
            std::process::exit(1);
        }
    };

    // Start the server
    info!("Starting quickpair server on {}", addr);

    warp::serve(routes).run(addr).await;
}

// Helper function to include the lobby state in requests
fn with_lobby(lobby: SharedLobby) -> impl Filter<Extract = (SharedLobby,), Error = Infallible> + Clone {
    warp::any().map(move || lobby.clone())
}
