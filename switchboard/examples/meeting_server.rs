use anyhow::Result;
use axum::{Router, routing::get};
use clap::Parser;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing::{Level, info};

use switchboard::model::{IceServerConfig, default_ice_servers};
use switchboard::server::{SignalingConfig, SignalingService, ws_handler};

#[derive(Parser)]
#[command(name = "meeting_server")]
#[command(about = "Group call signaling server")]
struct Args {
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Room size at which new joiners are switched to forwarding mode.
    #[arg(long, default_value_t = 5)]
    sfu_threshold: usize,

    /// STUN/TURN urls handed to clients. Repeatable; defaults to Google STUN.
    #[arg(long = "stun")]
    stun: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let args = Args::parse();

    let ice_servers = if args.stun.is_empty() {
        default_ice_servers()
    } else {
        args.stun.into_iter().map(IceServerConfig::stun).collect()
    };

    let service = SignalingService::new(SignalingConfig {
        sfu_threshold: args.sfu_threshold,
        ice_servers,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Signaling server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
