//! Server binary.
//!
//! Wires up:
//! - Environment configuration
//! - yt-dlp adapter behind the video service
//! - HTTP router with CORS and request tracing

use axum::http::header::CONTENT_DISPOSITION;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use video_gateway::{router, ServerConfig, VideoService, YtDlp};

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env();

    tracing_subscriber::fmt::init();

    // 1. Adapter
    let ytdlp = YtDlp::new(config.ytdlp_path.clone(), config.ytdlp_timeout);

    // 2. Application service
    let service = Arc::new(VideoService::new(ytdlp, config.scratch_dir.clone()));

    // 3. HTTP layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([CONTENT_DISPOSITION]);

    let app = router(service)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // 4. Start server
    let listener = match tokio::net::TcpListener::bind(config.bind_address()).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", config.bind_address(), e);
            std::process::exit(1);
        }
    };
    info!(
        "Listening at {} (yt-dlp: {:?})",
        config.bind_address(),
        config.ytdlp_path
    );

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
