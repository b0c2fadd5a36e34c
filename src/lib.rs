//! video-gateway - HTTP front for a video extraction tool
//!
//! Hexagonal Architecture:
//! - domain/: Request/response models, format ranking, filename rules, errors
//! - ports/: The extraction collaborator trait
//! - adapters/: yt-dlp implementation of the port, axum HTTP surface
//! - application/: Video service and per-request scratch handling
//! - config: Environment configuration
//!
//! # Endpoints
//! - `GET /api/video/info?url=`: metadata and up to five video formats as JSON
//! - `GET /api/video/download?url=&format=`: the video file, streamed as an attachment

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports for convenience
pub use adapters::http::router;
pub use adapters::ytdlp::YtDlp;
pub use application::video_service::VideoService;
pub use config::ServerConfig;
