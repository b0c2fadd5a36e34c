//! Adapters - Concrete implementations of ports and the inbound HTTP surface.

pub mod http;
pub mod ytdlp;
