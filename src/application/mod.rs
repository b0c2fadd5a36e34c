//! Application layer - Services that drive the extraction port.

pub mod artifact;
pub mod video_service;
