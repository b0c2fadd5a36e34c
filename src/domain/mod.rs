//! Domain layer - Request and response models, format ranking, naming rules.

pub mod errors;
pub mod filename;
pub mod formats;
pub mod media;
pub mod text;
pub mod video;
