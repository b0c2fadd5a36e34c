//! HTTP inbound adapter.
//!
//! Exposes the two video endpoints over axum. The extraction collaborator is
//! injected through the `VideoService` passed to [`router`].

pub mod download;
mod error;
pub mod info;

use crate::application::video_service::VideoService;
use crate::domain::errors::VideoError;
use crate::ports::extractor::ExtractionService;
use async_trait::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tracing::debug;

/// Raw query parameters; validation happens in `VideoQuery::new`.
///
/// A repeated key keeps its first value. Unreadable query strings are turned
/// into a `VideoError` so the caller still gets a JSON error body.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct VideoParams {
    pub url: Option<String>,
    pub format: Option<String>,
}

impl VideoParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "url" => &mut params.url,
                "format" => &mut params.format,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for VideoParams
where
    S: Send + Sync,
{
    type Rejection = VideoError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) =
            Query::<Vec<(String, String)>>::try_from_uri(&parts.uri).map_err(|e| {
                debug!("Unreadable query string {:?}: {}", parts.uri.query(), e);
                VideoError::Validation
            })?;
        Ok(Self::from_pairs(pairs))
    }
}

pub fn router<E>(service: Arc<VideoService<E>>) -> Router
where
    E: ExtractionService + 'static,
{
    Router::new()
        .route("/api/video/info", get(info::handle::<E>))
        .route("/api/video/download", get(download::handle::<E>))
        .with_state(service)
}
