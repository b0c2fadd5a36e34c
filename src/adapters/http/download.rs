use super::VideoParams;
use crate::application::artifact::PreparedDownload;
use crate::application::video_service::VideoService;
use crate::domain::errors::VideoError;
use crate::domain::video::VideoQuery;
use crate::ports::extractor::ExtractionService;
use axum::body::Body;
use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

/// `GET /api/video/download?url=&format=`
pub async fn handle<E>(
    State(service): State<Arc<VideoService<E>>>,
    params: VideoParams,
) -> Result<Response, VideoError>
where
    E: ExtractionService + 'static,
{
    let query = VideoQuery::new(params.url, params.format)?;
    let prepared = service.download(&query).await?;
    into_response(prepared)
}

fn into_response(prepared: PreparedDownload) -> Result<Response, VideoError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("video/mp4"));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(prepared.content_length));
    headers.insert(
        CONTENT_DISPOSITION,
        content_disposition(&prepared.filename)?,
    );

    Ok((headers, Body::from_stream(prepared.stream)).into_response())
}

/// `attachment; filename="<name>"`, with control characters dropped so the value stays a legal header.
fn content_disposition(filename: &str) -> Result<HeaderValue, VideoError> {
    let filename: String = filename.chars().filter(|c| !c.is_control()).collect();
    let value = format!("attachment; filename=\"{}\"", filename);
    HeaderValue::from_bytes(value.as_bytes())
        .map_err(|e| VideoError::internal(format!("Invalid filename header: {}", e)))
}
