use super::VideoParams;
use crate::application::video_service::VideoService;
use crate::domain::errors::VideoError;
use crate::domain::video::{VideoInfo, VideoQuery};
use crate::ports::extractor::ExtractionService;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

/// `GET /api/video/info?url=`
pub async fn handle<E>(
    State(service): State<Arc<VideoService<E>>>,
    params: VideoParams,
) -> Result<Json<VideoInfo>, VideoError>
where
    E: ExtractionService + 'static,
{
    let query = VideoQuery::new(params.url, None)?;
    let info = service.info(&query).await?;
    Ok(Json(info))
}
