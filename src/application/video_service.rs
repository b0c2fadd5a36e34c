use super::artifact::{find_artifact, ArtifactStream, PreparedDownload, ScratchDir};
use crate::domain::errors::VideoError;
use crate::domain::filename::attachment_filename;
use crate::domain::video::{VideoInfo, VideoQuery};
use crate::ports::extractor::{ExtractOptions, ExtractionService, OutputTemplate};
use std::path::PathBuf;
use tracing::{info, warn};

/// Runs both video operations against an injected extraction collaborator.
pub struct VideoService<E> {
    extractor: E,
    scratch_root: Option<PathBuf>,
}

impl<E> VideoService<E>
where
    E: ExtractionService,
{
    pub fn new(extractor: E, scratch_root: Option<PathBuf>) -> Self {
        Self {
            extractor,
            scratch_root,
        }
    }

    pub async fn info(&self, query: &VideoQuery) -> Result<VideoInfo, VideoError> {
        info!("Probing {}", query.url);

        let media = self
            .extractor
            .probe(&query.url, &ExtractOptions::metadata())
            .await?
            .ok_or(VideoError::EmptyResult("Could not extract video info"))?;

        Ok(VideoInfo::from(media))
    }

    /// Downloads into a fresh scratch directory and opens the result for streaming.
    ///
    /// The scratch directory travels with the returned stream; on any error it is
    /// dropped (and removed) before this returns.
    pub async fn download(&self, query: &VideoQuery) -> Result<PreparedDownload, VideoError> {
        let scratch = ScratchDir::create(self.scratch_root.as_deref())?;
        let output = OutputTemplate::in_dir(scratch.path());
        let options = ExtractOptions::download(&query.format);

        info!(
            "Downloading {} with format {} into {:?}",
            query.url,
            options.format_selector,
            scratch.path()
        );

        let media = self
            .extractor
            .fetch(&query.url, &options, &output)
            .await?
            .ok_or(VideoError::EmptyResult("Could not download video"))?;

        let Some(artifact) = find_artifact(scratch.path()).await? else {
            warn!("No video file in {:?} after download", scratch.path());
            return Err(VideoError::ArtifactMissing);
        };

        let filename = attachment_filename(media.title.as_deref(), &artifact);
        let file = tokio::fs::File::open(&artifact).await?;
        let content_length = file.metadata().await?.len();

        info!("Streaming {:?} as {:?} ({} bytes)", artifact, filename, content_length);

        Ok(PreparedDownload {
            filename,
            content_length,
            stream: ArtifactStream::new(file, scratch),
        })
    }
}
