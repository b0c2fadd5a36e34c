use crate::domain::formats::{FormatSelector, PREFERRED_CONTAINER};
use crate::domain::media::MediaInfo;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure modes of the extraction collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// The collaborator does not recognize the URL.
    #[error("{0}")]
    UnsupportedSource(String),

    /// The URL was recognized but metadata retrieval or the download failed.
    #[error("{0}")]
    Failed(String),

    /// The collaborator could not be run or produced unreadable output.
    #[error("{0}")]
    Internal(String),
}

/// Settings passed to the collaborator for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub preferred_container: String,
    pub no_playlist: bool,
    pub suppress_diagnostics: bool,
    pub format_selector: FormatSelector,
    /// Container to mux separate audio and video streams into, if merging is needed.
    pub merge_output_format: Option<String>,
}

impl ExtractOptions {
    /// Options for a metadata-only probe.
    pub fn metadata() -> Self {
        Self {
            preferred_container: String::from(PREFERRED_CONTAINER),
            no_playlist: true,
            suppress_diagnostics: true,
            format_selector: FormatSelector::preferring(PREFERRED_CONTAINER),
            merge_output_format: None,
        }
    }

    /// Options for downloading `format_id`, falling back to the best available stream.
    pub fn download(format_id: &str) -> Self {
        Self {
            preferred_container: String::from(PREFERRED_CONTAINER),
            no_playlist: true,
            suppress_diagnostics: true,
            format_selector: FormatSelector::fallback_chain(format_id, PREFERRED_CONTAINER),
            merge_output_format: Some(String::from(PREFERRED_CONTAINER)),
        }
    }
}

/// Where the collaborator writes a download: `<dir>/<title>.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTemplate {
    dir: PathBuf,
}

impl OutputTemplate {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The template in yt-dlp's `%(field)s` syntax.
    pub fn render(&self) -> String {
        self.dir.join("%(title)s.%(ext)s").to_string_lossy().into_owned()
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExtractionService: Send + Sync {
    /// Fetch metadata without downloading any media.
    /// `Ok(None)` means the collaborator completed but reported nothing.
    async fn probe(
        &self,
        url: &str,
        options: &ExtractOptions,
    ) -> Result<Option<MediaInfo>, ExtractError>;

    /// Download (and mux if needed) the media into `output`'s directory.
    async fn fetch(
        &self,
        url: &str,
        options: &ExtractOptions,
        output: &OutputTemplate,
    ) -> Result<Option<MediaInfo>, ExtractError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_options() {
        let options = ExtractOptions::metadata();
        assert!(options.no_playlist);
        assert!(options.suppress_diagnostics);
        assert_eq!(options.format_selector.to_string(), "best[ext=mp4]/best");
        assert_eq!(options.merge_output_format, None);
    }

    #[test]
    fn test_download_options() {
        let options = ExtractOptions::download("137");
        assert_eq!(
            options.format_selector.to_string(),
            "137[ext=mp4]/137/best[ext=mp4]/best"
        );
        assert_eq!(options.merge_output_format.as_deref(), Some("mp4"));
        assert_eq!(options.preferred_container, "mp4");
    }

    #[test]
    fn test_output_template() {
        let template = OutputTemplate::in_dir("/tmp/video-gateway-abc");
        assert_eq!(template.dir(), Path::new("/tmp/video-gateway-abc"));
        assert_eq!(template.render(), "/tmp/video-gateway-abc/%(title)s.%(ext)s");
    }
}
