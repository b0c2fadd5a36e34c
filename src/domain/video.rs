use super::errors::VideoError;
use super::formats::{list_video_formats, FormatOption};
use super::media::MediaInfo;
use super::text::truncate_chars;
use serde::Serialize;

pub const MAX_DESCRIPTION_CHARS: usize = 200;
pub const DEFAULT_FORMAT: &str = "best";

/// Validated request parameters shared by both endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoQuery {
    pub url: String,
    pub format: String,
}

impl VideoQuery {
    pub fn new(url: Option<String>, format: Option<String>) -> Result<Self, VideoError> {
        let url = url.filter(|url| !url.is_empty()).ok_or(VideoError::Validation)?;
        let format = format
            .filter(|format| !format.is_empty())
            .unwrap_or_else(|| String::from(DEFAULT_FORMAT));
        Ok(Self { url, format })
    }
}

/// Metadata returned by the info endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoInfo {
    pub title: String,
    #[serde(rename = "thumbnail")]
    pub thumbnail_url: Option<String>,
    #[serde(rename = "duration")]
    pub duration_seconds: f64,
    pub uploader: Option<String>,
    #[serde(rename = "description")]
    pub description_excerpt: String,
    pub formats: Vec<FormatOption>,
    pub platform: String,
}

impl From<MediaInfo> for VideoInfo {
    fn from(info: MediaInfo) -> Self {
        let formats = list_video_formats(&info.formats);
        let description_excerpt = info
            .description
            .as_deref()
            .map(|text| truncate_chars(text, MAX_DESCRIPTION_CHARS).to_string())
            .unwrap_or_default();

        Self {
            title: info.title.unwrap_or_else(|| String::from("Unknown")),
            thumbnail_url: info.thumbnail,
            duration_seconds: info.duration.unwrap_or(0.0),
            uploader: info
                .uploader
                .filter(|name| !name.is_empty())
                .or(info.channel),
            description_excerpt,
            formats,
            platform: info
                .extractor
                .map(|name| name.to_lowercase())
                .unwrap_or_else(|| String::from("unknown")),
        }
    }
}
