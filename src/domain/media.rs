//! Raw metadata as reported by the extraction collaborator.
//!
//! Every field is optional: extractors for different sites fill in different subsets.

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub extractor: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub formats: Vec<MediaFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaFormat {
    #[serde(default)]
    pub format_id: Option<String>,
    #[serde(default)]
    pub format_note: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
    /// `"none"` marks an audio-only stream.
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub filesize_approx: Option<f64>,
}

impl MediaFormat {
    pub fn has_video(&self) -> bool {
        matches!(self.vcodec.as_deref(), Some(codec) if !codec.is_empty() && codec != "none")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<MediaFormat>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<MediaFormat>>::deserialize(deserializer)?.unwrap_or_default())
}
