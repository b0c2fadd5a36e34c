//! Format listing for the info endpoint and the selector chain for downloads.

use super::media::MediaFormat;
use serde::Serialize;
use std::fmt;

pub const MAX_LISTED_FORMATS: usize = 5;

/// Container every download is steered towards.
pub const PREFERRED_CONTAINER: &str = "mp4";

/// Either a free-form label (`"1080p"`, `"Best"`) or a bare pixel height.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Quality {
    Height(u32),
    Label(String),
}

impl Quality {
    /// Ordering key: the numeric value when the quality is made of digits only, otherwise 0.
    ///
    /// A label like `"720p"` therefore ranks alongside `"N/A"`, below any numeric height.
    pub fn rank(&self) -> u64 {
        match self {
            Quality::Height(height) => u64::from(*height),
            Quality::Label(label) => {
                if !label.is_empty() && label.chars().all(|c| c.is_ascii_digit()) {
                    label.parse().unwrap_or(0)
                } else {
                    0
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormatOption {
    pub format_id: String,
    pub quality: Quality,
    #[serde(rename = "ext")]
    pub extension: String,
    #[serde(rename = "filesize", skip_serializing_if = "Option::is_none")]
    pub file_size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
}

impl FormatOption {
    /// Placeholder offered when the collaborator listed no video stream at all.
    pub fn best() -> Self {
        Self {
            format_id: String::from("best"),
            quality: Quality::Label(String::from("Best")),
            extension: String::from(PREFERRED_CONTAINER),
            file_size_bytes: None,
            resolution: None,
        }
    }
}

impl From<&MediaFormat> for FormatOption {
    fn from(format: &MediaFormat) -> Self {
        let quality = match (format.format_note.as_deref(), format.height) {
            (Some(note), _) if !note.is_empty() => Quality::Label(note.to_string()),
            (_, Some(height)) => Quality::Height(height),
            _ => Quality::Label(String::from("N/A")),
        };

        let resolution = format.height.map(|height| {
            let width = format
                .width
                .map(|w| w.to_string())
                .unwrap_or_else(|| String::from("?"));
            format!("{}x{}", width, height)
        });

        let file_size_bytes = format
            .filesize
            .filter(|size| *size > 0)
            .or_else(|| format.filesize_approx.map(|size| size as u64));

        Self {
            format_id: format.format_id.clone().unwrap_or_default(),
            quality,
            extension: format
                .ext
                .clone()
                .unwrap_or_else(|| String::from(PREFERRED_CONTAINER)),
            file_size_bytes,
            resolution,
        }
    }
}

/// Video-capable formats, best first, capped at [`MAX_LISTED_FORMATS`].
///
/// The sort is stable so equally ranked formats keep the collaborator's order.
pub fn list_video_formats(formats: &[MediaFormat]) -> Vec<FormatOption> {
    let mut options: Vec<FormatOption> = formats
        .iter()
        .filter(|format| format.has_video())
        .map(FormatOption::from)
        .collect();

    if options.is_empty() {
        return vec![FormatOption::best()];
    }

    options.sort_by(|a, b| b.quality.rank().cmp(&a.quality.rank()));
    options.truncate(MAX_LISTED_FORMATS);
    options
}

/// One alternative in a selector chain, e.g. `best[ext=mp4]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatChoice {
    pub format: String,
    pub ext: Option<String>,
}

impl fmt::Display for FormatChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ext {
            Some(ext) => write!(f, "{}[ext={}]", self.format, ext),
            None => write!(f, "{}", self.format),
        }
    }
}

/// Ordered fallback alternatives, rendered in yt-dlp's `a/b/c` selector syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSelector {
    choices: Vec<FormatChoice>,
}

impl FormatSelector {
    /// `best[ext=<container>]/best`
    pub fn preferring(container: &str) -> Self {
        Self {
            choices: vec![
                FormatChoice {
                    format: String::from("best"),
                    ext: Some(container.to_string()),
                },
                FormatChoice {
                    format: String::from("best"),
                    ext: None,
                },
            ],
        }
    }

    /// `<format_id>[ext=<container>]/<format_id>/best[ext=<container>]/best`
    pub fn fallback_chain(format_id: &str, container: &str) -> Self {
        let mut choices = vec![
            FormatChoice {
                format: format_id.to_string(),
                ext: Some(container.to_string()),
            },
            FormatChoice {
                format: format_id.to_string(),
                ext: None,
            },
        ];
        choices.extend(Self::preferring(container).choices);
        Self { choices }
    }

    pub fn choices(&self) -> &[FormatChoice] {
        &self.choices
    }
}

impl fmt::Display for FormatSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, choice) in self.choices.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", choice)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, note: Option<&str>, height: Option<u32>) -> MediaFormat {
        MediaFormat {
            format_id: Some(id.to_string()),
            format_note: note.map(String::from),
            ext: Some(String::from("mp4")),
            vcodec: Some(String::from("avc1")),
            height,
            width: height.map(|h| h * 16 / 9),
            ..Default::default()
        }
    }

    fn audio(id: &str) -> MediaFormat {
        MediaFormat {
            format_id: Some(id.to_string()),
            ext: Some(String::from("m4a")),
            vcodec: Some(String::from("none")),
            ..Default::default()
        }
    }

    #[test]
    fn test_rank() {
        assert_eq!(Quality::Height(720).rank(), 720);
        assert_eq!(Quality::Label("1080".into()).rank(), 1080);
        assert_eq!(Quality::Label("720p".into()).rank(), 0);
        assert_eq!(Quality::Label("N/A".into()).rank(), 0);
        assert_eq!(Quality::Label("".into()).rank(), 0);
    }

    #[test]
    fn test_audio_only_is_dropped_and_sorted_desc() {
        let formats = vec![
            audio("140"),
            video("18", None, Some(360)),
            video("137", None, Some(1080)),
            audio("251"),
            video("22", None, Some(720)),
        ];

        let listed = list_video_formats(&formats);
        let ids: Vec<&str> = listed.iter().map(|f| f.format_id.as_str()).collect();
        assert_eq!(ids, vec!["137", "22", "18"]);
        assert!(listed.iter().all(|f| f.extension == "mp4"));
    }

    #[test]
    fn test_capped_at_five() {
        let formats: Vec<MediaFormat> = (1..=9)
            .map(|i| video(&i.to_string(), None, Some(i * 100)))
            .collect();

        let listed = list_video_formats(&formats);
        assert_eq!(listed.len(), MAX_LISTED_FORMATS);
        let ranks: Vec<u64> = listed.iter().map(|f| f.quality.rank()).collect();
        assert_eq!(ranks, vec![900, 800, 700, 600, 500]);
    }

    #[test]
    fn test_labels_rank_as_zero_and_keep_order() {
        let formats = vec![
            video("a", Some("720p"), Some(720)),
            video("b", None, Some(240)),
            video("c", Some("1080p"), Some(1080)),
        ];

        let listed = list_video_formats(&formats);
        let ids: Vec<&str> = listed.iter().map(|f| f.format_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_fallback_when_no_video() {
        let listed = list_video_formats(&[audio("140"), audio("251")]);
        assert_eq!(listed, vec![FormatOption::best()]);

        let json = serde_json::to_value(&listed).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"format_id": "best", "quality": "Best", "ext": "mp4"}])
        );

        assert_eq!(list_video_formats(&[]), vec![FormatOption::best()]);
    }

    #[test]
    fn test_format_option_mapping() {
        let format = MediaFormat {
            format_id: Some(String::from("303")),
            ext: Some(String::from("webm")),
            vcodec: Some(String::from("vp9")),
            height: Some(1080),
            width: None,
            filesize: Some(0),
            filesize_approx: Some(1234.7),
            ..Default::default()
        };

        let option = FormatOption::from(&format);
        assert_eq!(option.quality, Quality::Height(1080));
        assert_eq!(option.resolution.as_deref(), Some("?x1080"));
        assert_eq!(option.file_size_bytes, Some(1234));
        assert_eq!(option.extension, "webm");

        let json = serde_json::to_value(&option).unwrap();
        assert_eq!(json["quality"], serde_json::json!(1080));
        assert_eq!(json["filesize"], serde_json::json!(1234));
    }

    #[test]
    fn test_format_option_defaults() {
        let format = MediaFormat {
            vcodec: Some(String::from("avc1")),
            ..Default::default()
        };

        let option = FormatOption::from(&format);
        assert_eq!(option.format_id, "");
        assert_eq!(option.quality, Quality::Label(String::from("N/A")));
        assert_eq!(option.extension, "mp4");
        assert_eq!(option.resolution, None);
        assert_eq!(option.file_size_bytes, None);
    }

    #[test]
    fn test_selectors() {
        assert_eq!(
            FormatSelector::preferring(PREFERRED_CONTAINER).to_string(),
            "best[ext=mp4]/best"
        );
        assert_eq!(
            FormatSelector::fallback_chain("unsupportedformat", PREFERRED_CONTAINER).to_string(),
            "unsupportedformat[ext=mp4]/unsupportedformat/best[ext=mp4]/best"
        );
        assert_eq!(
            FormatSelector::fallback_chain("137", PREFERRED_CONTAINER)
                .choices()
                .len(),
            4
        );
    }
}
