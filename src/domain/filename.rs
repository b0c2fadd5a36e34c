use super::text::truncate_chars;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

pub const MAX_TITLE_CHARS: usize = 100;
const DEFAULT_STEM: &str = "video";
const DEFAULT_EXTENSION: &str = ".mp4";

fn illegal_chars() -> &'static Regex {
    static ILLEGAL: OnceLock<Regex> = OnceLock::new();
    ILLEGAL.get_or_init(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap())
}

/// Turns a video title into a filename stem safe on every major filesystem.
pub fn sanitize_title(title: &str) -> String {
    let stripped = illegal_chars().replace_all(title, "");
    let trimmed = truncate_chars(&stripped, MAX_TITLE_CHARS).trim();
    if trimmed.is_empty() {
        String::from(DEFAULT_STEM)
    } else {
        trimmed.to_string()
    }
}

/// Name offered to the client: sanitized title plus the artifact's real extension.
pub fn attachment_filename(title: Option<&str>, artifact: &Path) -> String {
    let stem = sanitize_title(title.unwrap_or(DEFAULT_STEM));
    let extension = artifact
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_else(|| String::from(DEFAULT_EXTENSION));
    format!("{}{}", stem, extension)
}
