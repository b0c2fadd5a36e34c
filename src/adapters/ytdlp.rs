//! Extraction collaborator backed by the yt-dlp executable.

use crate::domain::media::MediaInfo;
use crate::ports::extractor::{ExtractError, ExtractOptions, ExtractionService, OutputTemplate};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, error, warn};

/// yt-dlp prints this for URLs no extractor claims.
const UNSUPPORTED_URL_MARKER: &str = "Unsupported URL";

#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: PathBuf,
    timeout: Duration,
}

impl YtDlp {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    async fn run(&self, args: Vec<String>) -> Result<Option<MediaInfo>, ExtractError> {
        debug!("Running {:?} {:?}", self.binary, args);

        let mut command = Command::new(&self.binary);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        command.process_group(0);

        let child = command.spawn().map_err(|e| {
            error!("Failed to run {:?}: {}", self.binary, e);
            if e.kind() == ErrorKind::NotFound {
                ExtractError::Internal(format!(
                    "yt-dlp executable not found: {}",
                    self.binary.display()
                ))
            } else {
                ExtractError::Internal(format!("Failed to run yt-dlp: {}", e))
            }
        })?;
        let mut group = ProcessGroup::new(child.id());

        let output = timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                warn!("yt-dlp exceeded {:?}", self.timeout);
                ExtractError::Failed(format!(
                    "yt-dlp timed out after {} seconds",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| {
                error!("Failed to wait for {:?}: {}", self.binary, e);
                ExtractError::Internal(format!("Failed to run yt-dlp: {}", e))
            })?;
        group.release();

        parse_output(output)
    }
}

/// yt-dlp's process group. Unless released after a normal exit, dropping it
/// kills the whole group so ffmpeg merges don't outlive a timeout or a
/// cancelled request.
struct ProcessGroup {
    leader: Option<u32>,
}

impl ProcessGroup {
    fn new(leader: Option<u32>) -> Self {
        Self { leader }
    }

    fn release(&mut self) {
        self.leader = None;
    }
}

impl Drop for ProcessGroup {
    fn drop(&mut self) {
        let Some(leader) = self.leader.take() else {
            return;
        };
        if cfg!(unix) {
            let status = std::process::Command::new("kill")
                .args(["-KILL", "--", &format!("-{}", leader)])
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
            match status {
                Ok(_) => debug!("Killed yt-dlp process group {}", leader),
                Err(e) => warn!("Failed to kill yt-dlp process group {}: {}", leader, e),
            }
        }
    }
}

#[async_trait]
impl ExtractionService for YtDlp {
    async fn probe(
        &self,
        url: &str,
        options: &ExtractOptions,
    ) -> Result<Option<MediaInfo>, ExtractError> {
        self.run(probe_args(url, options)).await
    }

    async fn fetch(
        &self,
        url: &str,
        options: &ExtractOptions,
        output: &OutputTemplate,
    ) -> Result<Option<MediaInfo>, ExtractError> {
        self.run(fetch_args(url, options, output)).await
    }
}

fn common_args(options: &ExtractOptions) -> Vec<String> {
    let mut args = Vec::new();
    if options.suppress_diagnostics {
        args.push(String::from("--quiet"));
        args.push(String::from("--no-warnings"));
    }
    if options.no_playlist {
        args.push(String::from("--no-playlist"));
    }
    args.push(String::from("-f"));
    args.push(options.format_selector.to_string());
    if let Some(container) = &options.merge_output_format {
        args.push(String::from("--merge-output-format"));
        args.push(container.clone());
    }
    args
}

fn probe_args(url: &str, options: &ExtractOptions) -> Vec<String> {
    let mut args = vec![String::from("--dump-json"), String::from("--skip-download")];
    args.extend(common_args(options));
    args.push(String::from("--"));
    args.push(url.to_string());
    args
}

fn fetch_args(url: &str, options: &ExtractOptions, output: &OutputTemplate) -> Vec<String> {
    let mut args = vec![
        String::from("--dump-json"),
        String::from("--no-simulate"),
        String::from("--no-progress"),
        String::from("-o"),
        output.render(),
    ];
    args.extend(common_args(options));
    args.push(String::from("--"));
    args.push(url.to_string());
    args
}

fn parse_output(output: Output) -> Result<Option<MediaInfo>, ExtractError> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!("yt-dlp exited with {}: {}", output.status, stderr.trim());
        return Err(classify_failure(&stderr));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let Some(report) = stdout.lines().map(str::trim).find(|line| !line.is_empty()) else {
        return Ok(None);
    };

    let value: serde_json::Value = serde_json::from_str(report)
        .map_err(|e| ExtractError::Internal(format!("Unreadable yt-dlp report: {}", e)))?;
    if value.is_null() {
        return Ok(None);
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| ExtractError::Internal(format!("Unexpected yt-dlp report: {}", e)))
}

/// yt-dlp only reports failures as text, so unsupported URLs are told apart by their message.
fn classify_failure(stderr: &str) -> ExtractError {
    let message = stderr.trim();
    let message = if message.is_empty() {
        String::from("yt-dlp failed without output")
    } else {
        message.to_string()
    };

    if message.contains(UNSUPPORTED_URL_MARKER) {
        ExtractError::UnsupportedSource(message)
    } else {
        ExtractError::Failed(message)
    }
}
