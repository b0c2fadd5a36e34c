//! Configuration loaded from the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_YTDLP_TIMEOUT_SECS: u64 = 600;

/// Configuration for the HTTP server and the yt-dlp collaborator.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// HTTP server bind address
    pub addr: String,
    /// HTTP server port
    pub port: String,
    /// yt-dlp executable, either a bare name resolved through PATH or a full path
    pub ytdlp_path: PathBuf,
    /// Upper bound on a single yt-dlp invocation
    pub ytdlp_timeout: Duration,
    /// Parent directory for per-request scratch directories (OS temp dir when unset)
    pub scratch_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables, reading `.env` first if present.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            addr: env::var("ADDR").unwrap_or_else(|_| String::from("127.0.0.1")),
            port: env::var("PORT").unwrap_or_else(|_| String::from("3000")),
            ytdlp_path: non_empty_var("YTDLP_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("yt-dlp")),
            ytdlp_timeout: Duration::from_secs(
                non_empty_var("YTDLP_TIMEOUT_SECS")
                    .and_then(|secs| secs.parse::<u64>().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_YTDLP_TIMEOUT_SECS),
            ),
            scratch_dir: non_empty_var("SCRATCH_DIR").map(PathBuf::from),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = ServerConfig {
            addr: String::from("0.0.0.0"),
            port: String::from("8080"),
            ytdlp_path: PathBuf::from("yt-dlp"),
            ytdlp_timeout: Duration::from_secs(1),
            scratch_dir: None,
        };
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_missing_var_is_none() {
        assert_eq!(non_empty_var("VIDEO_GATEWAY_SURELY_UNSET_VARIABLE"), None);
    }
}
