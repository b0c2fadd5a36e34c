//! Per-request scratch space and the stream that hands a downloaded file to the client.

use bytes::Bytes;
use futures::Stream;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::task::{Context, Poll};
use tempfile::TempDir;
use tokio::fs::File;
use tokio::runtime::Handle;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

/// Size of each body chunk sent to the client.
pub const CHUNK_SIZE: usize = 8 * 1024;

const SCRATCH_PREFIX: &str = "video-gateway-";

/// Extensions recognized as a finished download.
const VIDEO_EXTENSIONS: [&str; 3] = ["mp4", "webm", "mkv"];

/// A uniquely named directory owned by one request. Dropping it removes the
/// directory and everything inside; removal errors are logged and swallowed.
///
/// Inside a tokio runtime the removal runs on the blocking pool, so it may
/// finish shortly after the drop.
#[derive(Debug)]
pub struct ScratchDir {
    dir: Option<TempDir>,
}

impl ScratchDir {
    pub fn create(parent: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX);
        let dir = match parent {
            Some(parent) => builder.tempdir_in(parent)?,
            None => builder.tempdir()?,
        };
        debug!("Created scratch dir {:?}", dir.path());
        Ok(Self { dir: Some(dir) })
    }

    pub fn path(&self) -> &Path {
        match &self.dir {
            Some(dir) => dir.path(),
            None => Path::new(""),
        }
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            match Handle::try_current() {
                Ok(handle) => {
                    handle.spawn_blocking(move || remove_scratch(dir));
                }
                Err(_) => remove_scratch(dir),
            }
        }
    }
}

fn remove_scratch(dir: TempDir) {
    let path = dir.path().to_path_buf();
    match dir.close() {
        Ok(()) => debug!("Removed scratch dir {:?}", path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Scratch dir {:?} already gone", path)
        }
        Err(e) => warn!("Failed to remove scratch dir {:?}: {}", path, e),
    }
}

/// First file in `dir` (by name) carrying a video container extension.
pub async fn find_artifact(dir: &Path) -> io::Result<Option<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut candidates = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_video = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext));
        if is_video && entry.file_type().await?.is_file() {
            candidates.push(path);
        }
    }

    candidates.sort();
    Ok(candidates.into_iter().next())
}

/// Body stream for a downloaded file. Holds the scratch directory so it is
/// removed once the stream finishes or is dropped mid-way by a disconnect.
pub struct ArtifactStream {
    inner: ReaderStream<File>,
    _scratch: ScratchDir,
}

impl ArtifactStream {
    pub fn new(file: File, scratch: ScratchDir) -> Self {
        Self {
            inner: ReaderStream::with_capacity(file, CHUNK_SIZE),
            _scratch: scratch,
        }
    }
}

impl Stream for ArtifactStream {
    type Item = io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

/// A located artifact ready to be streamed.
pub struct PreparedDownload {
    pub filename: String,
    pub content_length: u64,
    pub stream: ArtifactStream,
}
