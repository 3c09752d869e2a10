use bytes::Bytes;
use futures::Stream;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio_util::io::StreamReader;
use uuid::Uuid;

const FILE_PREFIX: &str = "translated-audio-";
const FILE_EXTENSION: &str = "mp3";

/// Scoped temporary audio file owned by a single request.
///
/// The file is removed by [`TempArtifact::remove`] or, on any other exit
/// path, when the guard is dropped.
#[derive(Debug)]
pub struct TempArtifact {
    path: PathBuf,
    removed: bool,
}

impl TempArtifact {
    /// Create an empty, uniquely named file in `dir`, creating `dir` if absent.
    pub async fn create(dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(dir).await?;

        let path = dir.join(format!("{}{}.{}", FILE_PREFIX, Uuid::new_v4(), FILE_EXTENSION));
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;

        tracing::debug!(path = %path.display(), "Temp artifact created");

        Ok(Self {
            path,
            removed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stream `audio` into the file chunk by chunk.
    ///
    /// Returns once every byte has been written and flushed; the number of
    /// bytes written is returned.
    pub async fn write_stream<S>(&mut self, audio: S) -> io::Result<u64>
    where
        S: Stream<Item = io::Result<Bytes>> + Unpin,
    {
        let mut file = File::create(&self.path).await?;
        let mut reader = StreamReader::new(audio);

        let written = tokio::io::copy(&mut reader, &mut file).await?;
        file.flush().await?;
        file.sync_all().await?;

        tracing::debug!(
            path = %self.path.display(),
            bytes_written = written,
            "Audio stream written to temp artifact"
        );

        Ok(written)
    }

    /// Read the complete file back into memory.
    pub async fn read_all(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path).await
    }

    /// Delete the file now instead of at drop.
    pub async fn remove(mut self) -> io::Result<()> {
        let result = fs::remove_file(&self.path).await;
        // on failure the drop guard makes one more attempt
        self.removed = result.is_ok();
        result
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        if self.removed {
            return;
        }

        // blocking on purpose: drop cannot await, and this only runs when remove() was skipped or failed
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Temp artifact removed on drop")
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove temp artifact"
            ),
        }
    }
}
