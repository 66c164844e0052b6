use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::io::{AsyncRead, AsyncWriteExt};
use tokio::task::JoinHandle;

/// Handle to the directory generated audio is written to and served from
pub struct AudioStore {
    dir: PathBuf,
}

impl AudioStore {
    /// Open the output directory, creating it if needed
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a new file. Fails instead of overwriting an existing one.
    pub async fn write(&self, filename: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let mut reader = bytes;
        self.write_from(filename, &mut reader).await
    }

    /// Stream `reader` into a new file. A file left incomplete by a failed
    /// copy is removed before the error is returned.
    pub async fn write_from<R>(&self, filename: &str, reader: &mut R) -> io::Result<PathBuf>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        if filename.is_empty() || filename.contains(['/', '\\']) || filename.starts_with('.') {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid audio file name: {}", filename),
            ));
        }

        let path = self.dir.join(filename);
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        let written = match tokio::io::copy(reader, &mut file).await {
            Ok(_) => file.flush().await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            drop(file);
            if let Err(remove_err) = tokio::fs::remove_file(&path).await {
                tracing::warn!(
                    path = %path.display(),
                    error = %remove_err,
                    "Failed to remove partially written audio file"
                );
            }
            return Err(e);
        }

        Ok(path)
    }

    /// Delete regular files whose modification time is at least `max_age` ago.
    /// Returns how many files were removed.
    pub async fn sweep_expired(&self, max_age: Duration) -> io::Result<usize> {
        let now = SystemTime::now();
        let mut removed = 0;
        let mut entries = tokio::fs::read_dir(&self.dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let metadata = match entry.metadata().await {
                Ok(metadata) if metadata.is_file() => metadata,
                _ => continue,
            };

            let age = metadata
                .modified()
                .ok()
                .and_then(|modified| now.duration_since(modified).ok())
                .unwrap_or(Duration::ZERO);

            if age >= max_age {
                match tokio::fs::remove_file(entry.path()).await {
                    Ok(()) => removed += 1,
                    Err(e) => tracing::warn!(
                        path = %entry.path().display(),
                        error = %e,
                        "Failed to remove expired audio file"
                    ),
                }
            }
        }

        Ok(removed)
    }
}

/// Periodically evict audio files older than `max_age`
pub fn spawn_retention_task(store: Arc<AudioStore>, max_age: Duration, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval.max(Duration::from_secs(1)));
        loop {
            ticker.tick().await;
            match store.sweep_expired(max_age).await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(
                    removed = removed,
                    max_age_secs = max_age.as_secs(),
                    "Evicted expired audio files"
                ),
                Err(e) => tracing::warn!(error = %e, "Audio retention sweep failed"),
            }
        }
    })
}
