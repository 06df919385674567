//! The snapshot file: one JSON document holding the whole registry, replaced atomically.

use crate::error::{StorageError, StorageErrorExt};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Marker inside temp file names; stale ones are purged on connect.
pub(crate) const TMP_MARKER: &str = ".hbnbtmp.";

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Compression {
    #[default]
    None,
    Lz4,
}

impl Compression {
    #[must_use]
    fn compress(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::None => data.to_vec(),
            Self::Lz4 => lz4_flex::compress_prepend_size(data),
        }
    }

    fn decompress(self, data: Vec<u8>) -> Result<Vec<u8>, StorageError> {
        match self {
            Self::None => Ok(data),
            Self::Lz4 => {
                lz4_flex::decompress_size_prepended(&data).context("Lz4 decompression failed")
            },
        }
    }
}

#[derive(Debug)]
pub(crate) struct SnapshotFile {
    /// Canonical directory holding the snapshot.
    pub(crate) dir: PathBuf,
    pub(crate) path: PathBuf,
    compression: Compression,
    tmp_counter: AtomicU64,
}

impl SnapshotFile {
    pub(crate) fn new(dir: PathBuf, file_name: &str, compression: Compression) -> Self {
        let path = dir.join(file_name);
        Self { dir, path, compression, tmp_counter: AtomicU64::new(1) }
    }

    /// Reads the snapshot; `None` when no snapshot was written yet.
    pub(crate) async fn read(&self) -> Result<Option<Vec<u8>>, StorageError> {
        let data = match fs::read(&self.path).await {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(StorageError::Io {
                    source: err,
                    context: Some(format!("Read failed: {}", self.path.display()).into()),
                });
            },
        };

        self.compression.decompress(data).map(Some)
    }

    /// Replaces the snapshot: unique temp file, `fsync`, rename, then directory sync.
    ///
    /// Readers see either the previous snapshot or the new one, never a partial file.
    pub(crate) async fn write(&self, data: &[u8]) -> Result<(), StorageError> {
        let temp = unique_tmp_path(&self.path, &self.tmp_counter);
        let final_data = self.compression.compress(data);

        {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .await
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(&final_data).await.context("Write failed")?;
            file.sync_all().await.context("Hardware sync failed")?;
        }

        if let Err(err) = fs::rename(&temp, &self.path).await {
            if err.kind() == std::io::ErrorKind::AlreadyExists {
                fs::remove_file(&self.path)
                    .await
                    .context(format!("Failed to replace snapshot: {}", self.path.display()))?;
                fs::rename(&temp, &self.path).await.context(format!(
                    "Atomic swap failed: {} -> {}",
                    temp.display(),
                    self.path.display()
                ))?;
            } else {
                let _ = fs::remove_file(&temp).await;
                return Err(StorageError::Io {
                    source: err,
                    context: Some(
                        format!("Atomic swap failed: {} -> {}", temp.display(), self.path.display())
                            .into(),
                    ),
                });
            }
        }

        sync_dir(&self.dir).await;

        debug!(path = %self.path.display(), bytes = final_data.len(), "Snapshot written atomically");
        Ok(())
    }
}

async fn sync_dir(path: &Path) {
    match fs::File::open(path).await {
        Ok(dir) => {
            if let Err(err) = dir.sync_all().await {
                warn!(path = %path.display(), error = %err, "Directory sync failed");
            }
        },
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Directory open failed");
        },
    }
}

fn unique_tmp_path(target: &Path, counter: &AtomicU64) -> PathBuf {
    let counter = counter.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("snapshot");
    target.with_file_name(format!("{file_name}{TMP_MARKER}{counter}"))
}
