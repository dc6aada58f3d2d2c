use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Errors raised while reading log sources
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("log file not found: {0}")]
    NotFound(PathBuf),

    #[error("not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A log file available for analysis
#[derive(Clone, Debug, Serialize)]
pub struct LogSource {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// Reads log text from the local filesystem
pub struct FsLogReader;

impl FsLogReader {
    /// Read a whole log file as UTF-8 text
    pub fn read(path: impl AsRef<Path>) -> Result<String, ReadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ReadError::NotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(ReadError::NotAFile(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), chars = content.len(), "read log file");
        Ok(content)
    }

    /// List regular files in a datasets directory, sorted by name
    ///
    /// A missing directory is treated as empty.
    pub fn list(dir: impl AsRef<Path>) -> Result<Vec<LogSource>, ReadError> {
        let dir = dir.as_ref();
        if !dir.exists() {
            tracing::debug!(dir = %dir.display(), "datasets directory does not exist");
            return Ok(Vec::new());
        }
        if !dir.is_dir() {
            return Err(ReadError::Io {
                path: dir.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            });
        }

        let entries = fs::read_dir(dir).map_err(|source| ReadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut sources = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "skipping entry without metadata"
                    );
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }

            sources.push(LogSource {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                size_bytes: metadata.len(),
                modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            });
        }

        sources.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sources)
    }
}
