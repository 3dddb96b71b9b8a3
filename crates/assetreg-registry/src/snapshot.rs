//! # World State Snapshots
//!
//! Persists a `MemoryWorldState` as a single JSON file so a host can run one
//! transaction per process and keep state between runs.
//!
//! ## File Format
//!
//! ```json
//! {"entries":{"asset1":"{\"game_name\":\"Chess\",...}"}}
//! ```
//!
//! Each value is the stored text of one key. The file itself is written
//! through `CanonicalBytes`, so two identical world states always produce
//! byte-identical snapshot files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use assetreg_core::{CanonicalBytes, CanonicalizationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::memory::MemoryWorldState;

/// Error loading or saving a snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Reading, writing or renaming the file failed.
    #[error("snapshot io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a valid snapshot.
    #[error("snapshot at {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A stored value is not UTF-8 and cannot be written as JSON text.
    #[error("value under key {0:?} is not valid UTF-8")]
    NonUtf8Value(String),

    /// Canonical encoding of the snapshot failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SnapshotFile {
    entries: BTreeMap<String, String>,
}

/// Snapshot load/save operations.
pub struct Snapshot;

impl Snapshot {
    /// Load the world state stored at `path`.
    ///
    /// A missing file is an empty world state.
    pub fn load(path: &Path) -> Result<MemoryWorldState, SnapshotError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no snapshot found, starting empty");
            return Ok(MemoryWorldState::new());
        }
        let raw = std::fs::read(path).map_err(io_error(path))?;
        let file: SnapshotFile =
            serde_json::from_slice(&raw).map_err(|source| SnapshotError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let entries = file
            .entries
            .into_iter()
            .map(|(k, v)| (k, v.into_bytes()))
            .collect();
        let state = MemoryWorldState::from_entries(entries);
        tracing::debug!(path = %path.display(), keys = state.len(), "snapshot loaded");
        Ok(state)
    }

    /// Write `state` to `path`.
    ///
    /// The snapshot is written to a sibling `.tmp` file first and then renamed
    /// over `path`, so a crash mid-write leaves the previous snapshot intact.
    /// A failed rename removes the temporary file.
    pub fn save(path: &Path, state: &MemoryWorldState) -> Result<(), SnapshotError> {
        let mut file = SnapshotFile::default();
        for (key, value) in state.entries() {
            let text = String::from_utf8(value).map_err(|_| SnapshotError::NonUtf8Value(key.clone()))?;
            file.entries.insert(key, text);
        }
        let bytes = CanonicalBytes::new(&file)?;

        let tmp = tmp_path(path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
        std::fs::write(&tmp, bytes.as_bytes()).map_err(io_error(&tmp))?;
        if let Err(source) = std::fs::rename(&tmp, path) {
            if let Err(e) = std::fs::remove_file(&tmp) {
                tracing::warn!(path = %tmp.display(), error = %e, "failed to remove temporary snapshot");
            }
            return Err(SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
        tracing::debug!(path = %path.display(), keys = file.entries.len(), "snapshot saved");
        Ok(())
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SnapshotError {
    let path = path.to_path_buf();
    move |source| SnapshotError::Io { path, source }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
