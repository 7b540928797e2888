//! Metadata about the file a session was loaded from.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Metadata about the source records file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path. The export name is derived from it.
    pub file: String,
    /// Full path, when loaded from disk rather than uploaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// SHA-256 hash of the raw input bytes.
    pub hash: String,
    /// Input size in bytes.
    pub size_bytes: u64,
    /// Number of records in the input.
    pub record_count: usize,
    /// When the input was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for input bytes identified by `name`.
    ///
    /// Directory components of `name` are dropped, so an uploaded
    /// `C:\data\cases.json` or `data/cases.json` both become `cases.json`.
    pub fn new(name: &str, bytes: &[u8], record_count: usize) -> Self {
        Self {
            file: file_name_of(name),
            path: None,
            hash: content_hash(bytes),
            size_bytes: bytes.len() as u64,
            record_count,
            loaded_at: Utc::now(),
        }
    }

    /// Record the on-disk location of the input.
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// The first 12 hex digits of the content hash.
    pub fn short_hash(&self) -> &str {
        let hex = self.hash.strip_prefix("sha256:").unwrap_or(&self.hash);
        hex.get(..12).unwrap_or(hex)
    }

    /// Whether two metadata entries describe the same input.
    pub fn same_input(&self, other: &SourceMetadata) -> bool {
        self.hash == other.hash && self.file == other.file
    }
}

/// Hash input bytes as `sha256:<hex>`.
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{:x}", hasher.finalize())
}

fn file_name_of(name: &str) -> String {
    name.rsplit(['/', '\\'])
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(name)
        .to_string()
}
