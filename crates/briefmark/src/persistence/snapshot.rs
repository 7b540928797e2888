//! Session snapshots, so a review can resume after a restart.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::write_atomically;
use crate::error::{BriefmarkError, Result};
use crate::input::SourceMetadata;
use crate::session::ReviewSession;

/// Snapshot path for the input described by `source` inside `dir`.
///
/// The name is `<stem>.<hash>.session.json`, where `<hash>` is the start of
/// the content hash, so different inputs sharing a file name never share a
/// snapshot.
///
/// # Example
///
/// ```
/// use briefmark::SourceMetadata;
/// use briefmark::persistence::snapshot_path;
///
/// let source = SourceMetadata::new("cases.json", b"[]", 0);
/// let path = snapshot_path("out", &source);
/// let expected = format!("out/cases.{}.session.json", source.short_hash());
/// assert_eq!(path.to_string_lossy(), expected);
/// ```
pub fn snapshot_path(dir: impl AsRef<Path>, source: &SourceMetadata) -> PathBuf {
    let stem = Path::new(&source.file)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    dir.as_ref()
        .join(format!("{}.{}.session.json", stem, source.short_hash()))
}

impl ReviewSession {
    /// Save the whole session, marks and cursor included.
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        write_atomically(path, |writer| {
            serde_json::to_writer_pretty(writer, self).map_err(|e| {
                BriefmarkError::Persistence(format!("Failed to serialize session: {}", e))
            })
        })?;

        debug!(path = %path.display(), "saved session snapshot");
        Ok(())
    }

    /// Load a session saved with [`save_snapshot`](Self::save_snapshot).
    ///
    /// The cursor is clamped into range if the file was edited by hand.
    pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| BriefmarkError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let reader = BufReader::new(file);
        let session: ReviewSession = serde_json::from_reader(reader).map_err(|e| {
            BriefmarkError::Persistence(format!(
                "Failed to parse session '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(session)
    }
}
