//! Writing exports and session snapshots to disk.
//!
//! # Overview
//!
//! ```text
//! out/
//! ├── marked_cases.json               # Export, written once every record is marked
//! └── cases.3f2a9c01b7de.session.json  # Snapshot, rewritten as the review goes
//! ```

mod export;
mod snapshot;

pub use export::{export_file_name, to_export_bytes, write_records};
pub use snapshot::snapshot_path;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{BriefmarkError, Result};

/// Write a file through a uniquely named temporary sibling and rename it into
/// place, so readers never see a half-written file and concurrent writers to
/// the same path never share a temporary.
fn write_atomically(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<&File>) -> Result<()>,
) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if !parent.exists() {
        fs::create_dir_all(parent).map_err(|e| {
            BriefmarkError::Persistence(format!(
                "Failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let tmp = NamedTempFile::new_in(parent).map_err(|e| {
        BriefmarkError::Persistence(format!(
            "Failed to create temporary file in '{}': {}",
            parent.display(),
            e
        ))
    })?;

    let mut writer = BufWriter::new(tmp.as_file());
    write(&mut writer)?;
    writer.flush().map_err(|e| BriefmarkError::Io {
        path: tmp.path().to_path_buf(),
        source: e,
    })?;
    drop(writer);

    tmp.persist(path).map_err(|e| {
        BriefmarkError::Persistence(format!(
            "Failed to move '{}' into place: {}",
            path.display(),
            e.error
        ))
    })?;
    Ok(())
}
