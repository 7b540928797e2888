//! CLI command implementations.

pub mod label;
pub mod review;
pub mod status;

use std::path::Path;

use briefmark::persistence::snapshot_path;
use briefmark::{input, ReviewConfig, ReviewSession};
use tracing::warn;

/// Load a records file, resuming from its snapshot when one matches.
///
/// Returns the session and whether it was resumed.
pub fn open_session(
    file: &Path,
    config: &ReviewConfig,
    fresh: bool,
) -> briefmark::Result<(ReviewSession, bool)> {
    let (records, source) = input::load_file(file)?;
    let snapshot = snapshot_path(&config.output_dir, &source);

    if !fresh && snapshot.exists() {
        match ReviewSession::load_snapshot(&snapshot) {
            Ok(saved) if saved.source().same_input(&source) => return Ok((saved, true)),
            Ok(_) => warn!(
                snapshot = %snapshot.display(),
                "snapshot was made from different contents, starting over"
            ),
            Err(e) => warn!(snapshot = %snapshot.display(), error = %e, "ignoring unreadable snapshot"),
        }
    }

    Ok((ReviewSession::new(records, source), false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use briefmark::Mark;
    use tempfile::TempDir;

    const CASES: &str = r#"[
        {"description": "one", "short_description": "1"},
        {"description": "two", "short_description": "2"}
    ]"#;

    #[test]
    fn test_open_session_resumes_matching_snapshot() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("cases.json");
        std::fs::write(&file, CASES).unwrap();
        let config = ReviewConfig::new().with_output_dir(dir.path());

        let (mut session, resumed) = open_session(&file, &config, false).unwrap();
        assert!(!resumed);
        session.set_label(Mark::new(3).unwrap()).unwrap();
        session
            .save_snapshot(snapshot_path(dir.path(), session.source()))
            .unwrap();

        let (session, resumed) = open_session(&file, &config, false).unwrap();
        assert!(resumed);
        assert_eq!(session.cursor(), 1);

        let (session, resumed) = open_session(&file, &config, true).unwrap();
        assert!(!resumed);
        assert_eq!(session.labeled_count(), 0);
    }

    #[test]
    fn test_open_session_ignores_stale_snapshot() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("cases.json");
        std::fs::write(&file, CASES).unwrap();
        let config = ReviewConfig::new().with_output_dir(dir.path());

        let (mut session, _) = open_session(&file, &config, false).unwrap();
        session.set_label(Mark::new(3).unwrap()).unwrap();
        session
            .save_snapshot(snapshot_path(dir.path(), session.source()))
            .unwrap();

        std::fs::write(&file, CASES.replace("one", "uno")).unwrap();
        let (session, resumed) = open_session(&file, &config, false).unwrap();
        assert!(!resumed);
        assert_eq!(session.records()[0].description(), "uno");
    }
}
