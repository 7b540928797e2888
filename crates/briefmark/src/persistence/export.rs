//! Export of labeled records.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::info;

use super::write_atomically;
use crate::error::{BriefmarkError, Result};
use crate::record::Record;
use crate::session::ReviewSession;

/// Prefix added to the input file name to form the export name.
pub const EXPORT_PREFIX: &str = "marked_";

const INDENT: &[u8] = b"    ";

/// Export file name for an input named `source_name`.
///
/// # Example
///
/// ```
/// use briefmark::persistence::export_file_name;
///
/// assert_eq!(export_file_name("cases.json"), "marked_cases.json");
/// ```
pub fn export_file_name(source_name: &str) -> String {
    format!("{}{}", EXPORT_PREFIX, source_name)
}

/// Write records as an indented JSON list.
///
/// Non-ASCII text is written as-is rather than escaped.
pub fn write_records<W: Write>(writer: W, records: &[Record]) -> Result<()> {
    let mut serializer = Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
    records.serialize(&mut serializer)?;
    Ok(())
}

/// Serialize a fully marked session to export bytes.
pub fn to_export_bytes(session: &ReviewSession) -> Result<Vec<u8>> {
    ensure_complete(session)?;
    let mut bytes = Vec::new();
    write_records(&mut bytes, session.export())?;
    Ok(bytes)
}

fn ensure_complete(session: &ReviewSession) -> Result<()> {
    if session.all_labeled() {
        Ok(())
    } else {
        Err(BriefmarkError::Incomplete {
            labeled: session.labeled_count(),
            total: session.len(),
        })
    }
}

impl ReviewSession {
    /// Path the export is written to inside `dir`.
    pub fn export_path(&self, dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(export_file_name(&self.source().file))
    }

    /// Write `marked_<input name>` into `dir`.
    ///
    /// Fails with [`BriefmarkError::Incomplete`] while any record is unmarked.
    pub fn save_export(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        ensure_complete(self)?;

        let path = self.export_path(dir);
        write_atomically(&path, |writer| write_records(writer, self.export()))?;

        info!(path = %path.display(), records = self.len(), "wrote export");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_bytes;
    use crate::record::Mark;

    fn marked_session() -> ReviewSession {
        let input = r#"[
            {"description": "Описание дела", "short_description": "Кратко", "id": 1},
            {"description": "Second", "short_description": "2nd"}
        ]"#;
        let (records, source) = parse_bytes("cases.json", input.as_bytes()).unwrap();
        let mut session = ReviewSession::new(records, source);
        session.set_label(Mark::new(4).unwrap()).unwrap();
        session.set_label(Mark::new(2).unwrap()).unwrap();
        session
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("cases.json"), "marked_cases.json");
    }

    #[test]
    fn test_export_format() {
        let bytes = to_export_bytes(&marked_session()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let expected = r#"[
    {
        "description": "Описание дела",
        "short_description": "Кратко",
        "id": 1,
        "mark": 4
    },
    {
        "description": "Second",
        "short_description": "2nd",
        "mark": 2
    }
]"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn test_export_requires_all_marks() {
        let input = r#"[{"description": "a", "short_description": "b"}]"#;
        let (records, source) = parse_bytes("x.json", input.as_bytes()).unwrap();
        let session = ReviewSession::new(records, source);

        let err = to_export_bytes(&session).unwrap_err();
        assert!(matches!(err, BriefmarkError::Incomplete { labeled: 0, total: 1 }));
    }

    #[test]
    fn test_write_records_allows_unmarked() {
        let mut out = Vec::new();
        write_records(&mut out, &[Record::new("a", "b")]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(value[0]["mark"].is_null());
    }
}
