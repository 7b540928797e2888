//! JSON records parser.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use super::source::SourceMetadata;
use crate::error::{BriefmarkError, Result};
use crate::record::{kind_of, Record};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read and parse a records file from disk.
pub fn load_file(path: impl AsRef<Path>) -> Result<(Vec<Record>, SourceMetadata)> {
    let path = path.as_ref();

    let bytes = fs::read(path).map_err(|e| BriefmarkError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (records, source) = parse_bytes(&name, &bytes)?;
    Ok((records, source.with_path(path)))
}

/// Parse uploaded bytes named `name` into unmarked records.
///
/// The input must be a JSON array of objects, each with string fields
/// `description` and `short_description`. Other fields are kept for export.
/// A `mark` already present in the input is dropped.
pub fn parse_bytes(name: &str, bytes: &[u8]) -> Result<(Vec<Record>, SourceMetadata)> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| BriefmarkError::InvalidFormat(format!("not valid JSON: {}", e)))?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(BriefmarkError::InvalidFormat(format!(
                "expected a list of objects, found {}",
                kind_of(&other)
            )));
        }
    };

    if items.is_empty() {
        return Err(BriefmarkError::EmptyData(format!(
            "'{}' contains no records",
            name
        )));
    }

    let records = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| parse_record(index, item))
        .collect::<Result<Vec<_>>>()?;

    debug!(file = name, records = records.len(), "parsed records");

    let source = SourceMetadata::new(name, bytes, records.len());
    Ok((records, source))
}

fn parse_record(index: usize, item: Value) -> Result<Record> {
    let fields = match item {
        Value::Object(fields) => fields.into_iter().collect::<IndexMap<_, _>>(),
        other => {
            return Err(BriefmarkError::InvalidRecord {
                index,
                message: format!("expected an object, found {}", kind_of(&other)),
            });
        }
    };

    Record::from_fields(fields).map_err(|message| BriefmarkError::InvalidRecord { index, message })
}
