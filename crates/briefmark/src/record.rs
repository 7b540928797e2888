//! Records under review and the marks assigned to them.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BriefmarkError;

/// A quality score on the 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Mark(u8);

impl Mark {
    /// Lowest score.
    pub const MIN: Mark = Mark(1);
    /// Highest score.
    pub const MAX: Mark = Mark(5);

    /// Create a mark, returning `None` outside 1-5.
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&value)
            .then_some(Self(value))
    }

    /// Every mark in ascending order.
    pub fn all() -> impl Iterator<Item = Mark> {
        (Self::MIN.0..=Self::MAX.0).map(Mark)
    }

    /// The numeric score.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Mark {
    type Error = BriefmarkError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Mark::new)
            .ok_or(BriefmarkError::InvalidMark(value))
    }
}

impl TryFrom<u8> for Mark {
    type Error = BriefmarkError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Mark::new(value).ok_or(BriefmarkError::InvalidMark(i64::from(value)))
    }
}

impl From<Mark> for u8 {
    fn from(mark: Mark) -> Self {
        mark.0
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub(crate) const DESCRIPTION: &str = "description";
pub(crate) const SHORT_DESCRIPTION: &str = "short_description";
pub(crate) const MARK: &str = "mark";

/// One unit of review work.
///
/// Every field of the input object except `mark` is kept in `fields`, in
/// input order, and written back in that order on export with `mark`
/// appended. `description` and `short_description` are always strings and
/// never change after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredRecord")]
pub struct Record {
    #[serde(flatten)]
    fields: IndexMap<String, Value>,
    mark: Option<Mark>,
}

#[derive(Deserialize)]
struct StoredRecord {
    #[serde(flatten)]
    fields: IndexMap<String, Value>,
    #[serde(default)]
    mark: Option<Mark>,
}

impl TryFrom<StoredRecord> for Record {
    type Error = BriefmarkError;

    fn try_from(stored: StoredRecord) -> Result<Self, Self::Error> {
        let mut record =
            Record::from_fields(stored.fields).map_err(BriefmarkError::InvalidFormat)?;
        record.mark = stored.mark;
        Ok(record)
    }
}

impl Record {
    /// Create an unmarked record.
    pub fn new(description: impl Into<String>, short_description: impl Into<String>) -> Self {
        let mut fields = IndexMap::new();
        fields.insert(DESCRIPTION.to_string(), Value::String(description.into()));
        fields.insert(SHORT_DESCRIPTION.to_string(), Value::String(short_description.into()));
        Self { fields, mark: None }
    }

    /// Build an unmarked record from an input object's fields.
    ///
    /// Fails with a message when either text field is missing or not a string.
    /// A `mark` among `fields` is dropped.
    pub fn from_fields(mut fields: IndexMap<String, Value>) -> Result<Self, String> {
        fields.shift_remove(MARK);

        for key in [DESCRIPTION, SHORT_DESCRIPTION] {
            match fields.get(key) {
                Some(Value::String(_)) => {}
                Some(other) => {
                    return Err(format!(
                        "field '{}' must be text, found {}",
                        key,
                        kind_of(other)
                    ));
                }
                None => return Err(format!("missing field '{}'", key)),
            }
        }

        Ok(Self { fields, mark: None })
    }

    /// Append fields that should round-trip through export.
    ///
    /// The text fields and `mark` cannot be replaced this way.
    pub fn with_extra(mut self, extra: IndexMap<String, Value>) -> Self {
        for (key, value) in extra {
            if ![DESCRIPTION, SHORT_DESCRIPTION, MARK].contains(&key.as_str()) {
                self.fields.insert(key, value);
            }
        }
        self
    }

    pub fn description(&self) -> &str {
        self.text(DESCRIPTION)
    }

    pub fn short_description(&self) -> &str {
        self.text(SHORT_DESCRIPTION)
    }

    fn text(&self, key: &str) -> &str {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// All fields except the mark, in input order.
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    /// A single input field by name.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The assigned mark, if any.
    pub fn mark(&self) -> Option<Mark> {
        self.mark
    }

    pub fn is_marked(&self) -> bool {
        self.mark.is_some()
    }

    pub(crate) fn set_mark(&mut self, mark: Mark) -> Option<Mark> {
        self.mark.replace(mark)
    }

    pub(crate) fn clear_mark(&mut self) {
        self.mark = None;
    }
}

/// Short name of a JSON value's type for error messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
