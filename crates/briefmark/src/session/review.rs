//! The review session state machine.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BriefmarkError, Result};
use crate::input::SourceMetadata;
use crate::record::{Mark, Record};

/// Records under review, their marks, and the cursor.
///
/// The record list is fixed at construction. The cursor always lies in
/// `0..len()` for a non-empty session, including after restoring a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredSession")]
pub struct ReviewSession {
    source: SourceMetadata,
    cursor: usize,
    records: Vec<Record>,
}

/// The record under the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentRecord<'a> {
    /// Position of the record in the session.
    pub index: usize,
    pub record: &'a Record,
    pub mark: Option<Mark>,
}

/// Result of scoring the current record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelTransition {
    /// Index of the record that was scored.
    pub index: usize,
    pub mark: Mark,
    /// Mark the record held before, when re-scoring.
    pub previous: Option<Mark>,
    /// Whether the cursor moved on to the next record.
    pub advanced: bool,
    /// Cursor after the transition.
    pub cursor: usize,
}

impl ReviewSession {
    /// Start a review over `records` with every mark cleared and the cursor
    /// on the first record.
    pub fn new(records: impl IntoIterator<Item = Record>, source: SourceMetadata) -> Self {
        let records: Vec<Record> = records
            .into_iter()
            .map(|mut record| {
                record.clear_mark();
                record
            })
            .collect();

        debug!(file = %source.file, records = records.len(), "created review session");

        Self {
            source,
            cursor: 0,
            records,
        }
    }

    /// Metadata about the input this session was loaded from.
    pub fn source(&self) -> &SourceMetadata {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// All records with their marks, in input order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The record list as it should be written out.
    ///
    /// Callers normally offer export only once [`all_labeled`](Self::all_labeled)
    /// holds; unscored records carry a `null` mark.
    pub fn export(&self) -> &[Record] {
        &self.records
    }

    /// The record under the cursor with its mark.
    pub fn current(&self) -> Result<CurrentRecord<'_>> {
        let record = self
            .records
            .get(self.cursor)
            .ok_or(BriefmarkError::EmptySession)?;

        Ok(CurrentRecord {
            index: self.cursor,
            record,
            mark: record.mark(),
        })
    }

    pub fn can_go_previous(&self) -> bool {
        self.cursor > 0
    }

    /// Forward movement needs a next record and a mark on the current one.
    pub fn can_go_next(&self) -> bool {
        self.cursor + 1 < self.records.len()
            && self
                .records
                .get(self.cursor)
                .is_some_and(Record::is_marked)
    }

    /// Move back one record. Returns whether the cursor moved.
    pub fn go_previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.cursor -= 1;
        debug!(cursor = self.cursor, "moved to previous record");
        true
    }

    /// Move forward one record. Returns whether the cursor moved.
    pub fn go_next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.cursor += 1;
        debug!(cursor = self.cursor, "moved to next record");
        true
    }

    /// Score the current record and, unless it is the last one, advance.
    pub fn set_label(&mut self, mark: Mark) -> Result<LabelTransition> {
        let index = self.cursor;
        let last = self.records.len().checked_sub(1);
        let record = self
            .records
            .get_mut(index)
            .ok_or(BriefmarkError::EmptySession)?;

        let previous = record.set_mark(mark);
        let advanced = Some(index) != last;
        if advanced {
            self.cursor += 1;
        }

        debug!(index, %mark, ?previous, advanced, "labeled record");

        Ok(LabelTransition {
            index,
            mark,
            previous,
            advanced,
            cursor: self.cursor,
        })
    }

    /// Whether every record carries a mark.
    pub fn all_labeled(&self) -> bool {
        self.records.iter().all(Record::is_marked)
    }

    pub fn labeled_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_marked()).count()
    }

    /// Position of the cursor as a fraction, `(cursor + 1) / len`.
    pub fn progress(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        (self.cursor + 1) as f64 / self.records.len() as f64
    }
}

/// On-disk shape of a session, before the cursor is clamped.
#[derive(Deserialize)]
struct StoredSession {
    source: SourceMetadata,
    cursor: usize,
    records: Vec<Record>,
}

impl From<StoredSession> for ReviewSession {
    fn from(stored: StoredSession) -> Self {
        let max = stored.records.len().saturating_sub(1);
        Self {
            source: stored.source,
            cursor: stored.cursor.min(max),
            records: stored.records,
        }
    }
}
