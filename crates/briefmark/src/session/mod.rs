//! Review session state.
//!
//! A [`ReviewSession`] owns a fixed list of records and a cursor into it.
//! The cursor only moves forward past a record that carries a mark, and
//! setting a mark on any record but the last also advances the cursor.
//!
//! Sessions are not global. The owner keeps one in a [`SessionSlot`], which
//! decides whether loading new input replaces the running session.
//!
//! # Usage
//!
//! ```
//! use briefmark::{Mark, Record, ReviewSession, SourceMetadata};
//!
//! let records = vec![Record::new("first", "1st"), Record::new("second", "2nd")];
//! let source = SourceMetadata::new("cases.json", b"...", records.len());
//! let mut session = ReviewSession::new(records, source);
//!
//! assert!(!session.go_next());
//! session.set_label(Mark::new(4).unwrap()).unwrap();
//! assert_eq!(session.cursor(), 1);
//! ```

mod review;
mod slot;
mod view;

pub use review::{CurrentRecord, LabelTransition, ReviewSession};
pub use slot::{LoadOutcome, SessionSlot};
pub use view::{RatingButton, SessionView};
