//! briefmark: review sessions for scoring generated short descriptions.
//!
//! A reviewer pages through a list of records, each holding a long-form
//! `description` and a generated `short_description`, and gives every record
//! a mark from 1 to 5. The labeled list is then exported next to the input.
//!
//! # Core Principles
//!
//! - **Gated progress**: the cursor only moves forward past a scored record
//! - **Fused scoring**: setting a mark advances the cursor in one transition
//! - **Lossless export**: extra input fields and non-ASCII text survive
//!
//! # Example
//!
//! ```no_run
//! use briefmark::{Mark, ReviewSession, input};
//!
//! let (records, source) = input::load_file("cases.json").unwrap();
//! let mut session = ReviewSession::new(records, source);
//!
//! session.set_label(Mark::new(4).unwrap()).unwrap();
//! println!("{} of {}", session.cursor() + 1, session.len());
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod persistence;
pub mod record;
pub mod session;

pub use config::{ReloadPolicy, ReviewConfig};
pub use error::{BriefmarkError, Result};
pub use input::SourceMetadata;
pub use record::{Mark, Record};
pub use session::{
    CurrentRecord, LabelTransition, LoadOutcome, RatingButton, ReviewSession, SessionSlot,
    SessionView,
};
