//! Render projection of a session.

use serde::Serialize;

use super::review::ReviewSession;
use crate::error::Result;
use crate::persistence::export_file_name;
use crate::record::Mark;

/// One of the five scoring controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingButton {
    pub value: Mark,
    /// Whether this is the current record's mark.
    pub selected: bool,
}

/// Everything a front end draws for the current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    /// Input file name.
    pub source: String,
    /// One-based position of the cursor.
    pub position: usize,
    pub total: usize,
    pub progress: f64,
    /// Number of records with a mark.
    pub labeled: usize,
    pub description: String,
    pub short_description: String,
    pub mark: Option<Mark>,
    pub ratings: Vec<RatingButton>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub all_labeled: bool,
    /// Name the export will be written under.
    pub export_name: String,
}

impl ReviewSession {
    /// Project the session into a [`SessionView`].
    pub fn view(&self) -> Result<SessionView> {
        let current = self.current()?;

        let ratings = Mark::all()
            .map(|value| RatingButton {
                value,
                selected: current.mark == Some(value),
            })
            .collect();

        Ok(SessionView {
            source: self.source().file.clone(),
            position: current.index + 1,
            total: self.len(),
            progress: self.progress(),
            labeled: self.labeled_count(),
            description: current.record.description().to_string(),
            short_description: current.record.short_description().to_string(),
            mark: current.mark,
            ratings,
            can_go_previous: self.can_go_previous(),
            can_go_next: self.can_go_next(),
            all_labeled: self.all_labeled(),
            export_name: export_file_name(&self.source().file),
        })
    }
}
