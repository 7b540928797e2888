//! Owner of at most one review session.

use serde::Serialize;
use tracing::info;

use super::review::ReviewSession;
use crate::config::ReloadPolicy;
use crate::input::SourceMetadata;
use crate::record::Record;

/// What a load did to the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadOutcome {
    /// The slot was empty and now holds a new session.
    Created,
    /// The running session was kept and the input ignored.
    Kept,
    /// The running session was discarded for the new input.
    Replaced,
}

/// Holds the active session for one reviewer.
#[derive(Debug, Default)]
pub struct SessionSlot {
    session: Option<ReviewSession>,
    policy: ReloadPolicy,
}

impl SessionSlot {
    pub fn new(policy: ReloadPolicy) -> Self {
        Self {
            session: None,
            policy,
        }
    }

    /// Load input into the slot, subject to the reload policy.
    pub fn load(&mut self, records: Vec<Record>, source: SourceMetadata) -> LoadOutcome {
        let outcome = match (&self.session, self.policy) {
            (None, _) => LoadOutcome::Created,
            (Some(_), ReloadPolicy::KeepExisting) => LoadOutcome::Kept,
            (Some(existing), ReloadPolicy::ResetOnNewSource) => {
                if existing.source().same_input(&source) {
                    LoadOutcome::Kept
                } else {
                    LoadOutcome::Replaced
                }
            }
            (Some(_), ReloadPolicy::AlwaysReset) => LoadOutcome::Replaced,
        };

        if outcome != LoadOutcome::Kept {
            self.session = Some(ReviewSession::new(records, source));
        }

        if let Some(session) = &self.session {
            info!(
                ?outcome,
                file = %session.source().file,
                records = session.len(),
                "loaded input"
            );
        }

        outcome
    }

    /// Install a session restored from a snapshot, replacing any current one.
    pub fn restore(&mut self, session: ReviewSession) -> LoadOutcome {
        let outcome = if self.session.is_some() {
            LoadOutcome::Replaced
        } else {
            LoadOutcome::Created
        };
        info!(
            file = %session.source().file,
            cursor = session.cursor(),
            labeled = session.labeled_count(),
            "restored session"
        );
        self.session = Some(session);
        outcome
    }

    pub fn get(&self) -> Option<&ReviewSession> {
        self.session.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut ReviewSession> {
        self.session.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Mark;

    fn input(name: &str, body: &str) -> (Vec<Record>, SourceMetadata) {
        let records = vec![Record::new("a", "b"), Record::new("c", "d")];
        let source = SourceMetadata::new(name, body.as_bytes(), records.len());
        (records, source)
    }

    fn load_and_mark(slot: &mut SessionSlot) {
        let (records, source) = input("one.json", "first");
        assert_eq!(slot.load(records, source), LoadOutcome::Created);
        slot.get_mut()
            .unwrap()
            .set_label(Mark::new(5).unwrap())
            .unwrap();
    }

    #[test]
    fn test_keep_existing_ignores_any_reload() {
        let mut slot = SessionSlot::new(ReloadPolicy::KeepExisting);
        load_and_mark(&mut slot);

        let (records, source) = input("two.json", "second");
        assert_eq!(slot.load(records, source), LoadOutcome::Kept);

        let session = slot.get().unwrap();
        assert_eq!(session.source().file, "one.json");
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.labeled_count(), 1);
    }

    #[test]
    fn test_same_source_keeps_progress() {
        let mut slot = SessionSlot::default();
        load_and_mark(&mut slot);

        let (records, source) = input("one.json", "first");
        assert_eq!(slot.load(records, source), LoadOutcome::Kept);
        assert_eq!(slot.get().unwrap().labeled_count(), 1);
    }

    #[test]
    fn test_new_source_replaces() {
        let mut slot = SessionSlot::default();
        load_and_mark(&mut slot);

        let (records, source) = input("one.json", "changed contents");
        assert_eq!(slot.load(records, source), LoadOutcome::Replaced);

        let session = slot.get().unwrap();
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.labeled_count(), 0);
    }

    #[test]
    fn test_always_reset() {
        let mut slot = SessionSlot::new(ReloadPolicy::AlwaysReset);
        load_and_mark(&mut slot);

        let (records, source) = input("one.json", "first");
        assert_eq!(slot.load(records, source), LoadOutcome::Replaced);
        assert_eq!(slot.get().unwrap().labeled_count(), 0);
    }

    #[test]
    fn test_restore() {
        let mut slot = SessionSlot::default();
        let (records, source) = input("one.json", "first");
        let session = ReviewSession::new(records, source);

        assert_eq!(slot.restore(session.clone()), LoadOutcome::Created);
        assert_eq!(slot.restore(session), LoadOutcome::Replaced);
        assert!(slot.get().is_some());
    }
}
