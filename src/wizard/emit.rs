//! Change de-duplication — suppresses redundant notifications to the owner.
//!
//! In a reactive UI, notifying the owner can trigger a re-render that
//! re-runs reconciliation; comparing against the last emitted snapshot
//! breaks that loop.

use super::reconcile::ReconciledPayload;

/// One emitter per mounted sub-form. Holds the serialized snapshot of the
/// most recently emitted payload; reset by recreating the emitter.
#[derive(Debug, Default)]
pub struct ChangeEmitter {
    last_emitted: Option<String>,
}

impl ChangeEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `notify` with `payload` unless it is identical to the previous
    /// emission. Returns whether `notify` was called.
    ///
    /// For a sequence of payloads this fires once per maximal run of equal
    /// consecutive values; non-adjacent repeats fire again.
    pub fn emit_if_changed<F>(&mut self, payload: &ReconciledPayload, notify: F) -> bool
    where
        F: FnOnce(&ReconciledPayload),
    {
        let serialized = payload.canonical_string();
        if self.last_emitted.as_deref() == Some(serialized.as_str()) {
            return false;
        }
        self.last_emitted = Some(serialized);
        notify(payload);
        true
    }
}
