//! Step store — wizard position and per-step payloads.

use std::collections::BTreeMap;

use crate::error::WizardError;

use super::model::StepPayload;

/// Holds wizard progress: the 1-based current step, each visited step's
/// payload, and the completion flag.
///
/// Navigation is bounds-clamped: advancing past the last step or
/// retreating past the first is a silent no-op, not an error.
#[derive(Debug, Clone)]
pub struct StepStore {
    total_steps: usize,
    current_step: usize,
    payloads: BTreeMap<usize, StepPayload>,
    is_complete: bool,
}

impl StepStore {
    /// Create a store for a wizard with `total_steps` steps, positioned at
    /// step 1. A zero step count is clamped to one.
    pub fn new(total_steps: usize) -> Self {
        Self {
            total_steps: total_steps.max(1),
            current_step: 1,
            payloads: BTreeMap::new(),
            is_complete: false,
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn is_final_step(&self) -> bool {
        self.current_step == self.total_steps
    }

    /// Move forward one step; no-op at the last step.
    pub fn advance(&mut self) -> usize {
        if self.current_step < self.total_steps {
            self.current_step += 1;
        }
        self.current_step
    }

    /// Move back one step; no-op at step 1.
    pub fn retreat(&mut self) -> usize {
        if self.current_step > 1 {
            self.current_step -= 1;
        }
        self.current_step
    }

    /// Replace a step's payload in full. Callers merge with prior step data
    /// before calling; this layer never patches individual fields.
    pub fn update_step(&mut self, step: usize, payload: StepPayload) -> Result<(), WizardError> {
        if step < 1 || step > self.total_steps {
            return Err(WizardError::StepOutOfRange {
                step,
                total: self.total_steps,
            });
        }
        self.payloads.insert(step, payload);
        Ok(())
    }

    /// The payload of a visited step, if any.
    pub fn payload(&self, step: usize) -> Option<&StepPayload> {
        self.payloads.get(&step)
    }

    /// Visited steps and their payloads, in step order.
    pub fn visited(&self) -> impl Iterator<Item = (usize, &StepPayload)> {
        self.payloads.iter().map(|(step, payload)| (*step, payload))
    }

    /// Mark the wizard complete. Only valid at the final step.
    pub fn mark_complete(&mut self) -> Result<(), WizardError> {
        if !self.is_final_step() {
            return Err(WizardError::NotAtFinalStep {
                current: self.current_step,
                total: self.total_steps,
            });
        }
        self.is_complete = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload(value: serde_json::Value) -> StepPayload {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn starts_at_step_one_incomplete() {
        let store = StepStore::new(3);
        assert_eq!(store.current_step(), 1);
        assert_eq!(store.total_steps(), 3);
        assert!(!store.is_complete());
        assert!(store.payload(1).is_none());
    }

    #[test]
    fn retreat_at_first_step_is_noop() {
        let mut store = StepStore::new(3);
        assert_eq!(store.retreat(), 1);
        assert_eq!(store.current_step(), 1);
    }

    #[test]
    fn advance_at_last_step_is_noop() {
        let mut store = StepStore::new(3);
        store.advance();
        store.advance();
        assert_eq!(store.current_step(), 3);
        assert_eq!(store.advance(), 3);
        assert_eq!(store.current_step(), 3);
    }

    #[test]
    fn advance_and_retreat_walk_the_range() {
        let mut store = StepStore::new(3);
        assert_eq!(store.advance(), 2);
        assert_eq!(store.advance(), 3);
        assert_eq!(store.retreat(), 2);
        assert_eq!(store.retreat(), 1);
    }

    #[test]
    fn update_step_replaces_wholesale() {
        let mut store = StepStore::new(2);
        store
            .update_step(1, payload(json!({"fullName": "Ada", "phone": "1"})))
            .unwrap();
        store
            .update_step(1, payload(json!({"fullName": "Grace"})))
            .unwrap();

        let current = store.payload(1).unwrap();
        assert_eq!(current.get("fullName"), Some(&json!("Grace")));
        // Replaced, not merged: the phone field is gone.
        assert!(current.get("phone").is_none());
    }

    #[test]
    fn update_step_rejects_out_of_range() {
        let mut store = StepStore::new(2);
        assert!(matches!(
            store.update_step(0, StepPayload::new()),
            Err(WizardError::StepOutOfRange { step: 0, total: 2 })
        ));
        assert!(matches!(
            store.update_step(3, StepPayload::new()),
            Err(WizardError::StepOutOfRange { step: 3, total: 2 })
        ));
    }

    #[test]
    fn mark_complete_only_at_final_step() {
        let mut store = StepStore::new(2);
        assert!(matches!(
            store.mark_complete(),
            Err(WizardError::NotAtFinalStep { current: 1, total: 2 })
        ));

        store.advance();
        store.mark_complete().unwrap();
        assert!(store.is_complete());
    }

    #[test]
    fn visited_iterates_in_step_order() {
        let mut store = StepStore::new(3);
        store.update_step(2, payload(json!({"b": "2"}))).unwrap();
        store.update_step(1, payload(json!({"a": "1"}))).unwrap();

        let steps: Vec<usize> = store.visited().map(|(step, _)| step).collect();
        assert_eq!(steps, [1, 2]);
    }

    #[test]
    fn zero_steps_clamps_to_one() {
        let store = StepStore::new(0);
        assert_eq!(store.total_steps(), 1);
        assert!(store.is_final_step());
    }
}
