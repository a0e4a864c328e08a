//! Wizard core — step state, field reconciliation, and submission.
//!
//! A wizard is a linear sequence of form steps. Each step collects a loose
//! payload of UI-keyed fields; the reconciler normalizes it into the
//! canonical persistence shape, the change emitter suppresses redundant
//! notifications, and the controller drives navigation and the final
//! profile submission.

pub mod controller;
pub mod emit;
pub mod model;
pub mod reconcile;
pub mod store;

pub use controller::{SubmitOutcome, WizardController, WizardPhase};
pub use emit::ChangeEmitter;
pub use model::{FieldKind, FieldSpec, StepPayload, StepSchema, UserType};
pub use reconcile::ReconciledPayload;
pub use store::StepStore;
