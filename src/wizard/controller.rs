//! Wizard controller — orchestrates step state, reconciliation, change
//! emission, and the final profile submission.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::api::ProfileApi;
use crate::config::WizardConfig;
use crate::error::WizardError;
use crate::nav::{Destination, Navigator};
use crate::session::Session;

use super::emit::ChangeEmitter;
use super::model::{StepPayload, StepSchema};
use super::reconcile::ReconciledPayload;
use super::store::StepStore;

/// The phases of a wizard run.
///
/// Progresses `Step(1) → … → Step(N) → Submitting → Complete`, with
/// `Failed` as the recoverable branch of `Submitting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    /// Collecting input on the given 1-based step.
    Step(usize),
    /// The profile submission is in flight.
    Submitting,
    /// Terminal: the profile was saved.
    Complete,
    /// The submission failed; step data is retained and retry is allowed.
    Failed,
}

impl WizardPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl std::fmt::Display for WizardPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Step(step) => write!(f, "step_{step}"),
            Self::Submitting => write!(f, "submitting"),
            Self::Complete => write!(f, "complete"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// What a `next` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Moved forward to the given step.
    Advanced(usize),
    /// The final submission succeeded.
    Complete,
    /// The submission failed; `alert` is the single user-visible message.
    Failed { alert: String },
}

type StepListener = Box<dyn Fn(usize, &ReconciledPayload) + Send + Sync>;

/// Drives one wizard run. Exclusively owns its [`StepStore`]; the UI layer
/// serializes calls (no operation may overlap itself on one instance).
pub struct WizardController {
    config: WizardConfig,
    schemas: Vec<StepSchema>,
    store: StepStore,
    emitters: HashMap<usize, ChangeEmitter>,
    phase: WizardPhase,
    api: Arc<dyn ProfileApi>,
    session: Arc<dyn Session>,
    nav: Arc<dyn Navigator>,
    listener: Option<StepListener>,
    completed_at: Option<DateTime<Utc>>,
}

impl WizardController {
    pub fn new(
        schemas: Vec<StepSchema>,
        config: WizardConfig,
        api: Arc<dyn ProfileApi>,
        session: Arc<dyn Session>,
        nav: Arc<dyn Navigator>,
    ) -> Self {
        let store = StepStore::new(schemas.len());
        Self {
            config,
            schemas,
            store,
            emitters: HashMap::new(),
            phase: WizardPhase::Step(1),
            api,
            session,
            nav,
            listener: None,
            completed_at: None,
        }
    }

    /// Register the owner callback for de-duplicated step-change
    /// notifications.
    pub fn with_listener(
        mut self,
        listener: impl Fn(usize, &ReconciledPayload) + Send + Sync + 'static,
    ) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn current_step(&self) -> usize {
        self.store.current_step()
    }

    pub fn total_steps(&self) -> usize {
        self.store.total_steps()
    }

    pub fn is_complete(&self) -> bool {
        self.store.is_complete()
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// The raw payload of a visited step, for re-rendering on back
    /// navigation.
    pub fn step_payload(&self, step: usize) -> Option<&StepPayload> {
        self.store.payload(step)
    }

    /// Gate wizard entry on the session state.
    ///
    /// An unverified email redirects to the verify-email route; entry is
    /// refused. A missing user is a session inconsistency and also refuses
    /// entry.
    pub fn start(&self) -> Result<(), WizardError> {
        match self.session.current_user() {
            Some(user) if user.email_verified => Ok(()),
            Some(user) => {
                tracing::warn!(email = %user.email, "unverified email; leaving wizard");
                self.nav.request(Destination::Route(
                    self.config.verify_email_route.clone(),
                ));
                Err(WizardError::EmailNotVerified)
            }
            None => Err(WizardError::NoUser),
        }
    }

    /// Replace a step's payload and notify the owner if the reconciled
    /// shape changed. Returns whether a notification fired.
    pub fn update_step(
        &mut self,
        step: usize,
        payload: StepPayload,
    ) -> Result<bool, WizardError> {
        match self.phase {
            WizardPhase::Submitting => return Err(WizardError::SubmitInFlight),
            WizardPhase::Complete => return Err(WizardError::AlreadyComplete),
            WizardPhase::Step(_) | WizardPhase::Failed => {}
        }

        let schema = step
            .checked_sub(1)
            .and_then(|i| self.schemas.get(i))
            .ok_or(WizardError::StepOutOfRange {
                step,
                total: self.store.total_steps(),
            })?;
        let reconciled = schema.reconcile(&payload);
        self.store.update_step(step, payload)?;

        let emitter = self.emitters.entry(step).or_default();
        let listener = self.listener.as_ref();
        let emitted = emitter.emit_if_changed(&reconciled, |changed| {
            if let Some(listener) = listener {
                listener(step, changed);
            }
        });
        Ok(emitted)
    }

    /// Move back one step; no-op at step 1 and outside the step phases.
    pub fn back(&mut self) -> usize {
        if let WizardPhase::Step(_) = self.phase {
            let before = self.store.current_step();
            let step = self.store.retreat();
            if step != before {
                // The re-entered sub-form remounts with a fresh emitter.
                self.emitters.remove(&step);
                self.phase = WizardPhase::Step(step);
            }
        }
        self.store.current_step()
    }

    /// Advance, or submit when already at the last step. In `Failed`, this
    /// is the user retry: the same aggregated payload is re-attempted.
    pub async fn next(&mut self) -> Result<SubmitOutcome, WizardError> {
        match self.phase {
            WizardPhase::Step(_) if !self.store.is_final_step() => {
                let step = self.store.advance();
                self.emitters.remove(&step);
                self.phase = WizardPhase::Step(step);
                Ok(SubmitOutcome::Advanced(step))
            }
            WizardPhase::Step(_) => self.submit().await,
            WizardPhase::Failed => {
                self.phase = WizardPhase::Step(self.store.current_step());
                self.submit().await
            }
            WizardPhase::Submitting => Err(WizardError::SubmitInFlight),
            WizardPhase::Complete => Err(WizardError::AlreadyComplete),
        }
    }

    /// All visited steps' reconciled payloads merged into one
    /// persistence-facing record, in step order.
    pub fn aggregate_payload(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        for (step, payload) in self.store.visited() {
            if let Some(schema) = self.schemas.get(step - 1) {
                schema.reconcile(payload).merge_into(&mut object);
            }
        }
        serde_json::Value::Object(object)
    }

    async fn submit(&mut self) -> Result<SubmitOutcome, WizardError> {
        self.phase = WizardPhase::Submitting;
        let payload = self.aggregate_payload();
        tracing::info!(step = self.store.current_step(), "submitting profile");

        match self.api.update_profile(&payload).await {
            Ok(()) => {
                if let Err(e) = self.session.refresh_user().await {
                    tracing::warn!("Failed to refresh user after profile save: {e}");
                }
                self.store.mark_complete()?;
                self.completed_at = Some(Utc::now());
                self.phase = WizardPhase::Complete;
                Ok(SubmitOutcome::Complete)
            }
            Err(e) => {
                tracing::error!(
                    message = %e.message,
                    status = ?e.status,
                    body = ?e.body,
                    url = ?e.url,
                    payload = %payload,
                    "Failed to save profile"
                );
                self.phase = WizardPhase::Failed;
                Ok(SubmitOutcome::Failed {
                    alert: "An error occurred while updating your profile. Please try again."
                        .to_string(),
                })
            }
        }
    }

    /// Ask the navigation collaborator to leave the wizard.
    pub fn exit(&self) {
        self.nav.request(Destination::Exit);
    }

    /// Post-completion: leave the wizard and browse the marketplace.
    pub fn browse(&self) {
        self.nav.request(Destination::Exit);
        self.nav
            .request(Destination::Route(self.config.browse_route.clone()));
    }

    /// Post-completion: leave the wizard and return to the homepage.
    pub fn go_home(&self) {
        self.nav.request(Destination::Exit);
        self.nav
            .request(Destination::Route(self.config.home_route.clone()));
    }
}
