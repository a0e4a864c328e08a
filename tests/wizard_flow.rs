//! End-to-end wizard scenarios against the public API.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use setup_wizard::api::ProfileApi;
use setup_wizard::config::WizardConfig;
use setup_wizard::error::{ApiError, SessionError};
use setup_wizard::nav::{Destination, Navigator};
use setup_wizard::session::{CurrentUser, Session};
use setup_wizard::wizard::model::client_setup_steps;
use setup_wizard::wizard::{StepPayload, SubmitOutcome, WizardController, WizardPhase};

struct ScriptedApi {
    /// Errors to return before succeeding, oldest first.
    failures: Mutex<Vec<ApiError>>,
    calls: Mutex<Vec<serde_json::Value>>,
}

impl ScriptedApi {
    fn new(failures: Vec<ApiError>) -> Arc<Self> {
        Arc::new(Self {
            failures: Mutex::new(failures),
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ProfileApi for ScriptedApi {
    async fn update_profile(&self, payload: &serde_json::Value) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(payload.clone());
        let mut failures = self.failures.lock().unwrap();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures.remove(0))
        }
    }
}

struct FakeSession {
    refreshes: AtomicUsize,
}

impl FakeSession {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            refreshes: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Session for FakeSession {
    fn current_user(&self) -> Option<CurrentUser> {
        Some(CurrentUser {
            id: Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            email_verified: true,
        })
    }

    async fn refresh_user(&self) -> Result<(), SessionError> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
struct NullNav;

impl Navigator for NullNav {
    fn request(&self, _destination: Destination) {}
}

fn payload(value: serde_json::Value) -> StepPayload {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn three_step_wizard_completes_and_refreshes_once() {
    let api = ScriptedApi::new(Vec::new());
    let session = FakeSession::new();
    let mut wizard = WizardController::new(
        client_setup_steps(),
        WizardConfig::default(),
        api.clone(),
        session.clone(),
        Arc::new(NullNav),
    );
    wizard.start().unwrap();

    wizard
        .update_step(1, payload(json!({"fullName": "Ada"})))
        .unwrap();
    assert_eq!(wizard.next().await.unwrap(), SubmitOutcome::Advanced(2));

    wizard
        .update_step(2, payload(json!({"projectTypes": ["Residential Villas"]})))
        .unwrap();
    assert_eq!(wizard.next().await.unwrap(), SubmitOutcome::Advanced(3));

    // Step 3 has no fields; the third `next` submits.
    assert_eq!(wizard.next().await.unwrap(), SubmitOutcome::Complete);
    assert_eq!(wizard.phase(), WizardPhase::Complete);
    assert_eq!(session.refreshes.load(Ordering::SeqCst), 1);

    let calls = api.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0]["name"], json!("Ada"));
    assert_eq!(calls[0]["project_types"], json!(["Residential Villas"]));
    // Unentered canonical fields are present with defaults.
    assert_eq!(calls[0]["phone"], json!(""));
    assert_eq!(calls[0]["preferred_cities"], json!([]));
}

#[tokio::test]
async fn timeout_then_retry_preserves_entered_data() {
    let api = ScriptedApi::new(vec![ApiError::new("timeout")
        .with_status(504)
        .with_body("gateway timeout")
        .with_url("/api/profile")]);
    let session = FakeSession::new();
    let mut wizard = WizardController::new(
        client_setup_steps(),
        WizardConfig::default(),
        api.clone(),
        session.clone(),
        Arc::new(NullNav),
    );
    wizard.start().unwrap();

    wizard
        .update_step(1, payload(json!({"fullName": "Ada"})))
        .unwrap();
    wizard.next().await.unwrap();
    wizard
        .update_step(2, payload(json!({"preferredCities": ["Lagos"]})))
        .unwrap();
    wizard.next().await.unwrap();

    match wizard.next().await.unwrap() {
        SubmitOutcome::Failed { alert } => assert!(!alert.is_empty()),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(wizard.phase(), WizardPhase::Failed);
    assert_eq!(session.refreshes.load(Ordering::SeqCst), 0);

    // Step data is untouched while failed.
    assert_eq!(
        wizard.step_payload(1).unwrap().get("fullName"),
        Some(&json!("Ada"))
    );

    // User retry: same aggregated payload, now accepted.
    assert_eq!(wizard.next().await.unwrap(), SubmitOutcome::Complete);
    let calls = api.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
    assert_eq!(session.refreshes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn editing_after_back_changes_the_submitted_payload() {
    let api = ScriptedApi::new(Vec::new());
    let mut wizard = WizardController::new(
        client_setup_steps(),
        WizardConfig::default(),
        api.clone(),
        FakeSession::new(),
        Arc::new(NullNav),
    );
    wizard.start().unwrap();

    wizard
        .update_step(1, payload(json!({"fullName": "Ada"})))
        .unwrap();
    wizard.next().await.unwrap();
    wizard.back();

    // Back navigation re-opens the step for a wholesale replacement.
    wizard
        .update_step(1, payload(json!({"fullName": "Grace", "occupation": "Engineer"})))
        .unwrap();
    wizard.next().await.unwrap();
    wizard.next().await.unwrap();
    wizard.next().await.unwrap();

    let calls = api.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0]["name"], json!("Grace"));
    assert_eq!(calls[0]["bio"], json!("Engineer"));
}
