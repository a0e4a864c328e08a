use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use setup_wizard::api::ProfileApi;
use setup_wizard::config::WizardConfig;
use setup_wizard::error::{ApiError, SessionError};
use setup_wizard::nav::{Destination, Navigator};
use setup_wizard::session::{CurrentUser, Session};
use setup_wizard::wizard::model::{client_setup_steps, developer_setup_steps};
use setup_wizard::wizard::{StepPayload, SubmitOutcome, UserType, WizardController};

/// Logs the payload it would persist; fails once if asked, to show the
/// retry path.
struct DemoApi {
    fail_once: AtomicBool,
}

#[async_trait]
impl ProfileApi for DemoApi {
    async fn update_profile(&self, payload: &serde_json::Value) -> Result<(), ApiError> {
        if self.fail_once.swap(false, Ordering::SeqCst) {
            return Err(ApiError::new("simulated timeout")
                .with_status(504)
                .with_body("upstream timed out")
                .with_url("/api/profile"));
        }
        tracing::info!(%payload, "profile saved");
        Ok(())
    }
}

struct DemoSession {
    user: CurrentUser,
}

#[async_trait]
impl Session for DemoSession {
    fn current_user(&self) -> Option<CurrentUser> {
        Some(self.user.clone())
    }

    async fn refresh_user(&self) -> Result<(), SessionError> {
        tracing::info!("session user refreshed");
        Ok(())
    }
}

struct DemoNavigator;

impl Navigator for DemoNavigator {
    fn request(&self, destination: Destination) {
        match destination {
            Destination::Exit => tracing::info!("navigation: exit wizard"),
            Destination::Route(route) => tracing::info!(%route, "navigation"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let user_type = match std::env::var("SETUP_WIZARD_ROLE").as_deref() {
        Ok("developer") => UserType::Developer,
        _ => UserType::Client,
    };
    let fail_once = std::env::var("SETUP_WIZARD_FAIL_ONCE").is_ok();

    eprintln!("Setup Wizard demo v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Role: {user_type}");
    eprintln!("   Simulated failure: {fail_once}\n");

    let api = Arc::new(DemoApi {
        fail_once: AtomicBool::new(fail_once),
    });
    let session = Arc::new(DemoSession {
        user: CurrentUser {
            id: Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            email_verified: true,
        },
    });
    let nav = Arc::new(DemoNavigator);

    let steps = match user_type {
        UserType::Client => client_setup_steps(),
        UserType::Developer => developer_setup_steps(),
    };

    let mut wizard = WizardController::new(steps, WizardConfig::default(), api, session, nav)
        .with_listener(|step, payload| {
            tracing::info!(step, payload = %payload.canonical_string(), "step changed");
        });
    wizard.start()?;

    // Step 1 — personal info, entered with UI-facing keys.
    let personal: StepPayload = json!({
        "fullName": "Ada Obi",
        "phoneNumber": "+234 800 000 0000",
        "currentLocation": "Lagos",
        "occupation": "Architect",
        "preferredContact": "email",
    })
    .as_object()
    .cloned()
    .unwrap_or_default();
    wizard.update_step(1, personal)?;
    wizard.next().await?;

    // Step 2 — build preferences.
    let preferences: StepPayload = json!({
        "projectTypes": ["Residential Villas", "Renovation Projects"],
        "preferredCities": ["Lagos", "Abuja"],
        "budgetRange": "100m-500m",
    })
    .as_object()
    .cloned()
    .unwrap_or_default();
    wizard.update_step(2, preferences)?;
    wizard.next().await?;

    // Step 3 — review, then submit (retrying once on failure).
    loop {
        match wizard.next().await? {
            SubmitOutcome::Complete => break,
            SubmitOutcome::Failed { alert } => {
                eprintln!("! {alert}");
                continue;
            }
            SubmitOutcome::Advanced(step) => {
                tracing::info!(step, "advanced");
            }
        }
    }

    eprintln!("\nProfile setup complete at {:?}", wizard.completed_at());
    wizard.browse();
    Ok(())
}
