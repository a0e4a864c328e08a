//! Error types for the setup wizard.

/// Top-level error type for the wizard core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Wizard state errors.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Step {step} out of range 1..={total}")]
    StepOutOfRange { step: usize, total: usize },

    #[error("Cannot complete at step {current} of {total}")]
    NotAtFinalStep { current: usize, total: usize },

    #[error("Wizard is already complete")]
    AlreadyComplete,

    #[error("Submission already in flight")]
    SubmitInFlight,

    #[error("Email not verified; wizard entry refused")]
    EmailNotVerified,

    #[error("No signed-in user")]
    NoUser,
}

/// Error returned by the profile persistence collaborator.
///
/// Carries the diagnostic fields the remote client surfaces: a human
/// message, the HTTP status, the response body, and the request URL.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Profile update failed: {message} (status {status:?})")]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
    pub body: Option<String>,
    pub url: Option<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            body: None,
            url: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Session collaborator errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to refresh user: {0}")]
    RefreshFailed(String),

    #[error("Session expired")]
    Expired,
}

/// Result type alias for the wizard core.
pub type Result<T> = std::result::Result<T, Error>;
