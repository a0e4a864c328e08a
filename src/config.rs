//! Configuration types.

/// Wizard configuration.
///
/// Route names the controller hands to the navigation collaborator. Kept as
/// an explicit struct loaded once at wiring time, never ambient state.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Route to redirect to when the user's email is not verified.
    pub verify_email_route: String,
    /// Route offered after successful completion (browse the marketplace).
    pub browse_route: String,
    /// Route offered after successful completion (back to the homepage).
    pub home_route: String,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            verify_email_route: "/verify-email".to_string(),
            browse_route: "/browse".to_string(),
            home_route: "/".to_string(),
        }
    }
}
