//! Session trait — the authentication collaborator boundary.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::SessionError;

/// The signed-in user as seen by the wizard.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    /// Gate for wizard entry: unverified users are redirected out.
    pub email_verified: bool,
}

/// Backend-agnostic session trait.
#[async_trait]
pub trait Session: Send + Sync {
    /// The currently signed-in user, if any.
    fn current_user(&self) -> Option<CurrentUser>;

    /// Re-fetch the cached user record after a profile change.
    async fn refresh_user(&self) -> Result<(), SessionError>;
}
