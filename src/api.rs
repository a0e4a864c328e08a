//! Profile API trait — the persistence collaborator boundary.

use async_trait::async_trait;

use crate::error::ApiError;

/// Backend-agnostic profile persistence trait.
///
/// The wizard core never talks to the network itself; it hands the fully
/// reconciled, persistence-shaped payload to this collaborator exactly once
/// per submission attempt.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// Persist the aggregated profile payload.
    ///
    /// The payload is a JSON object whose keys are canonical
    /// persistence-facing field names (snake_case).
    async fn update_profile(&self, payload: &serde_json::Value) -> Result<(), ApiError>;
}
