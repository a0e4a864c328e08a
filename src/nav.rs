//! Navigation trait — the routing collaborator boundary.

/// A navigation request issued by the wizard.
///
/// The core only asks; the UI layer owns actual route changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Leave the wizard without completing it.
    Exit,
    /// Move to a named route.
    Route(String),
}

/// Receives navigation requests from the wizard controller.
pub trait Navigator: Send + Sync {
    fn request(&self, destination: Destination);
}
