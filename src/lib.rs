//! Setup Wizard — multi-step profile setup core.

pub mod api;
pub mod config;
pub mod error;
pub mod nav;
pub mod session;
pub mod wizard;
