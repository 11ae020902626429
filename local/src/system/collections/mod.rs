//! System collections for Updraft.
//!
//! This includes modules for tracking
//! + Projects
pub mod project_registry;

// Reexports
pub use project_registry::ProjectRegistry;
