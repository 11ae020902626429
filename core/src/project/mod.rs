//! Project related types.
pub mod project;
pub mod project_configuration;

// Re-exports
pub use project::Project;
pub use project_configuration::ProjectConfiguration;
