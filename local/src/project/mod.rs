//! Functionality related to local Updraft projects.
//!
//! This includes:
//! + Project archives, used to share projects.
//! + Project operations backed by the project registry.
pub mod archive;
pub mod project;
