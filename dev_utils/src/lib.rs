//! Developer utilities for Updraft.
pub mod archive;
pub mod error;
pub mod fs;
pub mod project;

// Re-exports
pub use error::Result;
