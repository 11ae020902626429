//! # Updraft CLI
//! Command line interface to share, import, and manage local Updraft projects.
pub mod commands;
pub mod error;
pub mod logging;

// Re-exports
pub use commands::Cli;
pub use error::{Error, Result};
