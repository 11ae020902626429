//! # Updraft Core
//!
//! This package represents core functionality of the Updraft software suite.
//! It contains the types shared by every other package and performs no
//! file system access.
pub mod error;
pub mod identifier;
pub mod project;
pub mod types;

// Re-exports
pub use error::{Error, Result};
