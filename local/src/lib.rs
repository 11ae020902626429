//! # Updraft Local
//! This package contains local functionality and types of the Updraft software suite:
//! packing projects into shareable archives, unpacking them,
//! and keeping track of the projects known on this machine.
pub mod common;
pub mod constants;
pub mod error;
pub mod file_resource;
pub mod project;
pub mod system;

// Re-exports
pub use error::{Error, Result};
