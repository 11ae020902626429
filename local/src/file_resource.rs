//! Indicate a resource is backed by a file.
use std::io;
use std::path::{Path, PathBuf};

// ***********************
// *** System Resource ***
// ***********************

/// System resources have only one file for the entire system that resides at a fixed path.
/// The path may be overridden, e.g. by [`Config`](crate::system::config::Config).
pub trait SystemResource {
    /// Returns the path to the resource file that was loaded.
    fn path(&self) -> &Path;

    /// Returns the default path of the resource file.
    fn default_path() -> Result<PathBuf, io::Error>;
}
