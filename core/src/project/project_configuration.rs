//! Registry entry of a local project.
use crate::error::Project as ProjectError;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Characters not allowed in a project name,
/// as the name is also used as the project's directory name.
const RESERVED_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Name of a project and the path to its metadata file.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectConfiguration {
    pub name: String,

    /// Path to the project's metadata file.
    pub path: PathBuf,
}

impl ProjectConfiguration {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validates a project name.
    ///
    /// # Errors
    /// + [`ProjectError::EmptyName`] if the name is empty or only whitespace.
    /// + [`ProjectError::InvalidName`] if the name can not be used as a directory name.
    pub fn validate_name(name: &str) -> Result<(), ProjectError> {
        if name.trim().is_empty() {
            return Err(ProjectError::EmptyName);
        }

        if name == "."
            || name == ".."
            || name.contains(RESERVED_CHARS)
            || name.chars().any(char::is_control)
        {
            return Err(ProjectError::InvalidName(name.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "./project_configuration_test.rs"]
mod project_configuration_test;
