//! Project descriptor.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Descriptor of an Updraft project.
/// Stored as the project's metadata file.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    pub name: String,
    pub description: Option<String>,

    /// Location update clients query for new releases.
    pub update_url: Option<String>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            update_url: None,
        }
    }
}
