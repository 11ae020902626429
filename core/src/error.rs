//! Common error types.
use std::result::Result as StdResult;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// *********************
// *** Version Error ***
// *********************

/// Reasons a string is not a valid [`UpdateVersion`](crate::types::UpdateVersion).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Error, PartialEq, Eq, Clone, Debug)]
pub enum Version {
    #[error("version is empty")]
    Empty,

    #[error("expected 2 to 4 components, found {0}")]
    ComponentCount(usize),

    #[error("invalid component `{0}`")]
    InvalidComponent(String),

    #[error("invalid development stage `{0}`")]
    InvalidStage(String),
}

// *************************
// *** Project Error ***
// *************************

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Error, PartialEq, Eq, Clone, Debug)]
pub enum Project {
    #[error("project name can not be empty")]
    EmptyName,

    #[error("project name `{0}` contains invalid characters")]
    InvalidName(String),
}

// *************
// *** Error ***
// *************

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Error, PartialEq, Eq, Clone, Debug)]
pub enum Error {
    #[error("{0}")]
    Version(Version),

    #[error("{0}")]
    Project(Project),
}

impl From<Version> for Error {
    fn from(err: Version) -> Self {
        Self::Version(err)
    }
}

impl From<Project> for Error {
    fn from(err: Project) -> Self {
        Self::Project(err)
    }
}

pub type Result<T = ()> = StdResult<T, Error>;

#[cfg(test)]
#[path = "./error_test.rs"]
mod error_test;
