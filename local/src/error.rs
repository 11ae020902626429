//! Common error types.
use std::io;
use std::path::PathBuf;
use std::result::Result as StdResult;
use thiserror::Error;
use updraft_core::Error as CoreError;

// *********************
// *** Archive Error ***
// *********************

/// Errors specific to reading or writing project archives.
#[derive(Error, Debug)]
pub enum Archive {
    /// The archive could not be opened or one of its entries could not be read.
    #[error("could not read archive: {0}")]
    Read(String),

    /// The archive could not be written.
    #[error("could not write archive: {0}")]
    Write(String),

    /// An entry would be extracted outside of the extraction directory.
    #[error("archive entry `{0}` has an invalid path")]
    InvalidEntryPath(String),
}

impl Archive {
    pub fn read(msg: impl Into<String>) -> Self {
        Self::Read(msg.into())
    }

    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }
}

// *********************
// *** Project Error ***
// *********************

#[derive(Error, Debug)]
pub enum Project {
    /// A project with the name is already registered.
    #[error("a project named `{0}` already exists")]
    DuplicateName(String),

    /// No project with the name is registered.
    #[error("project `{0}` is not registered")]
    NotRegistered(String),

    /// The project or archive does not contain the required metadata file.
    #[error("no metadata file found in `{0}`")]
    MissingMetadata(PathBuf),

    /// Multiple candidate metadata files were found and none is preferred.
    #[error("multiple metadata files found in `{0}`")]
    AmbiguousMetadata(PathBuf),
}

// *******************
// *** Local Error ***
// *******************

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Core(CoreError),

    /// An expected input path does not exist.
    #[error("`{0}` not found")]
    NotFound(PathBuf),

    #[error("{0}")]
    Project(Project),

    #[error("{0}")]
    Archive(Archive),

    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Serde(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error is caused by a project name that is already registered.
    pub fn is_duplicate_name(&self) -> bool {
        matches!(self, Self::Project(Project::DuplicateName(_)))
    }

    /// Whether the error is caused by missing project metadata.
    pub fn is_missing_metadata(&self) -> bool {
        matches!(self, Self::Project(Project::MissingMetadata(_)))
    }
}

impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl From<updraft_core::error::Version> for Error {
    fn from(err: updraft_core::error::Version) -> Self {
        Self::Core(err.into())
    }
}

impl From<updraft_core::error::Project> for Error {
    fn from(err: updraft_core::error::Project) -> Self {
        Self::Core(err.into())
    }
}

impl From<Project> for Error {
    fn from(err: Project) -> Self {
        Self::Project(err)
    }
}

impl From<Archive> for Error {
    fn from(err: Archive) -> Self {
        Self::Archive(err)
    }
}

// ********************
// *** Local Result ***
// ********************

pub type Result<T = (), E = Error> = StdResult<T, E>;

#[cfg(test)]
#[path = "./error_test.rs"]
mod error_test;
