use std::io;
use std::result::Result as StdResult;
use thiserror::Error;
use updraft_core::Error as CoreError;
use updraft_local::Error as LocalError;

// *************
// *** Error ***
// *************

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Core(CoreError),

    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Local(LocalError),

    /// Logging could not be set up.
    #[error("could not initialize logging: {0}")]
    Logging(String),
}

impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        Error::Core(err)
    }
}

impl From<LocalError> for Error {
    fn from(err: LocalError) -> Self {
        Error::Local(err)
    }
}

pub type Result<T = ()> = StdResult<T, Error>;

#[cfg(test)]
#[path = "./error_test.rs"]
mod error_test;
