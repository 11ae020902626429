//! Creates a temporary folder to perform actions in.
use crate::Result;
use fake::faker::lorem::raw::Word;
use fake::locales::EN;
use fake::Fake;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Temporary directory removed on drop.
#[derive(Debug)]
pub struct TempDir {
    dir: tempfile::TempDir,
}

impl TempDir {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a subdirectory with a random name.
    pub fn mkdir(&mut self) -> Result<PathBuf> {
        let name: String = Word(EN).fake();
        let path = tempfile::Builder::new()
            .prefix(&name)
            .tempdir_in(self.dir.path())?
            .into_path();

        Ok(path)
    }

    /// Create a subdirectory with the given name.
    pub fn mkdir_with_name<S: AsRef<OsStr>>(&mut self, name: S) -> Result<PathBuf> {
        let path = self.dir.path().join(name.as_ref());
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Add an empty file with a random name to the directory.
    pub fn mkfile(&mut self) -> Result<PathBuf> {
        let (_, path) = tempfile::NamedTempFile::new_in(self.dir.path())?
            .keep()
            .map_err(|err| err.error)?;

        Ok(path)
    }

    /// Add an empty file to the directory with a given name.
    pub fn mkfile_with_name<S: AsRef<OsStr>>(&mut self, file_name: S) -> Result<PathBuf> {
        let path = self.dir.path().join(file_name.as_ref());
        fs::write(&path, "")?;
        Ok(path)
    }

    /// Add an empty file to the directory with a given extension.
    pub fn mkfile_with_extension<S: AsRef<OsStr>>(&mut self, ext: S) -> Result<PathBuf> {
        let mut path = self.mkfile()?;
        let dst = path.with_extension(ext);
        fs::rename(&path, &dst)?;
        path = dst;
        Ok(path)
    }
}

#[cfg(test)]
#[path = "temp_dir_test.rs"]
mod temp_dir_test;
