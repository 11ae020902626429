//! Common use functions.
use crate::constants::*;
use crate::Result;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use updraft_core::types::UpdateVersion;
use walkdir::WalkDir;

// ******************
// *** file paths ***
// ******************

/// Returns the path to a project's default metadata file.
/// \<path\>/\<name\>.\<PROJECT_FILE_EXTENSION\>
pub fn project_file_of(path: &Path, name: &str) -> PathBuf {
    path.join(format!("{name}.{PROJECT_FILE_EXTENSION}"))
}

/// Returns the path to the statistics file of a project directory.
/// \<path\>/\<STATISTICS_FILE\>
pub fn statistics_file_of(path: &Path) -> PathBuf {
    path.join(STATISTICS_FILE)
}

/// Returns whether the path has the project file extension.
/// Does not check the file system.
pub fn has_project_file_extension(path: &Path) -> bool {
    path.extension() == Some(OsStr::new(PROJECT_FILE_EXTENSION))
}

/// Returns the metadata files directly inside `path`, sorted.
pub fn project_files_in(path: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let entry_path = entry.path();
        if entry.file_type()?.is_file() && has_project_file_extension(&entry_path) {
            files.push(entry_path);
        }
    }

    files.sort();
    Ok(files)
}

// **************************
// *** version directories ***
// **************************

/// Subdirectories of a project directory, split by whether their name is a valid version.
#[derive(Default, Debug)]
pub struct VersionDirectories {
    /// Version directories, sorted by version.
    pub versions: Vec<(UpdateVersion, PathBuf)>,

    /// Directories whose name is not a valid version, sorted by path.
    pub ignored: Vec<PathBuf>,
}

/// Collects the direct subdirectories of `path` as [`VersionDirectories`].
/// Files are not considered.
pub fn version_dirs_of(path: &Path) -> Result<VersionDirectories> {
    let mut dirs = VersionDirectories::default();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }

        let version = entry
            .file_name()
            .to_str()
            .and_then(|name| name.parse::<UpdateVersion>().ok());

        match version {
            Some(version) => dirs.versions.push((version, entry.path())),
            None => dirs.ignored.push(entry.path()),
        }
    }

    dirs.versions.sort_by(|(a, _), (b, _)| a.cmp(b));
    dirs.ignored.sort();
    Ok(dirs)
}

// *******************
// *** file system ***
// *******************

/// Recursively copies the directory `from` to `to`.
/// `to` is created if needed.
pub fn copy_dir_all(from: &Path, to: &Path) -> Result {
    for entry in WalkDir::new(from).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let Ok(rel_path) = entry.path().strip_prefix(from) else {
            continue;
        };

        let dst = to.join(rel_path);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst)?;
        } else {
            fs::copy(entry.path(), &dst)?;
        }
    }

    Ok(())
}

/// Moves a file, copying it if it can not be renamed (e.g. across devices).
pub fn move_file(from: &Path, to: &Path) -> Result {
    if let Err(err) = fs::rename(from, to) {
        if !from.is_file() || to.exists() {
            return Err(err.into());
        }

        tracing::debug!(?from, ?to, ?err, "rename failed, copying file");
        fs::copy(from, to)?;
        fs::remove_file(from)?;
    }

    Ok(())
}

/// Moves a directory, copying it if it can not be renamed (e.g. across devices).
pub fn move_dir(from: &Path, to: &Path) -> Result {
    if let Err(err) = fs::rename(from, to) {
        if !from.is_dir() || to.exists() {
            return Err(err.into());
        }

        tracing::debug!(?from, ?to, ?err, "rename failed, copying directory");
        copy_dir_all(from, to)?;
        fs::remove_dir_all(from)?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "./common_test.rs"]
mod common_test;
