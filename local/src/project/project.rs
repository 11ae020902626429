//! Operations on the projects known to this machine.
//!
//! Project directories live at `<projects dir>/<name>`,
//! with locations taken from a [`Config`].
use super::archive::{self, ExportOptions, ExportSummary, ImportOptions};
use crate::common;
use crate::error::{Error, Project as ProjectError};
use crate::system::collections::ProjectRegistry;
use crate::system::config::Config;
use crate::Result;
use std::path::{Path, PathBuf};
use std::{fs, io};
use updraft_core::project::{Project, ProjectConfiguration};
use updraft_core::types::UpdateVersion;

/// Loads the project registry configured by `config`.
pub fn registry(config: &Config) -> Result<ProjectRegistry> {
    ProjectRegistry::load_from(config.registry_file()?)
}

// ***********
// *** New ***
// ***********

/// Creates and registers a new, empty project.
///
/// # Steps
/// 1. Create the project directory.
/// 2. Write the metadata file, `<project dir>/<name>.updproj`.
/// 3. Add the project to the registry.
///
/// # Errors
/// + [`ProjectError::DuplicateName`] if a project with the name is already registered.
/// + [`io::ErrorKind::AlreadyExists`] if the project directory already exists.
pub fn new(config: &Config, name: &str) -> Result<ProjectConfiguration> {
    ProjectConfiguration::validate_name(name)?;
    let mut projects = registry(config)?;
    if projects.contains(name) {
        return Err(ProjectError::DuplicateName(name.to_string()).into());
    }

    let project_dir = config.project_dir(name)?;
    if project_dir.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("`{}` already exists", project_dir.display()),
        )
        .into());
    }

    fs::create_dir_all(&project_dir)?;
    let metadata_file = common::project_file_of(&project_dir, name);
    let project = ProjectConfiguration::new(name, metadata_file);
    let res = write_metadata(&project.path, &Project::new(name))
        .and_then(|_| projects.add(project.clone()));

    if let Err(err) = res {
        if let Err(cleanup_err) = fs::remove_dir_all(&project_dir) {
            tracing::error!(path = ?project_dir, ?cleanup_err, "could not remove project directory");
        }

        return Err(err);
    }

    tracing::info!(%name, path = ?project.path, "created project");
    Ok(project)
}

fn write_metadata(path: &Path, project: &Project) -> Result {
    fs::write(path, serde_json::to_string_pretty(project)?)?;
    Ok(())
}

// **************
// *** Import ***
// **************

/// Imports a project archive as the project `name` and registers it.
///
/// The registry is only modified once the archive was unpacked successfully.
///
/// # Arguments
/// + `metadata_file`: Where to place the project's metadata file.
///   Defaults to `<project dir>/<name>.updproj`.
///
/// # Errors
/// + [`ProjectError::DuplicateName`] if a project with the name is already registered.
///   Nothing is written in this case.
/// + Any error of [`archive::import`].
pub fn import(
    config: &Config,
    archive: impl AsRef<Path>,
    name: &str,
    metadata_file: Option<PathBuf>,
) -> Result<ProjectConfiguration> {
    ProjectConfiguration::validate_name(name)?;
    let mut projects = registry(config)?;
    if projects.contains(name) {
        return Err(ProjectError::DuplicateName(name.to_string()).into());
    }

    let project_dir = config.project_dir(name)?;
    let created_dir = !project_dir.exists();

    let mut options = ImportOptions::new(name);
    if let Some(path) = metadata_file {
        options = options.metadata_file(path);
    }

    let project = archive::import(archive, &project_dir, &options)?;
    if let Err(err) = projects.add(project.clone()) {
        // registered concurrently, undo the import
        if let Err(cleanup_err) = remove_files(&project, &project_dir, created_dir) {
            tracing::error!(?cleanup_err, "could not remove imported files");
        }

        return Err(err);
    }

    Ok(project)
}

// *************
// *** Share ***
// *************

/// Exports the registered project `name` to the archive `destination`.
///
/// # Arguments
/// + `versions`: Versions to include. If `None`, every version is included.
///
/// # Errors
/// + [`ProjectError::NotRegistered`] if no project with the name is registered.
/// + Any error of [`archive::export`].
pub fn share(
    config: &Config,
    name: &str,
    destination: impl AsRef<Path>,
    versions: Option<Vec<UpdateVersion>>,
) -> Result<ExportSummary> {
    let projects = registry(config)?;
    let project = projects.get_or_err(name)?;

    let mut options = ExportOptions::new().metadata_file(project.path());
    if let Some(versions) = versions {
        options = options.versions(versions);
    }

    archive::export(config.project_dir(name)?, destination, &options)
}

// **************
// *** Remove ***
// **************

/// Deregisters the project `name`.
///
/// # Arguments
/// + `delete_files`: Also delete the project directory and metadata file.
///   Files are deleted before the project is deregistered,
///   so a project whose files could not be deleted stays registered.
///
/// # Returns
/// The removed project.
///
/// # Errors
/// + [`ProjectError::NotRegistered`] if no project with the name is registered.
pub fn remove(config: &Config, name: &str, delete_files: bool) -> Result<ProjectConfiguration> {
    let mut projects = registry(config)?;
    let project = projects.get_or_err(name)?.clone();
    if delete_files {
        let project_dir = config.project_dir(name)?;
        remove_files(&project, &project_dir, true)?;
        tracing::info!(%name, path = ?project_dir, "deleted project files");
    }

    match projects.remove(name)? {
        Some(removed) => Ok(removed),
        None => Err(ProjectError::NotRegistered(name.to_string()).into()),
    }
}

/// Removes a project's metadata file and, if `remove_dir`, its directory.
fn remove_files(project: &ProjectConfiguration, project_dir: &Path, remove_dir: bool) -> Result {
    if project.path.is_file() {
        fs::remove_file(&project.path)?;
    }

    if remove_dir && project_dir.exists() {
        fs::remove_dir_all(project_dir)?;
    }

    Ok(())
}

// ****************
// *** Versions ***
// ****************

/// Versions of the registered project `name`, sorted.
///
/// # Errors
/// + [`ProjectError::NotRegistered`] if no project with the name is registered.
/// + [`Error::NotFound`] if the project directory does not exist.
pub fn versions(config: &Config, name: &str) -> Result<Vec<UpdateVersion>> {
    let projects = registry(config)?;
    projects.get_or_err(name)?;

    let project_dir = config.project_dir(name)?;
    if !project_dir.is_dir() {
        return Err(Error::NotFound(project_dir));
    }

    archive::versions_of(&project_dir)
}

#[cfg(test)]
#[path = "./project_test.rs"]
mod project_test;
