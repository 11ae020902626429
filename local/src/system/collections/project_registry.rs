//! Registry of local projects.
use crate::constants::PROJECTS_REGISTRY_FILE;
use crate::error::{Error, Project as ProjectError};
use crate::file_resource::SystemResource;
use crate::system::common::config_dir_path;
use crate::system::settings_file;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use updraft_core::project::ProjectConfiguration;

/// Ordered list of the projects known on this machine.
///
/// Every mutation is persisted immediately.
/// Mutations hold an exclusive lock on the registry file while they
/// re-read, modify, and rewrite it, so entries written by other processes in
/// the meantime are kept.
#[derive(Serialize, Deserialize, Default, Debug)]
#[serde(transparent)]
pub struct ProjectRegistry {
    inner: Vec<ProjectConfiguration>,

    /// Path to the registry file.
    #[serde(skip)]
    path: PathBuf,
}

impl ProjectRegistry {
    /// Load the registry from its default location.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path()?)
    }

    /// Load the registry from the given path.
    /// An absent or empty file results in an empty registry.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(err.into()),
        };

        let inner = if contents.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&contents)?
        };

        Ok(Self { inner, path })
    }

    /// Whether a project with exactly the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&ProjectConfiguration> {
        self.inner.iter().find(|project| project.name == name)
    }

    /// Appends a project and persists the registry.
    ///
    /// # Errors
    /// + [`ProjectError::DuplicateName`] if a project with the same name is registered.
    ///   The registry is left unmodified.
    pub fn add(&mut self, project: ProjectConfiguration) -> Result {
        ProjectConfiguration::validate_name(&project.name)?;

        let file_lock = settings_file::lock_path(&self.path)?;
        let mut projects: Vec<ProjectConfiguration> = settings_file::read_locked(&file_lock)?;
        if projects.iter().any(|p| p.name == project.name) {
            self.inner = projects;
            return Err(ProjectError::DuplicateName(project.name).into());
        }

        tracing::debug!(name = %project.name, path = ?project.path, "registering project");
        projects.push(project);
        settings_file::write_locked(&file_lock, &projects)?;
        self.inner = projects;
        Ok(())
    }

    /// Removes the project with the given name and persists the registry.
    /// Returns the removed project, if it was registered.
    pub fn remove(&mut self, name: &str) -> Result<Option<ProjectConfiguration>> {
        let file_lock = settings_file::lock_path(&self.path)?;
        let mut projects: Vec<ProjectConfiguration> = settings_file::read_locked(&file_lock)?;
        let removed = match projects.iter().position(|p| p.name == name) {
            Some(index) => {
                let removed = projects.remove(index);
                settings_file::write_locked(&file_lock, &projects)?;
                tracing::debug!(%name, "deregistered project");
                Some(removed)
            }

            None => None,
        };

        self.inner = projects;
        Ok(removed)
    }

    /// Rewrites the registry file with the in memory state.
    pub fn save(&self) -> Result {
        let file_lock = settings_file::lock_path(&self.path)?;
        settings_file::write_locked(&file_lock, &self.inner)
    }

    /// Consumes `self`, returning the underlying `Vec`.
    pub fn to_vec(self) -> Vec<ProjectConfiguration> {
        self.inner
    }
}

impl ProjectRegistry {
    /// Looks up a project, erroring if it is not registered.
    pub fn get_or_err(&self, name: &str) -> Result<&ProjectConfiguration> {
        self.get(name)
            .ok_or_else(|| Error::from(ProjectError::NotRegistered(name.to_string())))
    }
}

impl Deref for ProjectRegistry {
    type Target = [ProjectConfiguration];

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl SystemResource for ProjectRegistry {
    fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the path to the system registry file.
    fn default_path() -> Result<PathBuf, io::Error> {
        Ok(config_dir_path()?.join(PROJECTS_REGISTRY_FILE))
    }
}

#[cfg(test)]
#[path = "./project_registry_test.rs"]
mod project_registry_test;
