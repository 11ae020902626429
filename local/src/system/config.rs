//! Local configuration.
//!
//! Determines where projects and the project registry live.
//! Values not set in the configuration file fall back to the user's
//! system directories.
use super::common::{config_dir_path, data_dir_path};
use crate::constants::{LOCAL_CONFIG_FILE, PROJECTS_DIR, PROJECTS_REGISTRY_FILE};
use crate::file_resource::SystemResource;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufReader};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

/// Contents of the configuration file.
#[derive(Serialize, Deserialize, PartialEq, Default, Clone, Debug)]
#[serde(default)]
pub struct ConfigData {
    /// Directory project directories are created in.
    pub projects_dir: Option<PathBuf>,

    /// Path of the project registry file.
    pub registry_file: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(transparent)]
pub struct Config {
    #[serde(skip)]
    path: PathBuf,
    inner: ConfigData,
}

impl Config {
    pub fn load_or_default() -> Result<Self> {
        Self::load_from_or_default(Self::default_path()?)
    }

    /// Load the config from the given path or create the default if the file does not exist.
    pub fn load_from_or_default(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        match fs::File::open(&path) {
            Ok(file) => {
                let reader = BufReader::new(file);
                Ok(Self {
                    inner: serde_json::from_reader(reader)?,
                    path,
                })
            }

            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self {
                path,
                inner: ConfigData::default(),
            }),

            Err(err) => Err(err.into()),
        }
    }

    /// Config with every location inside `root`.
    ///
    /// # Layout
    /// + `<root>/local_config.json`
    /// + `<root>/Projects/`
    /// + `<root>/projects.json`
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            path: root.join(LOCAL_CONFIG_FILE),
            inner: ConfigData {
                projects_dir: Some(root.join(PROJECTS_DIR)),
                registry_file: Some(root.join(PROJECTS_REGISTRY_FILE)),
            },
        }
    }

    /// Saves the config to the path it was loaded from.
    pub fn save(&self) -> Result {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        fs::write(&self.path, serde_json::to_string_pretty(&self)?)?;
        Ok(())
    }

    /// Directory project directories live in.
    pub fn projects_dir(&self) -> Result<PathBuf, io::Error> {
        match &self.inner.projects_dir {
            Some(path) => Ok(self.resolve(path)),
            None => Ok(data_dir_path()?.join(PROJECTS_DIR)),
        }
    }

    /// Directory of the project named `name`.
    pub fn project_dir(&self, name: &str) -> Result<PathBuf, io::Error> {
        Ok(self.projects_dir()?.join(name))
    }

    /// Path of the project registry.
    pub fn registry_file(&self) -> Result<PathBuf, io::Error> {
        match &self.inner.registry_file {
            Some(path) => Ok(self.resolve(path)),
            None => Ok(config_dir_path()?.join(PROJECTS_REGISTRY_FILE)),
        }
    }

    /// Relative paths are relative to the directory of the config file.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }

        match self.path.parent() {
            Some(dir) => dir.join(path),
            None => path.to_path_buf(),
        }
    }

    /// Consumes self, returning the inner data.
    pub fn to_data(self) -> ConfigData {
        self.inner
    }
}

impl SystemResource for Config {
    fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the path to the system config file.
    fn default_path() -> Result<PathBuf, io::Error> {
        Ok(config_dir_path()?.join(LOCAL_CONFIG_FILE))
    }
}

impl Deref for Config {
    type Target = ConfigData;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for Config {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

#[cfg(test)]
#[path = "./config_test.rs"]
mod config_test;
