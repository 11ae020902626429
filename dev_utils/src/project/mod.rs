//! Project fixtures.
//!
//! Builds project directories on disk with the layout expected by `updraft-local`:
//! a metadata file, an optional statistics file, and version directories.
use crate::fs::TempDir;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub const METADATA_EXTENSION: &str = "updproj";
pub const STATISTICS_FILE: &str = "statistics.php";
pub const PAYLOAD_FILE: &str = "payload.bin";

/// Builder for a [`ProjectFixture`].
#[derive(Default)]
pub struct ProjectBuilder {
    name: String,
    metadata: Option<Vec<u8>>,
    statistics: Option<Vec<u8>>,
    versions: Vec<String>,
    other_dirs: Vec<String>,
}

impl ProjectBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let metadata = format!("{{\"name\":\"{name}\"}}").into_bytes();
        Self {
            name,
            metadata: Some(metadata),
            ..Default::default()
        }
    }

    /// Do not create a metadata file.
    pub fn without_metadata(mut self) -> Self {
        self.metadata = None;
        self
    }

    pub fn metadata(mut self, contents: impl Into<Vec<u8>>) -> Self {
        self.metadata = Some(contents.into());
        self
    }

    pub fn statistics(mut self, contents: impl Into<Vec<u8>>) -> Self {
        self.statistics = Some(contents.into());
        self
    }

    /// Add a version directory containing a payload file and a nested directory.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.versions.push(version.into());
        self
    }

    /// Add a directory whose name is not expected to be a version.
    pub fn other_dir(mut self, name: impl Into<String>) -> Self {
        self.other_dirs.push(name.into());
        self
    }

    /// Creates the project as `<temp dir>/<name>`.
    pub fn build(self) -> Result<ProjectFixture> {
        let mut root = TempDir::new()?;
        let path = root.mkdir_with_name(&self.name)?;
        let metadata_file = path.join(format!("{}.{METADATA_EXTENSION}", self.name));
        if let Some(metadata) = &self.metadata {
            fs::write(&metadata_file, metadata)?;
        }

        if let Some(statistics) = &self.statistics {
            fs::write(path.join(STATISTICS_FILE), statistics)?;
        }

        for version in self.versions.iter() {
            write_payload(&path.join(version), version)?;
        }

        for dir in self.other_dirs.iter() {
            let dir_path = path.join(dir);
            fs::create_dir_all(&dir_path)?;
            fs::write(dir_path.join("junk.txt"), dir)?;
        }

        Ok(ProjectFixture {
            root,
            name: self.name,
            path,
            metadata_file,
        })
    }
}

/// A project directory on disk, removed on drop.
pub struct ProjectFixture {
    root: TempDir,
    pub name: String,
    pub path: PathBuf,
    pub metadata_file: PathBuf,
}

impl ProjectFixture {
    /// Directory the project directory lives in.
    pub fn parent(&self) -> &Path {
        self.root.path()
    }
}

/// Writes the payload of a version directory.
///
/// # Layout
/// + `<path>/payload.bin`: bytes derived from `seed`.
/// + `<path>/files/nested/readme.txt`: `seed`.
pub fn write_payload(path: &Path, seed: &str) -> Result {
    let nested = path.join("files").join("nested");
    fs::create_dir_all(&nested)?;
    fs::write(path.join(PAYLOAD_FILE), payload_bytes(seed))?;
    fs::write(nested.join("readme.txt"), seed)?;
    Ok(())
}

/// Deterministic payload bytes for `seed`.
pub fn payload_bytes(seed: &str) -> Vec<u8> {
    seed.bytes()
        .cycle()
        .take(256)
        .enumerate()
        .map(|(i, b)| b.wrapping_add(i as u8))
        .collect()
}

/// Relative paths of all files beneath `path`, sorted, with `/` separators.
pub fn relative_files(path: &Path) -> Result<Vec<String>> {
    fn collect(root: &Path, dir: &Path, acc: &mut Vec<String>) -> Result {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let entry_path = entry.path();
            if entry.file_type()?.is_dir() {
                collect(root, &entry_path, acc)?;
            } else if let Ok(rel) = entry_path.strip_prefix(root) {
                let rel = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/");

                acc.push(rel);
            }
        }

        Ok(())
    }

    let mut files = Vec::new();
    collect(path, path, &mut files)?;
    files.sort();
    Ok(files)
}
