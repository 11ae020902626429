//! Project archives.
//!
//! A project archive is a zip file used to share a project.
//!
//! # Layout
//! + `<name>.updproj`: Project metadata. Required.
//! + `statistics.php`: Statistics script. Optional.
//! + `<version>/`: One directory per released version, holding its payload.
//!
//! Only directories whose name is a valid [`UpdateVersion`] are packed,
//! and only those are unpacked again.
use crate::common::{self, VersionDirectories};
use crate::constants::{STAGING_DIR_PREFIX, STATISTICS_FILE};
use crate::error::{Archive as ArchiveError, Error, Project as ProjectError};
use crate::Result;
use std::fs::{self, File};
use std::io::{self, BufReader, Seek, Write};
use std::path::{Path, PathBuf};
use updraft_core::project::ProjectConfiguration;
use updraft_core::types::UpdateVersion;
use walkdir::WalkDir;
use zip::result::ZipError;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

// **************
// *** Export ***
// **************

#[derive(Default, Clone, Debug)]
pub struct ExportOptions {
    /// Metadata file to pack.
    /// If `None`, the metadata file at the root of the project directory is used.
    pub metadata_file: Option<PathBuf>,

    /// Versions to pack.
    /// If `None`, every version directory is packed.
    pub versions: Option<Vec<UpdateVersion>>,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metadata_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.metadata_file = Some(path.into());
        self
    }

    pub fn versions(mut self, versions: impl Into<Vec<UpdateVersion>>) -> Self {
        self.versions = Some(versions.into());
        self
    }
}

/// Outcome of an [`export`].
#[derive(Debug)]
pub struct ExportSummary {
    /// Path of the written archive.
    pub archive: PathBuf,

    /// Metadata file that was packed.
    pub metadata_file: PathBuf,

    /// Whether the statistics file was packed.
    pub statistics: bool,

    /// Versions that were packed, sorted.
    pub versions: Vec<UpdateVersion>,
}

/// Packs a project directory into an archive at `destination`.
///
/// The archive is written to a temporary file next to `destination`
/// and moved into place once complete, replacing any existing file.
/// The project directory is not modified.
/// Unix file modes are stored with each entry and restored by [`import`].
///
/// # Errors
/// + [`Error::NotFound`] if the project directory does not exist,
///   or a selected version has no directory.
/// + [`ProjectError::MissingMetadata`] if the metadata file does not exist.
/// + [`ArchiveError::Write`] if the archive can not be written,
///   or a payload path can not be stored as an entry name.
/// + [`io::ErrorKind::InvalidInput`] if `destination` is inside a packed version directory.
pub fn export(
    project_dir: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    options: &ExportOptions,
) -> Result<ExportSummary> {
    let project_dir = project_dir.as_ref();
    let destination = destination.as_ref();
    if !project_dir.is_dir() {
        return Err(Error::NotFound(project_dir.to_path_buf()));
    }

    let metadata_file = match &options.metadata_file {
        Some(path) => path.clone(),
        None => match find_metadata_file(project_dir)? {
            Some(path) => path,
            None => return Err(ProjectError::MissingMetadata(project_dir.to_path_buf()).into()),
        },
    };

    let metadata_name = match metadata_file.file_name().and_then(|name| name.to_str()) {
        Some(name) if metadata_file.is_file() => name.to_string(),
        _ => return Err(ProjectError::MissingMetadata(metadata_file.clone()).into()),
    };

    let VersionDirectories { versions, ignored } = common::version_dirs_of(project_dir)?;
    for path in ignored {
        tracing::debug!(?path, "not a version directory, skipping");
    }

    let versions = select_versions(project_dir, versions, options.versions.as_deref())?;
    let statistics_file = common::statistics_file_of(project_dir);
    let statistics = statistics_file.is_file();

    let archive_dir = match destination.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    // the archive may not be written into a directory it packs
    let archive_dir_abs = fs::canonicalize(archive_dir)?;
    for (_, path) in versions.iter() {
        if archive_dir_abs.starts_with(fs::canonicalize(path)?) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "archive destination `{}` is inside version directory `{}`",
                    destination.display(),
                    path.display()
                ),
            )
            .into());
        }
    }

    let archive = tempfile::NamedTempFile::new_in(archive_dir)?;
    {
        let mut zip = ZipWriter::new(archive.as_file());
        let file_options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        if statistics {
            add_file(&mut zip, &statistics_file, STATISTICS_FILE, file_options)?;
        }

        add_file(&mut zip, &metadata_file, &metadata_name, file_options)?;
        for (_, path) in versions.iter() {
            add_dir_all(&mut zip, path, file_options)?;
        }

        zip.finish().map_err(write_error)?;
    }

    archive.as_file().sync_all()?;
    archive.persist(destination).map_err(|err| err.error)?;

    let versions = versions
        .into_iter()
        .map(|(version, _)| version)
        .collect::<Vec<_>>();

    tracing::info!(
        project = ?project_dir,
        archive = ?destination,
        versions = versions.len(),
        "exported project"
    );

    Ok(ExportSummary {
        archive: destination.to_path_buf(),
        metadata_file,
        statistics,
        versions,
    })
}

/// Restricts the version directories to the selected versions.
fn select_versions(
    project_dir: &Path,
    available: Vec<(UpdateVersion, PathBuf)>,
    selected: Option<&[UpdateVersion]>,
) -> Result<Vec<(UpdateVersion, PathBuf)>> {
    let Some(selected) = selected else {
        return Ok(available);
    };

    if let Some(missing) = selected
        .iter()
        .find(|version| !available.iter().any(|(v, _)| v == *version))
    {
        return Err(Error::NotFound(project_dir.join(missing.to_string())));
    }

    Ok(available
        .into_iter()
        .filter(|(version, _)| selected.contains(version))
        .collect())
}

/// Adds a file at the root of the archive.
fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    path: &Path,
    name: &str,
    options: FileOptions,
) -> Result {
    tracing::debug!(?path, %name, "adding file to archive");
    let mut file = File::open(path)?;
    let options = with_permissions(options, &file.metadata()?);
    zip.start_file(name, options).map_err(write_error)?;
    io::copy(&mut file, zip)?;
    Ok(())
}

/// Adds a directory and everything in it to the root of the archive,
/// under the directory's name.
fn add_dir_all<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    path: &Path,
    options: FileOptions,
) -> Result {
    let Some(base) = path.parent() else {
        return Err(Error::NotFound(path.to_path_buf()));
    };

    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let Some(name) = entry_name(base, entry.path()) else {
            return Err(ArchiveError::write(format!(
                "`{}` can not be archived",
                entry.path().display()
            ))
            .into());
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            zip.add_directory(format!("{name}/"), options)
                .map_err(write_error)?;
        } else if file_type.is_file() {
            add_file(zip, entry.path(), &name, options)?;
        } else {
            tracing::warn!(path = ?entry.path(), "not a regular file, skipping");
        }
    }

    Ok(())
}

/// Carries the file's mode bits into the archive entry.
#[cfg(unix)]
fn with_permissions(options: FileOptions, metadata: &fs::Metadata) -> FileOptions {
    use std::os::unix::fs::PermissionsExt;
    options.unix_permissions(metadata.permissions().mode())
}

#[cfg(not(unix))]
fn with_permissions(options: FileOptions, _metadata: &fs::Metadata) -> FileOptions {
    options
}

/// Archive entry name of `path` relative to `base`, using `/` as separator.
fn entry_name(base: &Path, path: &Path) -> Option<String> {
    let rel_path = path.strip_prefix(base).ok()?;
    let components = rel_path
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;

    Some(components.join("/"))
}

fn write_error(err: ZipError) -> Error {
    match err {
        ZipError::Io(err) => Error::Io(err),
        err => ArchiveError::write(err.to_string()).into(),
    }
}

// **************
// *** Import ***
// **************

#[derive(Clone, Debug)]
pub struct ImportOptions {
    /// Name of the imported project.
    pub name: String,

    /// Final location of the metadata file.
    /// If `None`, `<target dir>/<name>.updproj` is used.
    pub metadata_file: Option<PathBuf>,
}

impl ImportOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata_file: None,
        }
    }

    pub fn metadata_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.metadata_file = Some(path.into());
        self
    }
}

/// Unpacks an archive into the project directory `target_dir`.
///
/// The archive is first extracted into a staging directory next to `target_dir`,
/// which is removed on every exit path.
/// Nothing is written to the target until the archive is known to contain metadata.
/// If moving the contents fails, everything moved so far is removed again.
///
/// Directories at the archive root that are not named by a valid [`UpdateVersion`]
/// are skipped, as are unknown root level files.
///
/// # Returns
/// The [`ProjectConfiguration`] of the imported project, ready to be registered.
///
/// # Errors
/// + [`Error::NotFound`] if the archive does not exist.
/// + [`ArchiveError::Read`] if the archive is corrupt.
/// + [`ArchiveError::InvalidEntryPath`] if an entry would be extracted outside the staging
///   directory.
/// + [`ProjectError::MissingMetadata`] if the archive does not contain a metadata file.
/// + [`ProjectError::AmbiguousMetadata`] if the archive contains multiple metadata files.
/// + [`io::ErrorKind::AlreadyExists`] if an unpacked file or version already exists at its
///   destination.
pub fn import(
    archive: impl AsRef<Path>,
    target_dir: impl AsRef<Path>,
    options: &ImportOptions,
) -> Result<ProjectConfiguration> {
    let archive = archive.as_ref();
    let target_dir = target_dir.as_ref();
    ProjectConfiguration::validate_name(&options.name)?;
    if !archive.is_file() {
        return Err(Error::NotFound(archive.to_path_buf()));
    }

    let metadata_dst = match &options.metadata_file {
        Some(path) => path.clone(),
        None => common::project_file_of(target_dir, &options.name),
    };

    let staging_root = match target_dir.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    fs::create_dir_all(staging_root)?;
    let staging = tempfile::Builder::new()
        .prefix(STAGING_DIR_PREFIX)
        .tempdir_in(staging_root)?;

    tracing::debug!(?archive, staging = ?staging.path(), "extracting archive");
    extract(archive, staging.path())?;

    let metadata_src = match common::project_files_in(staging.path())?.as_slice() {
        [] => return Err(ProjectError::MissingMetadata(archive.to_path_buf()).into()),
        [path] => path.clone(),
        _ => return Err(ProjectError::AmbiguousMetadata(archive.to_path_buf()).into()),
    };

    let statistics_src = common::statistics_file_of(staging.path());
    let statistics_src = statistics_src.is_file().then_some(statistics_src);

    let VersionDirectories { versions, ignored } = common::version_dirs_of(staging.path())?;
    for path in ignored {
        tracing::warn!(
            name = ?path.file_name(),
            ?archive,
            "archive directory is not a version, skipping"
        );
    }

    // collect moves, checking for conflicts before touching the target
    let mut moves = vec![(metadata_src, metadata_dst.clone())];
    if let Some(statistics_src) = statistics_src {
        moves.push((statistics_src, common::statistics_file_of(target_dir)));
    }

    for (_, path) in versions.iter() {
        if let Some(name) = path.file_name() {
            moves.push((path.clone(), target_dir.join(name)));
        }
    }

    if let Some((_, dst)) = moves.iter().find(|(_, dst)| dst.exists()) {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("`{}` already exists", dst.display()),
        )
        .into());
    }

    let mut rollback = Rollback::default();
    rollback.create_dir_all(target_dir)?;
    for (src, dst) in moves {
        if let Some(parent) = dst.parent() {
            rollback.create_dir_all(parent)?;
        }

        // recorded first so a partial copy is removed as well
        rollback.moved.push(dst.clone());
        tracing::debug!(?src, ?dst, "moving");
        if src.is_dir() {
            common::move_dir(&src, &dst)?;
        } else {
            common::move_file(&src, &dst)?;
        }
    }

    rollback.commit();
    if let Err(err) = staging.close() {
        tracing::warn!(?err, "could not remove staging directory");
    }

    tracing::info!(
        name = %options.name,
        project = ?target_dir,
        versions = versions.len(),
        "imported project"
    );

    Ok(ProjectConfiguration::new(options.name.clone(), metadata_dst))
}

/// Extracts every entry of the archive into `dst`.
fn extract(archive: &Path, dst: &Path) -> Result {
    let file = File::open(archive)?;
    let mut zip =
        ZipArchive::new(BufReader::new(file)).map_err(|err| ArchiveError::read(err.to_string()))?;

    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|err| ArchiveError::read(err.to_string()))?;

        let Some(rel_path) = entry.enclosed_name().map(|path| path.to_path_buf()) else {
            return Err(ArchiveError::InvalidEntryPath(entry.name().to_string()).into());
        };

        let out_path = dst.join(rel_path);
        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut out_file = File::create(&out_path)?;
        match io::copy(&mut entry, &mut out_file) {
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                return Err(ArchiveError::read(format!("{}: {err}", entry.name())).into());
            }
            Err(err) => return Err(err.into()),
        }

        if let Some(mode) = entry.unix_mode() {
            set_permissions(&out_path, mode)?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn set_permissions(path: &Path, mode: u32) -> Result {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_permissions(_path: &Path, _mode: u32) -> Result {
    Ok(())
}

/// Undoes the file system changes of a failed import when dropped, unless committed.
#[derive(Default)]
struct Rollback {
    /// Outermost directories created, in creation order.
    created_dirs: Vec<PathBuf>,
    moved: Vec<PathBuf>,
    committed: bool,
}

impl Rollback {
    /// Creates `dir` and its missing parents,
    /// recording the outermost directory that did not exist.
    fn create_dir_all(&mut self, dir: &Path) -> Result {
        let Some(outermost) = dir
            .ancestors()
            .take_while(|path| !path.as_os_str().is_empty() && !path.exists())
            .last()
        else {
            return Ok(());
        };

        let outermost = outermost.to_path_buf();
        fs::create_dir_all(dir)?;
        self.created_dirs.push(outermost);
        Ok(())
    }

    fn commit(&mut self) {
        self.committed = true;
    }
}

impl Drop for Rollback {
    fn drop(&mut self) {
        if self.committed {
            return;
        }

        for path in self.moved.iter().rev() {
            let res = if path.is_dir() {
                fs::remove_dir_all(path)
            } else if path.exists() {
                fs::remove_file(path)
            } else {
                Ok(())
            };

            if let Err(err) = res {
                tracing::error!(?path, ?err, "could not roll back import");
            }
        }

        for dir in self.created_dirs.iter().rev() {
            if !dir.exists() {
                continue;
            }

            if let Err(err) = fs::remove_dir_all(dir) {
                tracing::error!(?dir, ?err, "could not roll back import");
            }
        }
    }
}

// *****************
// *** Discovery ***
// *****************

/// Finds the metadata file at the root of a project directory.
///
/// If several metadata files exist, the one named after the directory is preferred.
///
/// # Errors
/// + [`ProjectError::AmbiguousMetadata`] if several metadata files exist
///   and none is named after the directory.
pub fn find_metadata_file(project_dir: &Path) -> Result<Option<PathBuf>> {
    let files = common::project_files_in(project_dir)?;
    match files.as_slice() {
        [] => Ok(None),
        [file] => Ok(Some(file.clone())),
        _ => {
            let preferred = project_dir
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| common::project_file_of(project_dir, name));

            match preferred {
                Some(preferred) if files.contains(&preferred) => Ok(Some(preferred)),
                _ => Err(ProjectError::AmbiguousMetadata(project_dir.to_path_buf()).into()),
            }
        }
    }
}

/// Versions present in a project directory, sorted.
pub fn versions_of(project_dir: &Path) -> Result<Vec<UpdateVersion>> {
    if !project_dir.is_dir() {
        return Err(Error::NotFound(project_dir.to_path_buf()));
    }

    let dirs = common::version_dirs_of(project_dir)?;
    Ok(dirs.versions.into_iter().map(|(version, _)| version).collect())
}

#[cfg(test)]
#[path = "./archive_test.rs"]
mod archive_test;
