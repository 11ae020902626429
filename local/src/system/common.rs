//! Common implmentation for system functionality.
use directories::ProjectDirs;
use std::io;
use std::path::PathBuf;
use updraft_core::identifier::Identifier;

/// Returns directories for the user's Updraft.
pub fn system_dirs() -> Result<ProjectDirs, io::Error> {
    let dirs_opt = ProjectDirs::from(
        &Identifier::qualifier(),
        &Identifier::organization(),
        &Identifier::application(),
    );

    match dirs_opt {
        Some(dirs) => Ok(dirs),
        None => Err(io::Error::new(
            io::ErrorKind::NotFound,
            "system settings directory not found",
        )),
    }
}

/// Returns the path to the user's config directory for Updraft.
pub fn config_dir_path() -> Result<PathBuf, io::Error> {
    let dirs = system_dirs()?;
    let path = dirs.config_dir();
    Ok(path.to_path_buf())
}

/// Returns the path to the user's data directory for Updraft.
pub fn data_dir_path() -> Result<PathBuf, io::Error> {
    let dirs = system_dirs()?;
    let path = dirs.data_dir();
    Ok(path.to_path_buf())
}
