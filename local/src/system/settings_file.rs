//! Exclusive access to system files.
//!
//! Files shared by every process of the user, such as the project registry,
//! are only read for modification and written while holding an exclusive lock.
use crate::Result;
use cluFlock::{ExclusiveFlock, FlockLock};
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Read, Seek};
use std::path::Path;

/// Returns a file opened for reading and writing, ensuring it exists by creating it if needed.
pub fn ensure_file(path: &Path) -> Result<File, io::Error> {
    let Some(dir) = path.parent() else {
        return Err(io::Error::new(io::ErrorKind::NotFound, "invalid path"));
    };

    fs::create_dir_all(dir)?;
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
}

/// Obtain an exclusive file lock, waiting until it is available.
/// The lock is released when the returned guard is dropped.
pub fn lock(file: File) -> Result<FlockLock<File>, io::Error> {
    ExclusiveFlock::wait_lock(file).map_err(|err| err.into_err())
}

/// Opens and locks the file at `path`, creating it if needed.
pub fn lock_path(path: &Path) -> Result<FlockLock<File>, io::Error> {
    let file = ensure_file(path)?;
    lock(file)
}

/// Reads the contents of a locked file.
/// An empty file results in the default value.
pub fn read_locked<T: DeserializeOwned + Default>(file_lock: &FlockLock<File>) -> Result<T> {
    let mut file: &File = file_lock;
    file.rewind()?;

    let mut contents = String::new();
    BufReader::new(file).read_to_string(&mut contents)?;
    if contents.trim().is_empty() {
        return Ok(T::default());
    }

    Ok(serde_json::from_str(&contents)?)
}

/// Replaces the contents of a locked file.
pub fn write_locked<T: Serialize>(file_lock: &FlockLock<File>, value: &T) -> Result {
    let mut file: &File = file_lock;

    // delete all data
    file.set_len(0)?;
    file.rewind()?;

    serde_json::to_writer_pretty(file, value)?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
#[path = "./settings_file_test.rs"]
mod settings_file_test;
