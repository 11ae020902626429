//! Hand built archives for exercising import edge cases.
use crate::Result;
use std::fs;
use std::io::Write;
use std::path::Path;
use zip::write::FileOptions;
use zip::ZipWriter;

/// Entry of a hand built archive.
pub enum Entry<'a> {
    File(&'a str, &'a [u8]),
    Dir(&'a str),
}

/// Writes a zip archive at `path` containing exactly `entries`, in order.
pub fn write_archive(path: &Path, entries: &[Entry]) -> Result {
    let file = fs::File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default();
    for entry in entries {
        match entry {
            Entry::File(name, contents) => {
                zip.start_file(*name, options)?;
                zip.write_all(contents)?;
            }

            Entry::Dir(name) => zip.add_directory(*name, options)?,
        }
    }

    zip.finish()?;
    Ok(())
}

/// Names of all entries in the archive at `path`, sorted.
pub fn entry_names(path: &Path) -> Result<Vec<String>> {
    let file = fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut names = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        names.push(archive.by_index(index)?.name().to_string());
    }

    names.sort();
    Ok(names)
}
