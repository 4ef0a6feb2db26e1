use crate::models::{EntryCollection, EntryDescriptor};
use chrono::NaiveDate;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Cannot list journal directory {path}: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot read entry {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot write entry {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("An entry already exists at {0}")]
    EntryExists(PathBuf),
    #[error("Invalid entry title '{0}': must be non-empty and contain no '_' or path separators")]
    InvalidTitle(String),
    #[error("Invalid journal directory: {0}")]
    InvalidJournalDir(String),
}

/// The read/write surface the editing session talks to.
///
/// Stateless and keyed by path; [`FileStorage`] is the real filesystem.
pub trait EntryStorage {
    fn scan(&self, directory: &Path) -> Result<EntryCollection, IoError>;
    fn load(&self, path: &Path) -> Result<String, IoError>;
    fn save(&self, path: &Path, text: &str) -> Result<(), IoError>;
    fn create(
        &self,
        directory: &Path,
        title: &str,
        date: NaiveDate,
    ) -> Result<EntryDescriptor, IoError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileStorage;

impl EntryStorage for FileStorage {
    fn scan(&self, directory: &Path) -> Result<EntryCollection, IoError> {
        scan_entries(directory)
    }

    fn load(&self, path: &Path) -> Result<String, IoError> {
        read_entry(path)
    }

    fn save(&self, path: &Path, text: &str) -> Result<(), IoError> {
        write_entry(path, text)
    }

    fn create(
        &self,
        directory: &Path,
        title: &str,
        date: NaiveDate,
    ) -> Result<EntryDescriptor, IoError> {
        create_entry(directory, title, date)
    }
}

/// List `directory` and build the entry collection, newest first.
///
/// Only direct children whose name contains `.md` are considered. Names that
/// don't follow `<title>_<date>.md` are skipped with a warning.
pub fn scan_entries(directory: &Path) -> Result<EntryCollection, IoError> {
    let unreadable = |source| IoError::DirectoryUnreadable {
        path: directory.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for dir_entry in fs::read_dir(directory).map_err(unreadable)? {
        let dir_entry = dir_entry.map_err(unreadable)?;
        if dir_entry.path().is_dir() {
            continue;
        }

        let file_name = dir_entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            log::warn!("Skipping non UTF-8 file name {:?}", dir_entry.path());
            continue;
        };
        if !file_name.contains(".md") {
            continue;
        }

        match EntryDescriptor::from_file_name(directory, file_name) {
            Ok(entry) => entries.push(entry),
            Err(e) => log::warn!("Skipping {file_name}: {e}"),
        }
    }

    log::debug!("Found {} entries in {}", entries.len(), directory.display());
    Ok(EntryCollection::from_unsorted(entries))
}

/// Read the full text of an entry
pub fn read_entry(path: &Path) -> Result<String, IoError> {
    fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace the content of an entry.
///
/// Written to a temporary file next to the real file and renamed over it, so
/// a crash never leaves a truncated entry behind. Symlinks are followed and
/// the existing permissions are carried over to the new file.
pub fn write_entry(path: &Path, text: &str) -> Result<(), IoError> {
    let write_error = |source| IoError::Write {
        path: path.to_path_buf(),
        source,
    };

    let (target, permissions) = if path.exists() {
        let target = fs::canonicalize(path).map_err(write_error)?;
        let permissions = fs::metadata(&target).map_err(write_error)?.permissions();
        (target, Some(permissions))
    } else {
        (path.to_path_buf(), None)
    };

    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent).map_err(write_error)?;
    temp.write_all(text.as_bytes()).map_err(write_error)?;
    if let Some(permissions) = permissions {
        temp.as_file()
            .set_permissions(permissions)
            .map_err(write_error)?;
    }
    temp.as_file().sync_all().map_err(write_error)?;
    temp.persist(&target).map_err(|e| write_error(e.error))?;
    Ok(())
}

/// Create an empty entry named `<title>_<date>.md` in `directory`.
///
/// Refuses to touch an existing file rather than overwriting it.
pub fn create_entry(
    directory: &Path,
    title: &str,
    date: NaiveDate,
) -> Result<EntryDescriptor, IoError> {
    let title = title.trim();
    if !is_valid_title(title) {
        return Err(IoError::InvalidTitle(title.to_string()));
    }

    let entry = EntryDescriptor::for_new_entry(directory, title, date);
    match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(entry.path())
    {
        Ok(_) => {
            log::info!("Created entry {}", entry.path().display());
            Ok(entry)
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            Err(IoError::EntryExists(entry.path().to_path_buf()))
        }
        Err(source) => Err(IoError::Write {
            path: entry.path().to_path_buf(),
            source,
        }),
    }
}

fn is_valid_title(title: &str) -> bool {
    !title.is_empty() && !title.contains(['_', '/', '\\'])
}

pub fn validate_journal_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidJournalDir(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    Ok(())
}
