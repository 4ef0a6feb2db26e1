//! Single-document editing session over a journal directory.
//!
//! [`Journal`] owns the entry collection and the one active buffer. Every
//! transition runs to completion on the caller's thread; the front end feeds
//! it [`Command`]s and re-reads its state to draw the sidebar, editor and
//! preview.

pub mod command;

pub use command::Command;

use crate::io::{EntryStorage, FileStorage, IoError};
use crate::models::{EntryCollection, EntryDescriptor};
use crate::settings::DirectorySettings;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("No journal directory is open")]
    NoDirectory,
    #[error("No entry is selected")]
    NoActiveEntry,
    #[error("Entry {index} does not exist (journal has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Io(#[from] IoError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalState {
    NoDirectory,
    DirectoryLoaded,
    EntrySelected,
}

/// The entry currently loaded into the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    index: usize,
    buffer: String,
    dirty: bool,
}

impl ActiveSession {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Edited since the last load or save. Display only; switching entries
    /// always flushes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Latest outcome worth showing the user, e.g. in a status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

pub struct Journal<S: EntryStorage = FileStorage> {
    storage: S,
    directory: Option<PathBuf>,
    entries: EntryCollection,
    active: Option<ActiveSession>,
    notice: Option<Notice>,
}

impl<S: EntryStorage> Journal<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            directory: None,
            entries: EntryCollection::new(),
            active: None,
            notice: None,
        }
    }

    /// Open the remembered directory, if there is one.
    pub fn startup(storage: S, settings: &dyn DirectorySettings) -> Self {
        let mut journal = Self::new(storage);
        if let Some(directory) = settings.last_directory() {
            log::info!("Reopening journal at {}", directory.display());
            journal.load_directory(directory);
        }
        journal
    }

    pub fn state(&self) -> JournalState {
        match (&self.directory, &self.active) {
            (None, _) => JournalState::NoDirectory,
            (Some(_), None) => JournalState::DirectoryLoaded,
            (Some(_), Some(_)) => JournalState::EntrySelected,
        }
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn entries(&self) -> &EntryCollection {
        &self.entries
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    pub fn active_entry(&self) -> Option<&EntryDescriptor> {
        self.active
            .as_ref()
            .and_then(|active| self.entries.get(active.index))
    }

    /// Text of the active entry, empty when nothing is selected
    pub fn buffer(&self) -> &str {
        self.active.as_ref().map_or("", |active| active.buffer())
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Dispatch an inbound command. Failures are already logged and left in
    /// [`Journal::notice`], so the front end doesn't need the result.
    pub fn handle(&mut self, command: Command, settings: &mut dyn DirectorySettings) {
        log::debug!("Handling {command:?}");
        let result = match command {
            Command::OpenFolderSelected(directory) => {
                self.choose_directory(directory, settings);
                Ok(())
            }
            Command::SaveRequested => self.request_save(),
            Command::SelectEntry(index) => self.select_entry(index),
            Command::EditBuffer(text) => self.edit_buffer(text),
            Command::NewEntry(title) => self.create_new_entry(&title),
        };
        if let Err(e) = result {
            log::debug!("Command failed: {e}");
        }
    }

    /// Switch to a new journal directory and remember it for next time.
    ///
    /// The active entry is flushed first; if that fails the current
    /// directory stays open. An unreadable directory loads as an empty
    /// journal.
    pub fn choose_directory(
        &mut self,
        directory: impl Into<PathBuf>,
        settings: &mut dyn DirectorySettings,
    ) {
        let directory = directory.into();
        if self.flush_active().is_err() {
            log::warn!(
                "Not switching to {} with unsaved changes",
                directory.display()
            );
            return;
        }
        self.active = None;

        if let Err(e) = settings.remember_directory(&directory) {
            log::error!("Failed to remember directory {}: {e}", directory.display());
            self.notice = Some(Notice::error(format!(
                "Could not remember {}: {e}",
                directory.display()
            )));
        }
        self.load_directory(directory);
    }

    fn load_directory(&mut self, directory: PathBuf) {
        self.active = None;
        self.entries = match self.storage.scan(&directory) {
            Ok(entries) => entries,
            Err(e) => {
                self.report(e.into());
                EntryCollection::new()
            }
        };
        log::info!(
            "Loaded {} entries from {}",
            self.entries.len(),
            directory.display()
        );
        self.directory = Some(directory);

        if !self.entries.is_empty() {
            let _ = self.select_entry(0);
        }
    }

    /// Make `index` the active entry, flushing the outgoing one first.
    ///
    /// Selecting the already active entry does nothing. If the outgoing flush
    /// fails the switch is abandoned so its text stays in the editor; if the
    /// incoming load fails the previous session is kept.
    pub fn select_entry(&mut self, index: usize) -> Result<(), SessionError> {
        let len = self.entries.len();
        let Some(entry) = self.entries.get(index) else {
            return Err(self.report(SessionError::IndexOutOfRange { index, len }));
        };
        if self.active.as_ref().is_some_and(|a| a.index == index) {
            return Ok(());
        }
        let path = entry.path().to_path_buf();

        self.flush_active()?;

        match self.storage.load(&path) {
            Ok(buffer) => {
                self.active = Some(ActiveSession {
                    index,
                    buffer,
                    dirty: false,
                });
                Ok(())
            }
            Err(e) => Err(self.report(e.into())),
        }
    }

    /// Replace the in-memory text of the active entry. No disk access.
    pub fn edit_buffer(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        let Some(active) = self.active.as_mut() else {
            return Err(self.report(SessionError::NoActiveEntry));
        };
        active.buffer = text.into();
        active.dirty = true;
        Ok(())
    }

    /// Write the active buffer to its file.
    pub fn request_save(&mut self) -> Result<(), SessionError> {
        if self.active.is_none() {
            return Err(self.report(SessionError::NoActiveEntry));
        }
        self.flush_active()?;
        if let Some(file_name) = self.active_entry().map(|entry| entry.file_name()) {
            self.notice = Some(Notice::info(format!("Saved {file_name}")));
        }
        Ok(())
    }

    /// Create an entry dated today and make it active with an empty buffer.
    pub fn create_new_entry(&mut self, title: &str) -> Result<(), SessionError> {
        self.create_new_entry_on(title, Local::now().date_naive())
    }

    pub fn create_new_entry_on(&mut self, title: &str, date: NaiveDate) -> Result<(), SessionError> {
        let Some(directory) = self.directory.clone() else {
            return Err(self.report(SessionError::NoDirectory));
        };

        self.flush_active()?;

        let entry = match self.storage.create(&directory, title, date) {
            Ok(entry) => entry,
            Err(e) => return Err(self.report(e.into())),
        };
        self.notice = Some(Notice::info(format!("Created {}", entry.file_name())));
        self.entries.prepend(entry);
        self.active = Some(ActiveSession {
            index: 0,
            buffer: String::new(),
            dirty: false,
        });
        Ok(())
    }

    /// Flush before the front end goes away.
    pub fn close(&mut self) -> Result<(), SessionError> {
        self.flush_active()
    }

    fn flush_active(&mut self) -> Result<(), SessionError> {
        let Some(active) = self.active.as_mut() else {
            return Ok(());
        };
        let Some(entry) = self.entries.get(active.index) else {
            return Ok(());
        };

        match self.storage.save(entry.path(), &active.buffer) {
            Ok(()) => {
                log::info!("Saved {}", entry.path().display());
                active.dirty = false;
                Ok(())
            }
            Err(e) => Err(self.report(e.into())),
        }
    }

    fn report(&mut self, error: SessionError) -> SessionError {
        log::error!("{error}");
        self.notice = Some(Notice::error(error.to_string()));
        error
    }
}
