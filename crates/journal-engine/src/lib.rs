pub mod io;
pub mod models;
pub mod preview;
pub mod session;
pub mod settings;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use io::{EntryStorage, FileStorage, IoError};
pub use models::{EntryCollection, EntryDescriptor, EntryNameError};
pub use session::{
    ActiveSession, Command, Journal, JournalState, Notice, NoticeLevel, SessionError,
};
pub use settings::{DirectorySettings, InMemorySettings};
