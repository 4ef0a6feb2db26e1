use std::path::PathBuf;

/// Inbound signals from a front end: menu items, shortcuts, clicks and
/// keystrokes all arrive as one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// The user picked a journal directory
    OpenFolderSelected(PathBuf),
    /// Save shortcut or menu item
    SaveRequested,
    SelectEntry(usize),
    /// Full replacement text from the editor widget
    EditBuffer(String),
    /// Create a dated entry with the given title
    NewEntry(String),
}
