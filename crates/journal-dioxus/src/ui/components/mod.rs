pub mod entry_list;
pub mod preview_pane;
pub mod status_bar;
pub mod toolbar;

pub use entry_list::EntryList;
pub use preview_pane::PreviewPane;
pub use status_bar::StatusBar;
pub use toolbar::Toolbar;
