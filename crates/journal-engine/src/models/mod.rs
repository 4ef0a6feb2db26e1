pub mod collection;
pub mod entry;

pub use collection::EntryCollection;
pub use entry::{DATE_FORMAT, EntryDescriptor, EntryNameError};
