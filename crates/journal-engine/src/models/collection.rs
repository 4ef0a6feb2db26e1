use super::EntryDescriptor;
use std::path::Path;

/// Ordered list of entries, newest first.
///
/// Replaced wholesale by a scan and grown only by prepending new entries;
/// editing an entry's text never changes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryCollection {
    entries: Vec<EntryDescriptor>,
}

impl EntryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from scan results in any order
    pub fn from_unsorted(mut entries: Vec<EntryDescriptor>) -> Self {
        entries.sort_by(EntryDescriptor::newest_first);
        Self { entries }
    }

    /// Put a new entry at the top of the list, regardless of its date
    pub fn prepend(&mut self, entry: EntryDescriptor) {
        self.entries.insert(0, entry);
    }

    pub fn get(&self, index: usize) -> Option<&EntryDescriptor> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntryDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position_of(&self, path: &Path) -> Option<usize> {
        self.entries.iter().position(|entry| entry.path() == path)
    }
}

impl<'a> IntoIterator for &'a EntryCollection {
    type Item = &'a EntryDescriptor;
    type IntoIter = std::slice::Iter<'a, EntryDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(name: &str) -> EntryDescriptor {
        EntryDescriptor::from_file_name(Path::new("/j"), name).unwrap()
    }

    fn titles(collection: &EntryCollection) -> Vec<&str> {
        collection.iter().map(|e| e.title()).collect()
    }

    #[test]
    fn test_new_collection_is_empty() {
        let collection = EntryCollection::new();
        assert!(collection.is_empty());
        assert_eq!(collection.len(), 0);
    }

    #[test]
    fn test_sorted_newest_first() {
        let collection = EntryCollection::from_unsorted(vec![
            entry("A_01-01-2024.md"),
            entry("C_15-06-2023.md"),
            entry("B_03-01-2024.md"),
        ]);

        assert_eq!(titles(&collection), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_undated_entries_go_last_in_name_order() {
        let collection = EntryCollection::from_unsorted(vec![
            entry("Zed_later.md"),
            entry("Old_01-01-1990.md"),
            entry("Abe_soon.md"),
        ]);

        assert_eq!(titles(&collection), vec!["Old", "Abe", "Zed"]);
    }

    #[test]
    fn test_prepend_puts_entry_first() {
        let mut collection = EntryCollection::from_unsorted(vec![entry("A_01-01-2024.md")]);
        collection.prepend(entry("Old_01-01-2000.md"));

        assert_eq!(titles(&collection), vec!["Old", "A"]);
    }

    #[test]
    fn test_position_of() {
        let collection = EntryCollection::from_unsorted(vec![
            entry("A_01-01-2024.md"),
            entry("B_03-01-2024.md"),
        ]);

        assert_eq!(
            collection.position_of(Path::new("/j/A_01-01-2024.md")),
            Some(1)
        );
        assert_eq!(collection.position_of(Path::new("/j/missing.md")), None);
    }
}
