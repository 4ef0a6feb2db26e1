use chrono::NaiveDate;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// Date format used when naming new entries, e.g. `19-10-2026`.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Formats tried in order when reading the date back out of a file name.
const ACCEPTED_DATE_FORMATS: &[&str] = &[DATE_FORMAT, "%Y-%m-%d", "%d/%m/%Y"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryNameError {
    #[error("'{0}' is not a markdown file")]
    NotMarkdown(String),
    #[error("'{0}' has no '_' separating title and date")]
    MissingSeparator(String),
    #[error("'{0}' has an empty title")]
    EmptyTitle(String),
    #[error("'{0}' has no extension after the date")]
    MissingExtension(String),
}

/// A journal entry as discovered on disk: `<title>_<date>.md`.
///
/// Title and date are derived from the file name once at scan time and are
/// never written anywhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDescriptor {
    title: String,
    date: String,
    parsed_date: Option<NaiveDate>,
    path: PathBuf,
}

impl EntryDescriptor {
    /// Parse a file name found in `directory` into a descriptor.
    pub fn from_file_name(directory: &Path, file_name: &str) -> Result<Self, EntryNameError> {
        if !file_name.contains(".md") {
            return Err(EntryNameError::NotMarkdown(file_name.to_string()));
        }

        let (title, rest) = file_name
            .split_once('_')
            .ok_or_else(|| EntryNameError::MissingSeparator(file_name.to_string()))?;
        if title.is_empty() {
            return Err(EntryNameError::EmptyTitle(file_name.to_string()));
        }

        let (date, _extension) = rest
            .split_once('.')
            .ok_or_else(|| EntryNameError::MissingExtension(file_name.to_string()))?;

        Ok(Self {
            title: title.to_string(),
            date: date.to_string(),
            parsed_date: parse_date(date),
            path: directory.join(file_name),
        })
    }

    /// Descriptor for a freshly named entry; the caller owns creating the file.
    pub fn for_new_entry(directory: &Path, title: &str, date: NaiveDate) -> Self {
        let date_text = date.format(DATE_FORMAT).to_string();
        let path = directory.join(format!("{title}_{date_text}.md"));
        Self {
            title: title.to_string(),
            date: date_text,
            parsed_date: Some(date),
            path,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The date text exactly as it appears in the file name
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.parsed_date
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Newest first. Unparsable dates count as the earliest possible date,
    /// and equal dates fall back to file name so the order is total.
    pub fn newest_first(a: &Self, b: &Self) -> Ordering {
        b.parsed_date
            .cmp(&a.parsed_date)
            .then_with(|| a.file_name().cmp(&b.file_name()))
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    ACCEPTED_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_well_formed_name() {
        let entry = EntryDescriptor::from_file_name(Path::new("/journal"), "Holiday_03-01-2024.md")
            .unwrap();

        assert_eq!(entry.title(), "Holiday");
        assert_eq!(entry.date(), "03-01-2024");
        assert_eq!(entry.parsed_date(), Some(ymd(2024, 1, 3)));
        assert_eq!(entry.path(), Path::new("/journal/Holiday_03-01-2024.md"));
    }

    #[test]
    fn test_title_stops_at_first_underscore() {
        let entry =
            EntryDescriptor::from_file_name(Path::new("/j"), "Trip_part_01-02-2024.md").unwrap();

        assert_eq!(entry.title(), "Trip");
        assert_eq!(entry.date(), "part_01-02-2024");
        assert_eq!(entry.parsed_date(), None);
    }

    #[rstest]
    #[case("2024-05-06", Some((2024, 5, 6)))]
    #[case("06-05-2024", Some((2024, 5, 6)))]
    #[case("06/05/2024", Some((2024, 5, 6)))]
    #[case("someday", None)]
    #[case("31-02-2024", None)]
    fn test_date_formats(#[case] date: &str, #[case] expected: Option<(i32, u32, u32)>) {
        let name = format!("Note_{date}.md");
        let entry = EntryDescriptor::from_file_name(Path::new("/j"), &name).unwrap();
        assert_eq!(
            entry.parsed_date(),
            expected.map(|(y, m, d)| ymd(y, m, d))
        );
    }

    #[rstest]
    #[case("notes.txt", EntryNameError::NotMarkdown("notes.txt".to_string()))]
    #[case("README.md", EntryNameError::MissingSeparator("README.md".to_string()))]
    #[case("_01-01-2024.md", EntryNameError::EmptyTitle("_01-01-2024.md".to_string()))]
    #[case("a.md_x", EntryNameError::MissingExtension("a.md_x".to_string()))]
    #[case("x.md.bak_01-01-2024", EntryNameError::MissingExtension("x.md.bak_01-01-2024".to_string()))]
    fn test_rejects_malformed_names(#[case] name: &str, #[case] expected: EntryNameError) {
        assert_eq!(
            EntryDescriptor::from_file_name(Path::new("/j"), name),
            Err(expected)
        );
    }

    #[test]
    fn test_new_entry_uses_display_format() {
        let entry = EntryDescriptor::for_new_entry(Path::new("/j"), "Foo", ymd(2024, 1, 1));

        assert_eq!(entry.date(), "01-01-2024");
        assert_eq!(entry.path(), Path::new("/j/Foo_01-01-2024.md"));
        assert_eq!(entry.file_name(), "Foo_01-01-2024.md");
    }

    #[test]
    fn test_unparsable_dates_sort_last() {
        let dir = Path::new("/j");
        let dated = EntryDescriptor::from_file_name(dir, "A_01-01-1970.md").unwrap();
        let undated = EntryDescriptor::from_file_name(dir, "B_whenever.md").unwrap();

        assert_eq!(
            EntryDescriptor::newest_first(&dated, &undated),
            Ordering::Less
        );
    }
}
