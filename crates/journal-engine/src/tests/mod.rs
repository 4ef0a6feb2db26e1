use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary journal directory
pub fn create_test_journal_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test entry file with content
pub fn create_test_file(journal_dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = journal_dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}
