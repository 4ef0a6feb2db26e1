use std::path::{Path, PathBuf};

/// Where the last chosen journal directory is remembered between runs.
pub trait DirectorySettings {
    fn last_directory(&self) -> Option<PathBuf>;
    fn remember_directory(&mut self, directory: &Path) -> anyhow::Result<()>;
}

/// Settings that live only as long as the process, for tests and one-off runs
#[derive(Debug, Clone, Default)]
pub struct InMemorySettings {
    directory: Option<PathBuf>,
}

impl InMemorySettings {
    pub fn with_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
        }
    }
}

impl DirectorySettings for InMemorySettings {
    fn last_directory(&self) -> Option<PathBuf> {
        self.directory.clone()
    }

    fn remember_directory(&mut self, directory: &Path) -> anyhow::Result<()> {
        self.directory = Some(directory.to_path_buf());
        Ok(())
    }
}
