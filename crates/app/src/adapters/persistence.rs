use anyhow::{Context, Result};
use gradecalc_core::ports::SnapshotStorage;
use std::fs;
use std::path::{Path, PathBuf};

/// Default backing file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "classes.txt";

/// Flat-file storage that implements SnapshotStorage.
///
/// Each write truncates and rewrites the file in place. There is no
/// temp-file-and-rename step, so a crash mid-write can leave a truncated file.
#[derive(Debug, Clone)]
pub struct FileSnapshotStorage {
    data_path: PathBuf,
}

impl FileSnapshotStorage {
    pub fn new() -> Self {
        Self::with_path(DEFAULT_DATA_FILE)
    }

    pub fn with_path<P: AsRef<Path>>(data_path: P) -> Self {
        Self {
            data_path: data_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.data_path
    }
}

impl SnapshotStorage for FileSnapshotStorage {
    fn read(&self) -> Result<Option<String>> {
        if !self.data_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.data_path)
            .with_context(|| format!("Failed to read data file: {}", self.data_path.display()))?;
        Ok(Some(contents))
    }

    fn write(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.data_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
            }
        }

        fs::write(&self.data_path, contents)
            .with_context(|| format!("Failed to write data file: {}", self.data_path.display()))?;
        Ok(())
    }

    fn location(&self) -> String {
        self.data_path.display().to_string()
    }
}

impl Default for FileSnapshotStorage {
    fn default() -> Self {
        Self::new()
    }
}
