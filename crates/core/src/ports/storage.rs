use anyhow::{anyhow, Result};
use std::sync::Mutex;

/// Backing storage for whole-collection snapshots.
///
/// Every write replaces the previous contents entirely. Implementations do
/// not lock or merge; concurrent writers race and the last one wins.
pub trait SnapshotStorage: Send + Sync {
    /// Read the current snapshot, or `None` if nothing has been stored yet
    fn read(&self) -> Result<Option<String>>;

    /// Overwrite the snapshot
    fn write(&self, contents: &str) -> Result<()>;

    /// Human-readable location for diagnostics
    fn location(&self) -> String;
}

/// In-memory storage, mainly for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStorage {
    contents: Mutex<Option<String>>,
    writes: Mutex<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(contents.into())),
            writes: Mutex::new(0),
        }
    }

    /// Current snapshot, if any
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }

    /// Number of writes performed so far
    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|w| *w).unwrap_or_default()
    }
}

impl SnapshotStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        let contents = self
            .contents
            .lock()
            .map_err(|_| anyhow!("memory storage lock poisoned"))?;
        Ok(contents.clone())
    }

    fn write(&self, contents: &str) -> Result<()> {
        *self
            .contents
            .lock()
            .map_err(|_| anyhow!("memory storage lock poisoned"))? = Some(contents.to_string());
        *self
            .writes
            .lock()
            .map_err(|_| anyhow!("memory storage lock poisoned"))? += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_starts_empty() -> Result<()> {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read()?, None);
        assert_eq!(storage.write_count(), 0);
        Ok(())
    }

    #[test]
    fn test_memory_storage_overwrites() -> Result<()> {
        let storage = MemoryStorage::with_contents("old");
        storage.write("new")?;
        assert_eq!(storage.read()?, Some("new".to_string()));
        assert_eq!(storage.contents(), Some("new".to_string()));
        assert_eq!(storage.write_count(), 1);
        Ok(())
    }
}
