use osv_reachability::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock AdvisoryCacheWriter recording what it was asked to write
///
/// Unless configured to fail, it delegates to the real filesystem writer so
/// producers can inspect the cache.
#[derive(Default, Clone)]
pub struct MockCacheWriter {
    pub should_fail: bool,
    pub writes: Arc<Mutex<Vec<(PathBuf, Vec<String>)>>>,
}

impl MockCacheWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    /// Entry IDs of every write, in call order
    pub fn written_ids(&self) -> Vec<Vec<String>> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .map(|(_, ids)| ids.clone())
            .collect()
    }

    pub fn written_dirs(&self) -> Vec<PathBuf> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .map(|(dir, _)| dir.clone())
            .collect()
    }
}

impl AdvisoryCacheWriter for MockCacheWriter {
    fn write(&self, db: &Database, dir: &Path) -> Result<()> {
        let ids = db.entries().iter().map(|v| v.id.clone()).collect();
        self.writes.lock().unwrap().push((dir.to_path_buf(), ids));
        if self.should_fail {
            anyhow::bail!("Mock cache write failure");
        }
        FileSystemVulnDbWriter::new().write(db, dir)
    }
}
