use crate::ports::outbound::AdvisoryCacheWriter;
use crate::shared::error::SourceAnalysisError;
use crate::shared::security::{validate_entry_file_name, validate_not_symlink};
use crate::shared::Result;
use crate::source_analysis::domain::Database;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

const INDEX_DIR: &str = "index";
const ID_DIR: &str = "ID";
const DB_ENDPOINT: &str = "db.json";
const MODULES_ENDPOINT: &str = "modules.json";

/// FileSystemVulnDbWriter adapter for writing the advisory cache
///
/// This adapter implements the AdvisoryCacheWriter port with the layout
/// read by govulncheck:
///
/// ```text
/// <dir>/index/db.json        {"modified": ...}
/// <dir>/index/modules.json   [{"path": ..., "vulns": [...]}]
/// <dir>/ID/<id>.json         full advisory entry
/// ```
pub struct FileSystemVulnDbWriter;

impl FileSystemVulnDbWriter {
    pub fn new() -> Self {
        Self
    }

    fn write_index(&self, db: &Database, dir: &Path) -> Result<()> {
        create_dir(dir)?;
        write_json(&dir.join(DB_ENDPOINT), db.db())?;
        write_json(&dir.join(MODULES_ENDPOINT), db.modules())
    }

    fn write_entries(&self, db: &Database, dir: &Path) -> Result<()> {
        create_dir(dir)?;
        for entry in db.entries() {
            write_json(&dir.join(format!("{}.json", entry.id)), entry)?;
        }
        Ok(())
    }
}

impl Default for FileSystemVulnDbWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl AdvisoryCacheWriter for FileSystemVulnDbWriter {
    #[instrument(skip(self, db), fields(dir = %dir.display(), entries = db.entries().len()))]
    fn write(&self, db: &Database, dir: &Path) -> Result<()> {
        if fs::symlink_metadata(dir).is_ok() {
            validate_not_symlink(dir, "write")?;
        }
        // Reject unusable IDs before touching the filesystem
        for entry in db.entries() {
            validate_entry_file_name(&entry.id)?;
        }

        self.write_index(db, &dir.join(INDEX_DIR))?;
        self.write_entries(db, &dir.join(ID_DIR))?;

        debug!(modules = db.modules().len(), "advisory cache written");
        Ok(())
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| SourceAnalysisError::io(dir, e))?;
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec(value).map_err(|e| SourceAnalysisError::serialization(path, e))?;
    fs::write(path, bytes).map_err(|e| SourceAnalysisError::io(path, e))?;
    Ok(())
}
