use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// BuildDatabaseResponse - What was written by a database build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDatabaseResponse {
    pub output_dir: PathBuf,
    pub entries: usize,
    pub modules: usize,
    /// Database-wide modification time (latest entry `modified`)
    pub modified: DateTime<Utc>,
}

impl BuildDatabaseResponse {
    /// One-line summary for the console
    pub fn summary(&self) -> String {
        format!(
            "Wrote {} advisory entries for {} module(s) to {} (modified {})",
            self.entries,
            self.modules,
            self.output_dir.display(),
            self.modified.to_rfc3339()
        )
    }
}
