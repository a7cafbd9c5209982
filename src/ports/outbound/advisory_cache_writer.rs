use crate::shared::Result;
use crate::source_analysis::domain::Database;
use std::path::Path;

/// AdvisoryCacheWriter port for persisting a vulnerability database
///
/// The layout written under `dir` is the one read by the analyzer:
/// `index/db.json`, `index/modules.json` and `ID/<id>.json`.
pub trait AdvisoryCacheWriter {
    /// Writes every endpoint of `db` under `dir`, creating directories
    ///
    /// # Errors
    /// Returns an error naming the endpoint path on the first failed write;
    /// remaining endpoints are not written.
    fn write(&self, db: &Database, dir: &Path) -> Result<()>;
}
