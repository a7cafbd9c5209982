use crate::shared::Result;
use crate::source_analysis::domain::Finding;
use async_trait::async_trait;
use std::path::Path;

/// FindingStreamProducer port for running a reachability analyzer
///
/// This port abstracts the external call-graph tool. Implementations run
/// the tool against a module root, using a pre-populated advisory cache as
/// its vulnerability database, and decode its finding stream.
///
/// # Errors
/// Implementations must distinguish two failure kinds through
/// `SourceAnalysisError`:
/// - `ToolUnavailable` - the tool or its toolchain could not be started
/// - `AnalysisFailed` - the tool ran but failed, or its output was undecodable
///
/// On a decode error no partial findings are returned.
#[async_trait]
pub trait FindingStreamProducer: Send + Sync {
    /// Short name of the invocation strategy, used in progress messages
    fn name(&self) -> &str;

    /// Runs the analyzer and returns every finding of the completed stream
    ///
    /// # Arguments
    /// * `module_root` - Directory of the module to analyse
    /// * `db_dir` - Directory holding the advisory cache (`index/`, `ID/`)
    async fn produce(&self, module_root: &Path, db_dir: &Path) -> Result<Vec<Finding>>;
}
