use crate::application::dto::{AnalysisRequest, AnalysisResponse};
use crate::shared::Result;
use async_trait::async_trait;

/// SourceAnalysisPort - Inbound port for the reachability analysis use case
///
/// This port defines the interface that external adapters (CLI, library
/// callers) use to annotate a scanned package source with reachability
/// verdicts.
#[async_trait(?Send)]
pub trait SourceAnalysisPort {
    /// Annotates the packages of `request` with reachability verdicts
    ///
    /// Analysis failures do not fail the call: the packages come back
    /// unannotated and `AnalysisResponse::analysis_error` says why.
    ///
    /// # Errors
    /// Returns an error only for failures outside the analysis itself.
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse>;
}
