use crate::source_analysis::domain::PackageSource;
use crate::source_analysis::services::MatchSummary;

/// AnalysisResponse - Internal response DTO from the reachability analysis use case
#[derive(Debug, Clone)]
pub struct AnalysisResponse {
    /// The source with its packages, annotated when analysis succeeded
    pub package_source: PackageSource,
    /// Verdict counts, present when matching ran
    pub summary: Option<MatchSummary>,
    /// Why enrichment was skipped or failed, if it was
    pub analysis_error: Option<String>,
}

impl AnalysisResponse {
    pub fn analyzed(package_source: PackageSource, summary: MatchSummary) -> Self {
        Self {
            package_source,
            summary: Some(summary),
            analysis_error: None,
        }
    }

    pub fn skipped(package_source: PackageSource) -> Self {
        Self {
            package_source,
            summary: None,
            analysis_error: None,
        }
    }

    pub fn degraded(package_source: PackageSource, error: String) -> Self {
        Self {
            package_source,
            summary: None,
            analysis_error: Some(error),
        }
    }

    pub fn is_analyzed(&self) -> bool {
        self.summary.is_some()
    }
}
