use crate::application::dto::InvocationStrategy;
use crate::source_analysis::domain::PackageSource;
use std::path::PathBuf;

/// AnalysisRequest - Internal request DTO for the reachability analysis use case
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// The scanned source and its vulnerable packages
    pub package_source: PackageSource,
    /// Which analyzer invocation to use for this call
    pub invocation: InvocationStrategy,
    /// Directory under which the per-run advisory cache is created
    /// (system temp directory when `None`)
    pub cache_root: Option<PathBuf>,
}

impl AnalysisRequest {
    pub fn new(package_source: PackageSource, invocation: InvocationStrategy) -> Self {
        Self {
            package_source,
            invocation,
            cache_root: None,
        }
    }

    pub fn with_cache_root(mut self, cache_root: PathBuf) -> Self {
        self.cache_root = Some(cache_root);
        self
    }
}
