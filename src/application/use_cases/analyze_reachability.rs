use crate::application::dto::{AnalysisRequest, AnalysisResponse, InvocationStrategy};
use crate::ports::inbound::SourceAnalysisPort;
use crate::ports::outbound::{AdvisoryCacheWriter, FindingStreamProducer, ProgressReporter};
use crate::shared::error::SourceAnalysisError;
use crate::shared::Result;
use crate::source_analysis::domain::{results_by_vuln_id, Database, PackageSource, PackageVulns};
use crate::source_analysis::services::{MatchSummary, ReachabilityMatcher, VulnerabilityCollector};
use async_trait::async_trait;
use std::path::Path;
use tempfile::TempDir;
use tracing::{debug, info, instrument, warn};

/// Prefix of the per-run advisory cache directory
const CACHE_DIR_PREFIX: &str = "osv-vulndb-";

/// AnalyzeReachabilityUseCase - Annotates scanned Go packages with
/// reachability verdicts
///
/// For a `go.mod` source the advisories attached to its packages are written
/// to a fresh cache directory, govulncheck runs against the module using that
/// cache as its database, and the findings are matched back onto the
/// package groups.
///
/// Enrichment is best effort: any failure is reported and the packages are
/// returned unannotated.
///
/// # Type Parameters
/// * `W` - AdvisoryCacheWriter implementation
/// * `L` - FindingStreamProducer for the legacy invocation
/// * `S` - FindingStreamProducer for the streaming invocation
/// * `PR` - ProgressReporter implementation
pub struct AnalyzeReachabilityUseCase<W, L, S, PR> {
    cache_writer: W,
    legacy_producer: L,
    streaming_producer: S,
    progress_reporter: PR,
}

impl<W, L, S, PR> AnalyzeReachabilityUseCase<W, L, S, PR>
where
    W: AdvisoryCacheWriter,
    L: FindingStreamProducer,
    S: FindingStreamProducer,
    PR: ProgressReporter,
{
    /// Creates a new AnalyzeReachabilityUseCase with injected dependencies
    pub fn new(cache_writer: W, legacy_producer: L, streaming_producer: S, progress_reporter: PR) -> Self {
        Self {
            cache_writer,
            legacy_producer,
            streaming_producer,
            progress_reporter,
        }
    }

    /// Executes the reachability analysis use case
    ///
    /// # Returns
    /// The (possibly annotated) package source. Analysis failures are carried
    /// in `AnalysisResponse::analysis_error`, never returned as `Err`.
    #[instrument(skip_all, fields(source = %request.package_source.source.path, invocation = %request.invocation))]
    pub async fn execute(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        let AnalysisRequest {
            package_source,
            invocation,
            cache_root,
        } = request;

        if !package_source.source.is_go_module() {
            debug!("not a go.mod lockfile source, skipping reachability analysis");
            return Ok(AnalysisResponse::skipped(package_source));
        }
        if !has_groups(&package_source.packages) {
            debug!("no vulnerability groups to annotate");
            return Ok(AnalysisResponse::skipped(package_source));
        }

        let PackageSource {
            source,
            mut packages,
        } = package_source;

        let outcome = self
            .enrich(
                &mut packages,
                source.module_root(),
                invocation,
                cache_root.as_deref(),
            )
            .await;
        let package_source = PackageSource { source, packages };

        match outcome {
            Ok(summary) => {
                info!(
                    called = summary.called,
                    not_called = summary.not_called,
                    unknown = summary.unknown,
                    "reachability analysis complete"
                );
                self.progress_reporter.report_completion(&format!(
                    "✅ Reachability analysis: {} called, {} not called, {} unknown",
                    summary.called, summary.not_called, summary.unknown
                ));
                Ok(AnalysisResponse::analyzed(package_source, summary))
            }
            Err(e) => {
                let message = self.report_failure(&package_source.source.path, &e);
                Ok(AnalysisResponse::degraded(package_source, message))
            }
        }
    }

    fn producer(&self, invocation: InvocationStrategy) -> &dyn FindingStreamProducer {
        match invocation {
            InvocationStrategy::Legacy => &self.legacy_producer,
            InvocationStrategy::Streaming => &self.streaming_producer,
        }
    }

    /// Builds and writes the advisory cache, runs the analyzer and matches
    /// its findings. `packages` is only modified once every step before the
    /// matching succeeded.
    async fn enrich(
        &self,
        packages: &mut [PackageVulns],
        module_root: &Path,
        invocation: InvocationStrategy,
        cache_root: Option<&Path>,
    ) -> Result<MatchSummary> {
        let vulns_by_id = VulnerabilityCollector::collect(packages);
        let db = Database::new(VulnerabilityCollector::flatten(&vulns_by_id))?;
        debug!(entries = db.entries().len(), modules = db.modules().len(), "database built");

        // Removed when dropped, on every path out of this function
        let cache_dir = create_cache_dir(cache_root)?;
        self.cache_writer.write(&db, cache_dir.path())?;

        let producer = self.producer(invocation);
        self.progress_reporter.begin_activity(&format!(
            "🔍 Running {} on {}",
            producer.name(),
            module_root.display()
        ));
        let findings = producer.produce(module_root, cache_dir.path()).await?;
        debug!(findings = findings.len(), "analyzer finished");

        let results = results_by_vuln_id(&findings);
        Ok(ReachabilityMatcher::apply(packages, &results, &vulns_by_id))
    }

    fn report_failure(&self, source_path: &str, error: &anyhow::Error) -> String {
        let tool_missing = error
            .downcast_ref::<SourceAnalysisError>()
            .is_some_and(SourceAnalysisError::is_tool_unavailable);
        warn!(tool_missing, error = %error, "reachability analysis failed");

        let message = format!(
            "Failed to run code analysis (govulncheck) on '{}': {}",
            source_path, error
        );
        self.progress_reporter.report_error(&format!("⚠️  {}", message));
        message
    }
}

#[async_trait(?Send)]
impl<W, L, S, PR> SourceAnalysisPort for AnalyzeReachabilityUseCase<W, L, S, PR>
where
    W: AdvisoryCacheWriter,
    L: FindingStreamProducer,
    S: FindingStreamProducer,
    PR: ProgressReporter,
{
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        self.execute(request).await
    }
}

fn has_groups(packages: &[PackageVulns]) -> bool {
    packages.iter().any(|package| !package.groups.is_empty())
}

/// Creates a unique cache directory, under `cache_root` when given.
fn create_cache_dir(cache_root: Option<&Path>) -> Result<TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(CACHE_DIR_PREFIX);
    let dir = match cache_root {
        Some(root) => builder
            .tempdir_in(root)
            .map_err(|e| SourceAnalysisError::io(root, e))?,
        None => builder
            .tempdir()
            .map_err(|e| SourceAnalysisError::io(std::env::temp_dir(), e))?,
    };
    debug!(dir = %dir.path().display(), "created advisory cache directory");
    Ok(dir)
}
