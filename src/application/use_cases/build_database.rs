use crate::application::dto::{BuildDatabaseRequest, BuildDatabaseResponse};
use crate::ports::outbound::{AdvisoryCacheWriter, AdvisoryReader, ProgressReporter};
use crate::shared::Result;
use crate::source_analysis::domain::Database;
use tracing::instrument;

/// BuildDatabaseUseCase - Writes a directory of OSV advisories as a
/// govulncheck-readable vulnerability database
///
/// # Type Parameters
/// * `R` - AdvisoryReader implementation
/// * `W` - AdvisoryCacheWriter implementation
/// * `PR` - ProgressReporter implementation
pub struct BuildDatabaseUseCase<R, W, PR> {
    advisory_reader: R,
    cache_writer: W,
    progress_reporter: PR,
}

impl<R, W, PR> BuildDatabaseUseCase<R, W, PR>
where
    R: AdvisoryReader,
    W: AdvisoryCacheWriter,
    PR: ProgressReporter,
{
    pub fn new(advisory_reader: R, cache_writer: W, progress_reporter: PR) -> Self {
        Self {
            advisory_reader,
            cache_writer,
            progress_reporter,
        }
    }

    /// Reads, indexes and writes the advisories of `request`
    ///
    /// # Errors
    /// Fails on unreadable advisories, duplicate IDs, or a failed write.
    #[instrument(skip_all, fields(advisories = %request.advisories_dir.display()))]
    pub fn execute(&self, request: BuildDatabaseRequest) -> Result<BuildDatabaseResponse> {
        self.progress_reporter.report(&format!(
            "📖 Loading advisories from: {}",
            request.advisories_dir.display()
        ));
        let advisories = self.advisory_reader.read_advisories(&request.advisories_dir)?;
        self.progress_reporter
            .report(&format!("✅ Loaded {} advisory entries", advisories.len()));

        let db = Database::new(advisories)?;
        self.cache_writer.write(&db, &request.output_dir)?;

        let response = BuildDatabaseResponse {
            output_dir: request.output_dir,
            entries: db.entries().len(),
            modules: db.modules().len(),
            modified: db.db().modified,
        };
        self.progress_reporter.report_completion(&response.summary());
        Ok(response)
    }
}
