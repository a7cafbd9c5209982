use super::report::ReportVuln;
use super::toolchain::{check_go_toolchain, db_url, exit_error, spawn_error, GovulncheckConfig};
use crate::ports::outbound::FindingStreamProducer;
use crate::shared::error::SourceAnalysisError;
use crate::shared::Result;
use crate::source_analysis::domain::Finding;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Environment variable through which older govulncheck releases locate the
/// vulnerability database.
const DB_ENV: &str = "GOVULNDB";

/// The single JSON document written by older govulncheck releases.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LegacyReport {
    #[serde(default)]
    vulns: Option<Vec<ReportVuln>>,
}

/// Decodes the legacy report document into findings.
fn decode_legacy_report(stdout: &[u8]) -> Result<Vec<Finding>> {
    let report: LegacyReport =
        serde_json::from_slice(stdout).map_err(|e| SourceAnalysisError::AnalysisFailed {
            details: format!("undecodable govulncheck report: {}", e),
        })?;

    Ok(report
        .vulns
        .unwrap_or_default()
        .into_iter()
        .map(Finding::from)
        .collect())
}

/// LegacyGovulncheckProducer runs govulncheck directly and decodes its
/// buffered single-document report.
///
/// The database location is passed through `GOVULNDB`.
pub struct LegacyGovulncheckProducer {
    config: GovulncheckConfig,
}

impl LegacyGovulncheckProducer {
    pub fn new(config: GovulncheckConfig) -> Self {
        Self { config }
    }

    fn command(&self, module_root: &Path, db_url: &str) -> Command {
        let mut cmd = Command::new(&self.config.executable);
        cmd.env(DB_ENV, db_url)
            .arg("-json")
            .arg("./...")
            .current_dir(module_root)
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl FindingStreamProducer for LegacyGovulncheckProducer {
    fn name(&self) -> &str {
        "govulncheck (legacy)"
    }

    #[instrument(skip(self), fields(module_root = %module_root.display()))]
    async fn produce(&self, module_root: &Path, db_dir: &Path) -> Result<Vec<Finding>> {
        check_go_toolchain(&self.config).await?;

        let mut cmd = self.command(module_root, &db_url(db_dir)?);
        debug!(command = ?cmd, "Executing govulncheck");

        let output = tokio::time::timeout(self.config.timeout, cmd.output())
            .await
            .map_err(|_| self.config.timeout_error())?
            .map_err(|e| spawn_error(&self.config.executable, e))?;

        if !output.status.success() {
            return Err(exit_error(&self.config.executable, output.status, &output.stderr));
        }

        let findings = decode_legacy_report(&output.stdout)?;
        debug!(findings = findings.len(), "govulncheck report decoded");
        Ok(findings)
    }
}
