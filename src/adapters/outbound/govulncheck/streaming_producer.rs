use super::stream_decoder::FindingStreamDecoder;
use super::toolchain::{check_go_toolchain, db_url, exit_error, spawn_error, GovulncheckConfig};
use crate::ports::outbound::FindingStreamProducer;
use crate::shared::error::SourceAnalysisError;
use crate::shared::Result;
use crate::source_analysis::domain::Finding;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, instrument, trace};

const READ_CHUNK_SIZE: usize = 16 * 1024;

/// StreamingGovulncheckProducer runs govulncheck with `-db` and decodes its
/// JSON message stream while the process is still running.
///
/// Findings are only returned once the whole stream decoded and the process
/// exited successfully; a failure at any point discards them.
pub struct StreamingGovulncheckProducer {
    config: GovulncheckConfig,
}

impl StreamingGovulncheckProducer {
    pub fn new(config: GovulncheckConfig) -> Self {
        Self { config }
    }

    fn command(&self, module_root: &Path, db_url: &str) -> Command {
        let mut cmd = Command::new(&self.config.executable);
        cmd.arg("-db")
            .arg(db_url)
            .arg("-json")
            .arg("./...")
            .current_dir(module_root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    async fn run(&self, mut cmd: Command) -> Result<Vec<Finding>> {
        let mut child = cmd
            .spawn()
            .map_err(|e| spawn_error(&self.config.executable, e))?;

        let stdout = child.stdout.take().ok_or_else(|| SourceAnalysisError::AnalysisFailed {
            details: "govulncheck stdout was not captured".to_string(),
        })?;
        let mut stderr = child.stderr.take().ok_or_else(|| SourceAnalysisError::AnalysisFailed {
            details: "govulncheck stderr was not captured".to_string(),
        })?;

        // stdout is dropped as soon as decoding stops, so a failed decode
        // cannot leave the process blocked on a full pipe
        let (decoded, stderr_bytes) = tokio::join!(decode_stream(stdout), async move {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes).await.map(|_| bytes)
        });

        let status = child
            .wait()
            .await
            .map_err(|e| SourceAnalysisError::AnalysisFailed {
                details: format!("failed to wait for {}: {}", self.config.executable, e),
            })?;

        if !status.success() {
            return Err(exit_error(
                &self.config.executable,
                status,
                &stderr_bytes.unwrap_or_default(),
            ));
        }
        decoded
    }
}

/// Reads `reader` to the end, feeding every chunk to a fresh decoder.
async fn decode_stream<R: AsyncRead + Unpin>(mut reader: R) -> Result<Vec<Finding>> {
    let mut decoder = FindingStreamDecoder::new();
    let mut chunk = vec![0u8; READ_CHUNK_SIZE];

    loop {
        let read = reader
            .read(&mut chunk)
            .await
            .map_err(|e| SourceAnalysisError::AnalysisFailed {
                details: format!("failed to read govulncheck output: {}", e),
            })?;
        if read == 0 {
            break;
        }
        trace!(bytes = read, "govulncheck output chunk");
        decoder.feed(&chunk[..read])?;
    }

    decoder.finish()
}

#[async_trait]
impl FindingStreamProducer for StreamingGovulncheckProducer {
    fn name(&self) -> &str {
        "govulncheck (streaming)"
    }

    #[instrument(skip(self), fields(module_root = %module_root.display()))]
    async fn produce(&self, module_root: &Path, db_dir: &Path) -> Result<Vec<Finding>> {
        check_go_toolchain(&self.config).await?;

        let cmd = self.command(module_root, &db_url(db_dir)?);
        debug!(command = ?cmd, "Executing govulncheck");

        let findings = tokio::time::timeout(self.config.timeout, self.run(cmd))
            .await
            .map_err(|_| self.config.timeout_error())??;

        debug!(findings = findings.len(), "govulncheck stream decoded");
        Ok(findings)
    }
}
