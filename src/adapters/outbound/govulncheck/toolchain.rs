use crate::shared::error::SourceAnalysisError;
use crate::shared::Result;
use std::fs;
use std::io;
use std::path::Path;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Default timeout for one govulncheck run (10 minutes)
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Longest stderr excerpt carried into an error message
const STDERR_EXCERPT_LEN: usize = 2048;

/// Configuration for running govulncheck
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovulncheckConfig {
    /// Path to the govulncheck executable (or "govulncheck" if in PATH)
    pub executable: String,
    /// Path to the go executable used for the toolchain preflight
    pub go_executable: String,
    /// Limit for one run; the process is killed when it elapses
    pub timeout: Duration,
}

impl Default for GovulncheckConfig {
    fn default() -> Self {
        Self {
            executable: "govulncheck".to_string(),
            go_executable: "go".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GovulncheckConfig {
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn with_go_executable(mut self, go_executable: impl Into<String>) -> Self {
        self.go_executable = go_executable.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(super) fn timeout_error(&self) -> anyhow::Error {
        SourceAnalysisError::AnalysisFailed {
            details: format!(
                "{} did not finish within {} seconds",
                self.executable,
                self.timeout.as_secs()
            ),
        }
        .into()
    }
}

/// Checks that a working Go toolchain is available.
///
/// govulncheck loads packages through `go`, so a missing toolchain is
/// reported as an unavailable tool before govulncheck itself is started.
#[instrument(skip(config), fields(go = %config.go_executable))]
pub(super) async fn check_go_toolchain(config: &GovulncheckConfig) -> Result<String> {
    let output = Command::new(&config.go_executable)
        .arg("version")
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| spawn_error(&config.go_executable, e))?;

    if !output.status.success() {
        return Err(SourceAnalysisError::ToolUnavailable {
            tool: config.go_executable.clone(),
            details: format!(
                "`{} version` failed ({}): {}",
                config.go_executable,
                output.status,
                stderr_excerpt(&output)
            ),
        }
        .into());
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    debug!(version = %version, "Go toolchain found");
    Ok(version)
}

/// Maps a failure to start a process onto the error taxonomy.
pub(super) fn spawn_error(tool: &str, error: io::Error) -> anyhow::Error {
    if error.kind() == io::ErrorKind::NotFound {
        SourceAnalysisError::ToolUnavailable {
            tool: tool.to_string(),
            details: error.to_string(),
        }
        .into()
    } else {
        SourceAnalysisError::AnalysisFailed {
            details: format!("failed to start {}: {}", tool, error),
        }
        .into()
    }
}

/// Error for a process that ran but exited unsuccessfully.
pub(super) fn exit_error(tool: &str, status: std::process::ExitStatus, stderr: &[u8]) -> anyhow::Error {
    SourceAnalysisError::AnalysisFailed {
        details: format!("{} exited with {}: {}", tool, status, excerpt(stderr)),
    }
    .into()
}

/// `file://` URL of the database directory; govulncheck requires an
/// absolute path.
pub(super) fn db_url(db_dir: &Path) -> Result<String> {
    let absolute = fs::canonicalize(db_dir).map_err(|e| SourceAnalysisError::io(db_dir, e))?;
    Ok(format!("file://{}", absolute.display()))
}

fn stderr_excerpt(output: &Output) -> String {
    excerpt(&output.stderr)
}

fn excerpt(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    match text.char_indices().nth(STDERR_EXCERPT_LEN) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn kind(err: &anyhow::Error) -> Option<&SourceAnalysisError> {
        err.downcast_ref::<SourceAnalysisError>()
    }

    #[test]
    fn test_default_config() {
        let config = GovulncheckConfig::default();
        assert_eq!(config.executable, "govulncheck");
        assert_eq!(config.go_executable, "go");
        assert_eq!(config.timeout, Duration::from_secs(600));
    }

    #[test]
    fn test_spawn_error_not_found_is_tool_unavailable() {
        let err = spawn_error("govulncheck", io::Error::from(io::ErrorKind::NotFound));
        assert!(kind(&err).is_some_and(|e| e.is_tool_unavailable()));
    }

    #[test]
    fn test_spawn_error_other_is_analysis_failed() {
        let err = spawn_error("govulncheck", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(
            kind(&err),
            Some(SourceAnalysisError::AnalysisFailed { .. })
        ));
    }

    #[test]
    fn test_db_url_is_absolute() {
        let temp_dir = TempDir::new().unwrap();
        let url = db_url(temp_dir.path()).unwrap();
        assert!(url.starts_with("file:///"));
    }

    #[test]
    fn test_db_url_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let err = db_url(&temp_dir.path().join("missing")).unwrap_err();
        assert!(matches!(kind(&err), Some(SourceAnalysisError::Io { .. })));
    }

    #[test]
    fn test_excerpt_truncates() {
        let long = "x".repeat(STDERR_EXCERPT_LEN + 10);
        let short = excerpt(long.as_bytes());
        assert!(short.ends_with("..."));
        assert_eq!(short.len(), STDERR_EXCERPT_LEN + 3);
        assert_eq!(excerpt(b"  boom \n"), "boom");
    }

    #[tokio::test]
    async fn test_preflight_missing_go() {
        let config = GovulncheckConfig::default().with_go_executable("/nonexistent/bin/go");
        let err = check_go_toolchain(&config).await.unwrap_err();
        assert!(kind(&err).is_some_and(|e| e.is_tool_unavailable()));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_preflight_failing_go() {
        let config = GovulncheckConfig::default().with_go_executable("false");
        let err = check_go_toolchain(&config).await.unwrap_err();
        assert!(kind(&err).is_some_and(|e| e.is_tool_unavailable()));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_preflight_success() {
        let config = GovulncheckConfig::default().with_go_executable("echo");
        let version = check_go_toolchain(&config).await.unwrap();
        assert_eq!(version, "version");
    }
}
