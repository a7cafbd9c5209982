use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the database was written or the report was annotated
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (invalid input, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised while building, writing, or analysing a vulnerability database.
///
/// Values travel inside `anyhow::Error`; use `downcast_ref::<SourceAnalysisError>()`
/// to distinguish a missing toolchain from a failed analysis.
#[derive(Debug, Error)]
pub enum SourceAnalysisError {
    #[error("Duplicate advisory entry: {id}\n\n💡 Hint: Each advisory ID may only be added to the database once")]
    DuplicateEntry { id: String },

    #[error("I/O error on {path}\nDetails: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode or decode JSON for {path}\nDetails: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{tool} is not available: {details}\n\n💡 Hint: Reachability analysis requires the Go toolchain and govulncheck (go install golang.org/x/vuln/cmd/govulncheck@latest)")]
    ToolUnavailable { tool: String, details: String },

    #[error("Reachability analysis failed: {details}")]
    AnalysisFailed { details: String },

    #[error("Security violation: {path}\nReason: {reason}")]
    SecurityError { path: PathBuf, reason: String },

    #[error("Invalid input: {path}\nReason: {reason}\n\n💡 Hint: Please specify an existing file or directory")]
    InvalidSource { path: PathBuf, reason: String },
}

impl SourceAnalysisError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SourceAnalysisError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn serialization(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        SourceAnalysisError::Serialization {
            path: path.into(),
            source,
        }
    }

    /// Whether the error means the external tool could not be started at all.
    pub fn is_tool_unavailable(&self) -> bool {
        matches!(self, SourceAnalysisError::ToolUnavailable { .. })
    }
}
