/// Type alias for Result with anyhow::Error as the error type.
/// Typed failures are `SourceAnalysisError` values wrapped in the anyhow error;
/// callers that need to branch on them use `downcast_ref`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
