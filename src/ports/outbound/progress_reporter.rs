/// ProgressReporter port for reporting progress during operations
///
/// This port abstracts user-facing progress output (e.g., to stderr).
/// Diagnostic logging goes through `tracing` instead.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Signals the start of a long-running step, such as waiting on the
    /// analyzer process. Ends with the next error or completion report.
    fn begin_activity(&self, message: &str);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
