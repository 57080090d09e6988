/// ProgressReporter port for run-time status output.
///
/// Keeps the engine free of any direct console dependency; the
/// adapter decides how messages are rendered.
pub trait ProgressReporter {
    /// Reports a stage-level status message.
    fn report(&self, message: &str);

    /// Reports incremental progress within a stage.
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a non-fatal warning.
    fn report_error(&self, message: &str);

    /// Reports run completion.
    fn report_completion(&self, message: &str);
}
