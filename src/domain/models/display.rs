/// Where the orchestrator routes everything the user sees. Implemented by the
/// terminal app state, and by recording sinks in tests.
pub trait DisplaySink {
    /// Replaces the answer pane content.
    fn set_text(&mut self, text: &str);

    /// Busy disables ask/translate/summarize and shows the cancel affordance.
    fn set_busy(&mut self, busy: bool);

    /// Short lived notice, used for validation messages.
    fn notify_transient(&mut self, text: &str);
}
