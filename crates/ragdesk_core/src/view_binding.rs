use crate::{AppViewModel, DebugPanel, IndicatorView, IngestFormView, Tab, TranscriptEntry};

/// Rendering surface for the view model.
///
/// Front-ends implement this to draw the UI; tests implement it to record
/// what would have been drawn.
pub trait ViewBinding {
    fn render_layout(&mut self, active_tab: Tab, sidebar_open: bool);
    /// Receives the full, append-only transcript.
    fn render_transcript(&mut self, entries: &[TranscriptEntry]);
    fn render_debug_panel(&mut self, panel: &DebugPanel);
    fn render_status(&mut self, indicators: &[IndicatorView]);
    /// Receives the staged form fields together with the last status.
    fn render_ingest_form(&mut self, form: &IngestFormView);
}

/// Pushes every part of the view model through the binding.
pub fn present(view: &AppViewModel, binding: &mut dyn ViewBinding) {
    binding.render_layout(view.active_tab, view.sidebar_open);
    binding.render_status(&view.indicators);
    binding.render_transcript(&view.transcript);
    binding.render_debug_panel(&view.debug);
    binding.render_ingest_form(&view.ingest);
}
