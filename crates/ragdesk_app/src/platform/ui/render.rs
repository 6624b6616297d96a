use std::fmt::Display;
use std::io::Write;

use ragdesk_core::{
    DebugPanel, HealthState, IndicatorView, IngestFormView, IngestStatus, Sender, Tab,
    TranscriptEntry, ViewBinding, DEFAULT_SOURCE,
};
use ragdesk_logging::rag_warn;

/// Line-oriented terminal renderer.
///
/// The terminal is append-only, so each region is printed only when it
/// changed since the last `present`.
pub struct TerminalView<W: Write> {
    out: W,
    clock: fn() -> String,
    layout: Option<(Tab, bool)>,
    transcript_len: usize,
    debug: Option<DebugPanel>,
    status: Vec<IndicatorView>,
    staged: Option<StagedForm>,
    ingest_status: Option<IngestStatus>,
}

/// Form fields as last printed: text, source, file name.
type StagedForm = (String, String, Option<String>);

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self::with_clock(out, local_time)
    }

    pub fn with_clock(out: W, clock: fn() -> String) -> Self {
        Self {
            out,
            clock,
            layout: None,
            transcript_len: 0,
            debug: None,
            status: Vec::new(),
            staged: None,
            ingest_status: None,
        }
    }

    /// Prints a line outside of the view model (help, local errors).
    pub fn notice(&mut self, text: impl Display) {
        self.line(text);
        self.flush();
    }

    pub fn flush(&mut self) {
        if let Err(err) = self.out.flush() {
            rag_warn!("terminal flush failed: {}", err);
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl Display) {
        if let Err(err) = writeln!(self.out, "{text}") {
            rag_warn!("terminal write failed: {}", err);
        }
    }

    fn active_tab(&self) -> Tab {
        self.layout.map(|(tab, _)| tab).unwrap_or_default()
    }

    fn sidebar_open(&self) -> bool {
        self.layout.is_some_and(|(_, open)| open)
    }
}

impl<W: Write> ViewBinding for TerminalView<W> {
    fn render_layout(&mut self, active_tab: Tab, sidebar_open: bool) {
        let next = Some((active_tab, sidebar_open));
        if self.layout == next {
            return;
        }
        let previous = self.layout.replace((active_tab, sidebar_open));
        if previous.map(|(tab, _)| tab) != Some(active_tab) {
            self.line(format!("== {} ==", active_tab.id()));
            // Entering a tab shows its current content again.
            self.debug = None;
            self.staged = None;
        }
        if previous.map(|(_, open)| open) != Some(sidebar_open) && previous.is_some() {
            self.line(if sidebar_open {
                "[sidebar open]"
            } else {
                "[sidebar closed]"
            });
            self.status.clear();
        }
    }

    fn render_transcript(&mut self, entries: &[TranscriptEntry]) {
        let start = self.transcript_len.min(entries.len());
        for entry in &entries[start..] {
            let who = match entry.sender {
                Sender::User => "you",
                Sender::System => "rag",
            };
            let stamp = (self.clock)();
            self.line(format!(
                "[{stamp}] ({}) {who}> {}",
                entry.sender.icon(),
                entry.text
            ));
        }
        self.transcript_len = entries.len();
        self.flush();
    }

    fn render_debug_panel(&mut self, panel: &DebugPanel) {
        if self.active_tab() != Tab::Debug || self.debug.as_ref() == Some(panel) {
            return;
        }
        self.debug = Some(panel.clone());
        if *panel == DebugPanel::default() {
            self.line("-- debug: nothing asked yet --");
            return;
        }
        self.line("-- retrieved documents --");
        self.line(panel.retrieved_text());
        self.line("-- prompt --");
        self.line(panel.prompt_text().to_string());
        self.line("-- answer --");
        self.line(panel.answer_text().to_string());
        self.flush();
    }

    fn render_status(&mut self, indicators: &[IndicatorView]) {
        if !self.sidebar_open() || self.status == indicators {
            return;
        }
        self.status = indicators.to_vec();
        let summary = indicators
            .iter()
            .map(|indicator| {
                format!(
                    "{} {}",
                    indicator.subsystem.label(),
                    health_label(indicator.state)
                )
            })
            .collect::<Vec<_>>()
            .join(" | ");
        self.line(format!("[status] {summary}"));
        self.flush();
    }

    fn render_ingest_form(&mut self, form: &IngestFormView) {
        let staged = (form.text.clone(), form.source.clone(), form.file_name.clone());
        if self.active_tab() == Tab::Ingest && self.staged.as_ref() != Some(&staged) {
            self.line(format!(
                "[ingest form] text: {} | source: {} | file: {}",
                if form.text.is_empty() { "(none)" } else { form.text.as_str() },
                if form.source.is_empty() { DEFAULT_SOURCE } else { form.source.as_str() },
                form.file_name.as_deref().unwrap_or("(none)")
            ));
            self.staged = Some(staged);
        }

        if self.ingest_status != form.status {
            self.ingest_status = form.status.clone();
            if let Some(status) = &form.status {
                let prefix = if status.is_error() { "error: " } else { "" };
                self.line(format!("[ingest] {prefix}{}", status.message()));
            }
        }
        self.flush();
    }
}

fn health_label(state: HealthState) -> &'static str {
    match state {
        HealthState::Unknown => "checking",
        HealthState::Online => "online",
        HealthState::Offline => "offline",
    }
}

fn local_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
