//! Projection of a chat reply onto the three debug-panel regions.

use crate::ChatReply;

pub const LOADING_DOCS: &str = "Searching documents...";
pub const LOADING_PROMPT: &str = "Building prompt...";
pub const LOADING_ANSWER: &str = "Generating answer...";
pub const NO_RELEVANT_DOCUMENTS: &str = "No relevant documents found.";

/// One region of the debug panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugRegion<T> {
    /// Nothing asked yet.
    Idle,
    /// A question is in flight.
    Loading,
    Ready(T),
}

impl<T> Default for DebugRegion<T> {
    fn default() -> Self {
        DebugRegion::Idle
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocEntry {
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievedDocs {
    NoneFound,
    Found(Vec<DocEntry>),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DebugPanel {
    pub retrieved: DebugRegion<RetrievedDocs>,
    /// Built prompt, already escaped for markup display.
    pub prompt: DebugRegion<String>,
    /// Raw answer markup as returned by the backend.
    pub answer: DebugRegion<String>,
}

impl DebugPanel {
    pub fn loading() -> Self {
        Self {
            retrieved: DebugRegion::Loading,
            prompt: DebugRegion::Loading,
            answer: DebugRegion::Loading,
        }
    }

    pub fn retrieved_text(&self) -> String {
        match &self.retrieved {
            DebugRegion::Idle => String::new(),
            DebugRegion::Loading => LOADING_DOCS.to_string(),
            DebugRegion::Ready(RetrievedDocs::NoneFound) => NO_RELEVANT_DOCUMENTS.to_string(),
            DebugRegion::Ready(RetrievedDocs::Found(docs)) => docs
                .iter()
                .map(|doc| format!("{}: {}", doc.label, doc.text))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn prompt_text(&self) -> &str {
        region_text(&self.prompt, LOADING_PROMPT)
    }

    pub fn answer_text(&self) -> &str {
        region_text(&self.answer, LOADING_ANSWER)
    }
}

fn region_text<'a>(region: &'a DebugRegion<String>, loading: &'static str) -> &'a str {
    match region {
        DebugRegion::Idle => "",
        DebugRegion::Loading => loading,
        DebugRegion::Ready(text) => text,
    }
}

/// Builds the debug panel for a reply. Only the prompt is escaped; the answer
/// is backend-produced markup and is passed through unchanged.
pub fn render_debug(reply: &ChatReply) -> DebugPanel {
    let retrieved = if reply.retrieved_docs.is_empty() {
        RetrievedDocs::NoneFound
    } else {
        RetrievedDocs::Found(
            reply
                .retrieved_docs
                .iter()
                .enumerate()
                .map(|(index, text)| DocEntry {
                    label: format!("Doc {}", index + 1),
                    text: text.clone(),
                })
                .collect(),
        )
    };

    DebugPanel {
        retrieved: DebugRegion::Ready(retrieved),
        prompt: DebugRegion::Ready(escape_prompt(&reply.built_prompt)),
        answer: DebugRegion::Ready(reply.answer.clone()),
    }
}

/// Escapes angle brackets so the prompt cannot inject markup. Ampersands and
/// quotes are left alone.
pub fn escape_prompt(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}
