use crate::{AppState, Effect, Msg, Tab};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TabSelected(id) => {
            // Unknown ids leave the current tab active.
            if let Some(tab) = Tab::from_id(&id) {
                state.switch_tab(tab);
            }
            Vec::new()
        }
        Msg::SidebarToggled => {
            state.toggle_sidebar();
            Vec::new()
        }
        Msg::ChatInputChanged(text) => {
            state.set_chat_input(text);
            Vec::new()
        }
        Msg::ChatSubmitted => match state.begin_chat() {
            Some((request_id, question)) => vec![Effect::Ask {
                request_id,
                question,
            }],
            None => Vec::new(),
        },
        Msg::ChatCompleted {
            request_id,
            outcome,
        } => {
            state.complete_chat(request_id, outcome);
            Vec::new()
        }
        Msg::HealthChecked { online } => {
            state.set_health(online);
            Vec::new()
        }
        Msg::IngestTextChanged(text) => {
            state.set_ingest_text(text);
            Vec::new()
        }
        Msg::IngestSourceChanged(source) => {
            state.set_ingest_source(source);
            Vec::new()
        }
        Msg::IngestFileSelected(file) => {
            state.select_file(file);
            Vec::new()
        }
        Msg::IngestSubmitted => match state.begin_ingest() {
            Some((request_id, submission)) => vec![Effect::Ingest {
                request_id,
                submission,
            }],
            None => Vec::new(),
        },
        Msg::IngestCompleted { request_id, result } => {
            state.complete_ingest(request_id, result);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
