use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use ragdesk_core::{present, update, AppState, Msg};
use ragdesk_logging::{rag_info, rag_warn};

use super::cli::CliArgs;
use super::effects::EffectRunner;
use super::input::{self, Command, HELP};
use super::ui::render::TerminalView;

/// Everything the main loop reacts to.
pub enum LoopEvent {
    Msg(Msg),
    Notice(String),
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    ragdesk_logging::initialize(args.log.into(), args.log_level(), &args.log_file);

    let settings = args.client_settings();
    rag_info!(
        "Starting ragdesk base_url={} poll_interval={:?}",
        settings.base_url,
        settings.poll_interval
    );

    let (tx, rx) = mpsc::channel::<LoopEvent>();
    let runner = EffectRunner::new(&settings, tx.clone())
        .with_context(|| format!("cannot start client for {}", settings.base_url))?;

    spawn_input_reader(tx.clone());

    // Background tick to coalesce rendering.
    thread::spawn(move || {
        let interval = Duration::from_millis(75);
        while tx.send(LoopEvent::Msg(Msg::Tick)).is_ok() {
            thread::sleep(interval);
        }
    });

    let stdout = io::stdout();
    let mut view = TerminalView::new(stdout.lock());
    view.notice(format!("ragdesk connected to {} (:help for commands)", settings.base_url));

    let mut state = AppState::new();
    present(&state.view(), &mut view);

    for event in rx {
        match event {
            LoopEvent::Msg(Msg::Tick) => {
                if state.consume_dirty() {
                    present(&state.view(), &mut view);
                }
            }
            LoopEvent::Msg(msg) => {
                let (next, effects) = update(state, msg);
                state = next;
                runner.enqueue(effects);
            }
            LoopEvent::Notice(text) => view.notice(text),
            LoopEvent::Quit => break,
        }
    }

    if state.consume_dirty() {
        present(&state.view(), &mut view);
    }
    rag_info!("Shutting down");
    runner.shutdown();
    Ok(())
}

fn spawn_input_reader(tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    rag_warn!("stdin read failed: {}", err);
                    break;
                }
            };
            let events = match input::parse_line(&line) {
                Command::Dispatch(msgs) => msgs.into_iter().map(LoopEvent::Msg).collect(),
                Command::SelectFile(path) => match input::load_file(&path) {
                    Ok(file) => {
                        rag_info!("Selected file {} ({} bytes)", file.name, file.bytes.len());
                        vec![
                            LoopEvent::Notice(format!("selected {}", file.name)),
                            LoopEvent::Msg(Msg::IngestFileSelected(Some(file))),
                        ]
                    }
                    Err(err) => {
                        rag_warn!("Cannot read {:?}: {}", path, err);
                        vec![LoopEvent::Notice(format!(
                            "cannot read {}: {err}",
                            path.display()
                        ))]
                    }
                },
                Command::Help => vec![LoopEvent::Notice(HELP.to_string())],
                Command::Unknown(name) => vec![LoopEvent::Notice(format!(
                    "unknown command :{name} (try :help)"
                ))],
                Command::Quit => vec![LoopEvent::Quit],
            };
            for event in events {
                if tx.send(event).is_err() {
                    return;
                }
            }
        }
        // End of input behaves like :quit.
        let _ = tx.send(LoopEvent::Quit);
    });
}
