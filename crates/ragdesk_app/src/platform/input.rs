use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ragdesk_core::{Msg, SelectedFile};

pub const HELP: &str = "\
Type a question and press Enter to ask it. Start it with :: to send a
question that itself begins with a colon.
Commands:
  :tab <chat|ingest|debug>   switch tab (debug shows retrieved docs and the prompt)
  :sidebar                   toggle the sidebar with backend status
  :text <content>            set the text to ingest
  :source <label>            set the source label (empty = User Manual)
  :file [path]               select a file to ingest, or clear the selection
  :ingest                    submit text and/or file for ingestion
  :help                      show this help
  :quit                      exit";

/// What one line of terminal input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Vec<Msg>),
    SelectFile(PathBuf),
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    // `::` escapes a question that starts with a colon.
    if let Some(question) = line.strip_prefix("::") {
        return ask(question);
    }
    let Some(rest) = line.strip_prefix(':') else {
        return ask(line);
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "tab" => Command::Dispatch(vec![Msg::TabSelected(arg.to_string())]),
        "sidebar" => Command::Dispatch(vec![Msg::SidebarToggled]),
        "text" => Command::Dispatch(vec![Msg::IngestTextChanged(arg.to_string())]),
        "source" => Command::Dispatch(vec![Msg::IngestSourceChanged(arg.to_string())]),
        "file" if arg.is_empty() => Command::Dispatch(vec![Msg::IngestFileSelected(None)]),
        "file" => Command::SelectFile(PathBuf::from(arg)),
        "ingest" => Command::Dispatch(vec![Msg::IngestSubmitted]),
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

/// Plain text is a chat message; the core ignores blank input.
fn ask(question: &str) -> Command {
    Command::Dispatch(vec![
        Msg::ChatInputChanged(question.to_string()),
        Msg::ChatSubmitted,
    ])
}

/// Reads a file into a selection, named after its final path component.
pub fn load_file(path: &Path) -> io::Result<SelectedFile> {
    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SelectedFile { name, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn plain_text_becomes_a_chat_submission() {
        assert_eq!(
            parse_line("what is a stroke?\n"),
            Command::Dispatch(vec![
                Msg::ChatInputChanged("what is a stroke?".to_string()),
                Msg::ChatSubmitted,
            ])
        );
    }

    #[test]
    fn double_colon_sends_the_rest_as_a_question() {
        assert_eq!(
            parse_line("::) why does my head hurt?"),
            Command::Dispatch(vec![
                Msg::ChatInputChanged(":) why does my head hurt?".to_string()),
                Msg::ChatSubmitted,
            ])
        );
        assert_eq!(
            parse_line(":::quit"),
            Command::Dispatch(vec![
                Msg::ChatInputChanged(":quit".to_string()),
                Msg::ChatSubmitted,
            ])
        );
    }

    #[test]
    fn commands_map_to_messages() {
        assert_eq!(
            parse_line(":tab debug"),
            Command::Dispatch(vec![Msg::TabSelected("debug".to_string())])
        );
        assert_eq!(parse_line(":sidebar"), Command::Dispatch(vec![Msg::SidebarToggled]));
        assert_eq!(
            parse_line(":text  Dengue: febre alta  "),
            Command::Dispatch(vec![Msg::IngestTextChanged("Dengue: febre alta".to_string())])
        );
        assert_eq!(
            parse_line(":source"),
            Command::Dispatch(vec![Msg::IngestSourceChanged(String::new())])
        );
        assert_eq!(parse_line(":ingest"), Command::Dispatch(vec![Msg::IngestSubmitted]));
        assert_eq!(parse_line(":quit"), Command::Quit);
        assert_eq!(parse_line(":help"), Command::Help);
        assert_eq!(parse_line(":bogus x"), Command::Unknown("bogus".to_string()));
    }

    #[test]
    fn file_command_selects_or_clears() {
        assert_eq!(
            parse_line(":file docs/manual.pdf"),
            Command::SelectFile(PathBuf::from("docs/manual.pdf"))
        );
        assert_eq!(
            parse_line(":file"),
            Command::Dispatch(vec![Msg::IngestFileSelected(None)])
        );
    }

    #[test]
    fn load_file_reads_bytes_and_name() {
        let mut file = tempfile::Builder::new()
            .suffix(".txt")
            .tempfile()
            .unwrap();
        file.write_all(b"Asma: doenca inflamatoria").unwrap();

        let selected = load_file(file.path()).unwrap();
        assert_eq!(selected.bytes, b"Asma: doenca inflamatoria".to_vec());
        assert!(selected.name.ends_with(".txt"));
        assert!(!selected.name.contains('/'));
    }

    #[test]
    fn load_file_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("missing.pdf")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
