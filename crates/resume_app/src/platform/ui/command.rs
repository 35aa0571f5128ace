use std::path::PathBuf;

use resume_core::OutputFormat;

pub const HELP: &str = "commands: select <path> | select | format json|spreadsheet | submit | cancel | reset | dismiss | status | quit";

/// One line typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `select` without a path behaves like a dismissed file picker.
    Select(Option<PathBuf>),
    Format(OutputFormat),
    Submit,
    Cancel,
    Reset,
    Dismiss,
    Status,
    Help,
    Quit,
}

pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "select" => Ok(Command::Select(
            (!rest.is_empty()).then(|| PathBuf::from(rest)),
        )),
        "format" => OutputFormat::parse(rest)
            .map(Command::Format)
            .ok_or_else(|| format!("unknown format {rest:?}; use json or spreadsheet")),
        "submit" | "parse" => Ok(Command::Submit),
        "cancel" => Ok(Command::Cancel),
        "reset" => Ok(Command::Reset),
        "dismiss" => Ok(Command::Dismiss),
        "status" | "" => Ok(Command::Status),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command {other:?}")),
    }
}
