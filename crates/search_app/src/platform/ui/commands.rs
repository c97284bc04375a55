use search_core::Msg;

use super::constants::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    More,
    Dismiss(String),
    Retry,
    Quit,
    Help,
    Unknown(String),
}

impl Command {
    /// Messages the command raises into the session, in order.
    pub fn into_msgs(self) -> Vec<Msg> {
        match self {
            Command::Search(term) => vec![Msg::InputChanged(term), Msg::Submitted],
            Command::More => vec![Msg::LoadMoreClicked],
            Command::Dismiss(id) => vec![Msg::DismissClicked(id)],
            Command::Retry => vec![Msg::Submitted],
            Command::Quit => vec![Msg::Teardown],
            Command::Help | Command::Unknown(_) => Vec::new(),
        }
    }
}

/// Parses one input line. Blank lines yield `None`.
///
/// Anything not starting with `:` is a search term and is passed on
/// untouched apart from the line terminator.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }
    if !line.starts_with(':') {
        return Some(Command::Search(line.to_string()));
    }

    let mut parts = line.trim().splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or_default();
    let command = match name {
        CMD_MORE => Command::More,
        CMD_RETRY => Command::Retry,
        CMD_QUIT => Command::Quit,
        CMD_HELP => Command::Help,
        CMD_DISMISS if !arg.is_empty() => Command::Dismiss(arg.to_string()),
        _ => Command::Unknown(line.to_string()),
    };
    Some(command)
}
