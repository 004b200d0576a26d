//! User input parsing
//!
//! Turns a raw line typed at the prompt into a [`Message`]. Lines that
//! are not understood yield `None` and are dropped without a round trip
//! to the server.

use crate::messages::{Command, Message};

/// Parse a line of user input
///
/// # Supported input
///
/// - `logout` - end the session
/// - `/join <channel>` - switch channel
/// - `/whisper <user> <message>` - private message
/// - `/listchannels`, `/listusers`, `/help`
/// - anything else not starting with `/` - chat text
///
/// Tokens are split on single spaces, so runs of spaces produce empty
/// tokens. `/join` concatenates its arguments without a separator, so
/// `/join rust lang` joins `rustlang`. `/whisper` rejoins its body with
/// single spaces.
pub fn parse_input(line: &str) -> Option<Message> {
    if line.is_empty() {
        return None;
    }
    if line == "logout" {
        return Some(Message::Logout);
    }

    let tokens: Vec<&str> = line.split(' ').collect();

    match tokens.as_slice() {
        ["/whisper", recipient, body @ ..] if !body.is_empty() => Some(
            Command::Whisper {
                recipient: (*recipient).to_string(),
                body: body.join(" "),
            }
            .into(),
        ),
        [single] => match single.strip_prefix('/') {
            Some(name) => parse_bare_command(name).map(Message::from),
            None => Some(Message::TextData((*single).to_string())),
        },
        ["/join", rest @ ..] => Some(Command::JoinChannel(rest.concat()).into()),
        [first, ..] if !first.starts_with('/') => Some(Message::TextData(line.to_string())),
        _ => None,
    }
}

/// Match an argument-less slash command (without the leading `/`)
fn parse_bare_command(name: &str) -> Option<Command> {
    match name {
        "listchannels" => Some(Command::ListChannels),
        "listusers" => Some(Command::ListUsers),
        "help" => Some(Command::Help),
        _ => None,
    }
}
