//! Client-server message types

/// Messages sent from client to server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Plain chat text for the current channel
    TextData(String),

    /// Session handshake, sent once before anything else
    Login(String),

    /// End the session
    Logout,

    /// Structured slash command
    Cmd(Command),
}

/// Slash commands the user can issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch the active channel
    JoinChannel(String),

    /// Private message to a single user
    Whisper { recipient: String, body: String },

    /// Ask the server for the channel list
    ListChannels,

    /// Ask the server for the users in the current channel
    ListUsers,

    /// Ask the server for the command reference
    Help,
}

/// Messages sent from server to client
///
/// Each variant carries display text; the variant only selects how it
/// is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Channel chatter
    Public(String),

    /// Private message addressed to this user
    Whisper(String),

    /// Server notice (join confirmations, listings, help text)
    Server(String),
}

impl Reply {
    /// Display text carried by the reply
    pub fn text(&self) -> &str {
        match self {
            Reply::Public(text) | Reply::Whisper(text) | Reply::Server(text) => text,
        }
    }
}

impl From<Command> for Message {
    fn from(cmd: Command) -> Self {
        Message::Cmd(cmd)
    }
}
