//! Wire encoding and line framing
//!
//! A frame is one newline-terminated line. Fields inside a frame are
//! joined by [`DELIM`]; user text is assumed never to contain it.
//!
//! Lines are split at the byte level and decoded lossily, so invalid
//! UTF-8 from a peer is rendered with replacement characters instead of
//! failing the stream. Only an oversized frame is an error.

use bytes::{Bytes, BytesMut};
use tokio_util::codec::{AnyDelimiterCodec, AnyDelimiterCodecError, Decoder, Encoder};

use crate::messages::{Command, Message, Reply};

/// Field separator inside a frame
pub const DELIM: &str = "|~|";

/// Maximum frame length in bytes, excluding the line terminator (64 KB)
pub const MAX_FRAME_LENGTH: usize = 64 * 1024;

/// Protocol codec error
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frame too large (max {max} bytes)")]
    FrameTooLarge { max: usize },
}

impl From<AnyDelimiterCodecError> for CodecError {
    fn from(err: AnyDelimiterCodecError) -> Self {
        match err {
            AnyDelimiterCodecError::MaxChunkLengthExceeded => CodecError::FrameTooLarge {
                max: MAX_FRAME_LENGTH,
            },
            AnyDelimiterCodecError::Io(e) => CodecError::Io(e),
        }
    }
}

/// Newline framing with the frame size cap
fn line_codec() -> AnyDelimiterCodec {
    AnyDelimiterCodec::new_with_max_length(b"\n".to_vec(), b"\n".to_vec(), MAX_FRAME_LENGTH)
}

/// Frame bytes as text, dropping a trailing `\r`
fn line_text(frame: Bytes) -> String {
    let bytes = frame.strip_suffix(b"\r").unwrap_or(&frame[..]);
    String::from_utf8_lossy(bytes).into_owned()
}

/// Encode a client message as a frame body (no line terminator)
pub fn encode(msg: &Message) -> String {
    match msg {
        Message::TextData(text) => format!("Message{DELIM}{text}"),
        Message::Login(username) => format!("Login{DELIM}{username}"),
        Message::Logout => "Logout".to_string(),
        Message::Cmd(Command::JoinChannel(channel)) => format!("Join{DELIM}{channel}"),
        Message::Cmd(Command::Whisper { recipient, body }) => {
            format!("Whisper{DELIM}{recipient}{DELIM}{body}")
        }
        Message::Cmd(Command::ListChannels) => "ListChannels".to_string(),
        Message::Cmd(Command::ListUsers) => "ListUsers".to_string(),
        Message::Cmd(Command::Help) => "Help".to_string(),
    }
}

/// Decode a client frame body back into a message
///
/// Returns `None` for unknown verbs or a wrong number of fields.
pub fn decode_message(frame: &str) -> Option<Message> {
    let (verb, rest) = match frame.split_once(DELIM) {
        Some((verb, rest)) => (verb, Some(rest)),
        None => (frame, None),
    };

    match (verb, rest) {
        ("Message", Some(text)) => Some(Message::TextData(text.to_string())),
        ("Login", Some(username)) => Some(Message::Login(username.to_string())),
        ("Join", Some(channel)) => Some(Command::JoinChannel(channel.to_string()).into()),
        ("Whisper", Some(rest)) => {
            let (recipient, body) = rest.split_once(DELIM)?;
            Some(
                Command::Whisper {
                    recipient: recipient.to_string(),
                    body: body.to_string(),
                }
                .into(),
            )
        }
        ("Logout", None) => Some(Message::Logout),
        ("ListChannels", None) => Some(Command::ListChannels.into()),
        ("ListUsers", None) => Some(Command::ListUsers.into()),
        ("Help", None) => Some(Command::Help.into()),
        _ => None,
    }
}

/// Parse a server frame body into a reply
///
/// Total: a line that is not exactly `tag DELIM body` is shown verbatim
/// as public text, and unknown tags fall back to public as well.
pub fn parse_reply(line: &str) -> Reply {
    let parts: Vec<&str> = line.split(DELIM).collect();

    match parts.as_slice() {
        ["W", body] => Reply::Whisper((*body).to_string()),
        ["S", body] => Reply::Server((*body).to_string()),
        [_, body] => Reply::Public((*body).to_string()),
        _ => Reply::Public(line.to_string()),
    }
}

/// Encode a reply as a server frame body (no line terminator)
pub fn encode_reply(reply: &Reply) -> String {
    match reply {
        Reply::Public(text) => format!("P{DELIM}{text}"),
        Reply::Whisper(text) => format!("W{DELIM}{text}"),
        Reply::Server(text) => format!("S{DELIM}{text}"),
    }
}

/// Codec for Message (encoding) and Reply (decoding)
/// Used by the client side
#[derive(Debug)]
pub struct ClientCodec {
    lines: AnyDelimiterCodec,
}

impl ClientCodec {
    pub fn new() -> Self {
        Self {
            lines: line_codec(),
        }
    }
}

impl Default for ClientCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for ClientCodec {
    type Item = Reply;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Ok(self.lines.decode(src)?.map(|line| parse_reply(&line_text(line))))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Ok(self.lines.decode_eof(src)?.map(|line| parse_reply(&line_text(line))))
    }
}

impl Encoder<Message> for ClientCodec {
    type Error = CodecError;

    fn encode(&mut self, item: Message, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.lines.encode(encode(&item), dst)?;
        Ok(())
    }
}

/// Codec for Reply (encoding) and client frames (decoding)
/// Used by the server side
///
/// Decodes to `Option<Message>` so an unrecognized frame does not end
/// the stream.
#[derive(Debug)]
pub struct ServerCodec {
    lines: AnyDelimiterCodec,
}

impl ServerCodec {
    pub fn new() -> Self {
        Self {
            lines: line_codec(),
        }
    }
}

impl Default for ServerCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for ServerCodec {
    type Item = Option<Message>;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Ok(self.lines.decode(src)?.map(|line| decode_message(&line_text(line))))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Ok(self.lines.decode_eof(src)?.map(|line| decode_message(&line_text(line))))
    }
}

impl Encoder<Reply> for ServerCodec {
    type Error = CodecError;

    fn encode(&mut self, item: Reply, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.lines.encode(encode_reply(&item), dst)?;
        Ok(())
    }
}
