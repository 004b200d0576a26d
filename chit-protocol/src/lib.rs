//! chit-protocol: Wire definitions for the chit chat client
//!
//! This crate defines the message model, the line-oriented wire encoding
//! spoken with a chit server, and the parser for text typed at the prompt.

pub mod codec;
pub mod input;
pub mod messages;

// Re-export main types at crate root
pub use codec::{
    decode_message, encode, encode_reply, parse_reply, ClientCodec, CodecError, ServerCodec,
    DELIM, MAX_FRAME_LENGTH,
};
pub use input::parse_input;
pub use messages::{Command, Message, Reply};
