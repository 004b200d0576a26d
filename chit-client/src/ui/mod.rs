//! Terminal front end for the chat client
//!
//! Plain line-based output with crossterm styling; input is read a line
//! at a time from stdin.

mod input;
mod style;
mod terminal;

pub use input::spawn_stdin_reader;
pub use terminal::Console;

#[cfg(test)]
pub(crate) use terminal::SharedBuf;
