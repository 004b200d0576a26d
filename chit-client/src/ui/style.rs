//! Text styles used when rendering chat lines

use chit_protocol::Reply;
use crossterm::style::Color;

/// Visual style for one rendered line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Default,
    /// Local echo of what the user sent
    Echo,
    Public,
    Whisper,
    ServerNotice,
    /// Divider and input prompts
    Prompt,
}

impl Style {
    /// Foreground color, `None` keeps the terminal default
    pub fn color(self) -> Option<Color> {
        match self {
            Style::Default => None,
            Style::Echo => Some(Color::DarkGrey),
            Style::Public => Some(Color::White),
            Style::Whisper => Some(Color::Magenta),
            Style::ServerNotice => Some(Color::Yellow),
            Style::Prompt => Some(Color::Cyan),
        }
    }

    pub fn bold(self) -> bool {
        matches!(self, Style::ServerNotice | Style::Prompt)
    }

    /// Style and line prefix for a server reply
    pub fn for_reply(reply: &Reply) -> (Style, &'static str) {
        match reply {
            Reply::Public(_) => (Style::Public, ""),
            Reply::Whisper(_) => (Style::Whisper, "[whisper] "),
            Reply::Server(_) => (Style::ServerNotice, "[server] "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_styles() {
        assert_eq!(
            Style::for_reply(&Reply::Public("x".into())),
            (Style::Public, "")
        );
        assert_eq!(
            Style::for_reply(&Reply::Whisper("x".into())),
            (Style::Whisper, "[whisper] ")
        );
        assert_eq!(
            Style::for_reply(&Reply::Server("x".into())),
            (Style::ServerNotice, "[server] ")
        );
    }

    #[test]
    fn test_default_has_no_color() {
        assert_eq!(Style::Default.color(), None);
        assert!(!Style::Default.bold());
    }

    #[test]
    fn test_reply_styles_are_distinct() {
        let colors = [
            Style::Public.color(),
            Style::Whisper.color(),
            Style::ServerNotice.color(),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }
}
