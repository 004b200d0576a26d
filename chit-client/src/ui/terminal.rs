//! Line-oriented terminal output
//!
//! Every event is rendered into a buffer first and written with one
//! locked write, so output from the inbound and outbound loops never
//! interleaves mid-line.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crossterm::{
    cursor::{MoveToColumn, MoveUp},
    queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use chit_protocol::Reply;
use chit_utils::Result;

use super::style::Style;

/// Prompt shown after the divider
const PROMPT: &str = "> ";

/// Lines to repaint after the user hits enter: the typed line and the divider
const REWIND_AFTER_INPUT: u16 = 2;

/// Lines to repaint from the prompt line: the divider
const REWIND_AT_PROMPT: u16 = 1;

/// Output sink plus where the cursor was left by the last render
struct Screen {
    out: Box<dyn Write + Send>,
    /// A submitted line sits above the cursor and has not been repainted
    input_pending: bool,
}

/// Cloneable handle to the terminal output
#[derive(Clone)]
pub struct Console {
    screen: Arc<Mutex<Screen>>,
}

impl Console {
    /// Console writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Console writing to an arbitrary sink
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            screen: Arc::new(Mutex::new(Screen {
                out: Box::new(writer),
                input_pending: false,
            })),
        }
    }

    /// Startup banner
    pub fn banner(&self) -> Result<()> {
        let mut buf = Vec::new();
        styled_line(
            &mut buf,
            Style::Prompt,
            &format!("chit {}", env!("CARGO_PKG_VERSION")),
        )?;
        styled_line(
            &mut buf,
            Style::Default,
            "Type /help for commands, logout to quit.",
        )?;
        self.write_frame(&buf)
    }

    /// Ask for a value during startup, leaving the cursor after the label
    pub fn prompt(&self, label: &str) -> Result<()> {
        let mut buf = Vec::new();
        styled(&mut buf, Style::Prompt, &format!("{label}: "))?;
        self.write_frame(&buf)
    }

    /// Local notice that does not come from the server
    pub fn notice(&self, text: &str) -> Result<()> {
        let mut buf = Vec::new();
        rewind(&mut buf, 0)?;
        styled_line(&mut buf, Style::ServerNotice, text)?;
        self.write_frame(&buf)
    }

    /// Draw the divider and input prompt for `channel`
    pub fn divider(&self, channel: &str) -> Result<()> {
        let mut buf = Vec::new();
        divider(&mut buf, channel)?;
        self.write_frame(&buf)
    }

    /// Note that the user pressed enter below the prompt
    pub fn submitted(&self) {
        self.lock().input_pending = true;
    }

    /// Replace the submitted line with its echo and redraw the prompt
    pub fn sent(&self, line: &str, channel: &str) -> Result<()> {
        self.render(|buf| {
            styled_line(buf, Style::Echo, line)?;
            divider(buf, channel)
        })
    }

    /// Discard the submitted line and redraw the prompt
    pub fn redraw(&self, channel: &str) -> Result<()> {
        self.render(|buf| divider(buf, channel))
    }

    /// Render a server reply above the prompt
    pub fn reply(&self, reply: &Reply, channel: &str) -> Result<()> {
        let (style, prefix) = Style::for_reply(reply);
        self.render(|buf| {
            styled_line(buf, style, &format!("{prefix}{}", reply.text()))?;
            divider(buf, channel)
        })
    }

    /// Clear the prompt area, draw, and leave the cursor at a fresh prompt
    fn render(&self, draw: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> Result<()> {
        let mut screen = self.lock();
        let lines = if screen.input_pending {
            REWIND_AFTER_INPUT
        } else {
            REWIND_AT_PROMPT
        };

        let mut buf = Vec::new();
        rewind(&mut buf, lines)?;
        draw(&mut buf)?;

        screen.out.write_all(&buf)?;
        screen.out.flush()?;
        screen.input_pending = false;
        Ok(())
    }

    fn write_frame(&self, buf: &[u8]) -> Result<()> {
        let mut screen = self.lock();
        screen.out.write_all(buf)?;
        screen.out.flush()?;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Screen> {
        self.screen.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clear the current line and `lines` lines above it
fn rewind(buf: &mut Vec<u8>, lines: u16) -> io::Result<()> {
    queue!(buf, Clear(ClearType::CurrentLine))?;
    for _ in 0..lines {
        queue!(buf, MoveUp(1), Clear(ClearType::CurrentLine))?;
    }
    queue!(buf, MoveToColumn(0))
}

fn divider(buf: &mut Vec<u8>, channel: &str) -> io::Result<()> {
    styled_line(buf, Style::Prompt, &format!("──── #{channel} ────"))?;
    styled(buf, Style::Prompt, PROMPT)
}

fn styled_line(buf: &mut Vec<u8>, style: Style, text: &str) -> io::Result<()> {
    styled(buf, style, text)?;
    queue!(buf, Print("\n"))
}

fn styled(buf: &mut Vec<u8>, style: Style, text: &str) -> io::Result<()> {
    if let Some(color) = style.color() {
        queue!(buf, SetForegroundColor(color))?;
    }
    if style.bold() {
        queue!(buf, SetAttribute(Attribute::Bold))?;
    }
    queue!(
        buf,
        Print(text),
        SetAttribute(Attribute::Reset),
        ResetColor
    )
}

/// In-memory writer for inspecting console output in tests
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SharedBuf(Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl SharedBuf {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

#[cfg(test)]
impl Write for SharedBuf {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
