//! Inbound and outbound chat loops
//!
//! The outbound loop turns typed lines into frames; the inbound loop
//! renders frames from the server. They share only the active channel
//! and the console.

use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;

use chit_protocol::{parse_input, Command, Message};
use chit_utils::{ChitError, Result};

use crate::connection::{Inbound, Outbound};
use crate::session::SessionState;
use crate::ui::Console;

/// Why a chat session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    /// The user typed `logout`
    Logout,
    /// Terminal input reached end-of-file
    InputClosed,
    /// The server closed the connection
    ServerClosed,
}

/// Run both loops until one of them ends the session
///
/// The inbound loop runs as its own task; the outbound loop runs on the
/// caller's task. Whichever finishes first decides the outcome and the
/// other is dropped.
pub async fn run<R, W>(
    inbound: Inbound<R>,
    outbound: Outbound<W>,
    input: mpsc::Receiver<String>,
    session: SessionState,
    console: Console,
) -> Result<SessionExit>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin,
{
    let mut reader = tokio::spawn(run_inbound(inbound, session.clone(), console.clone()));
    let writer = run_outbound(input, outbound, session, console);
    tokio::pin!(writer);

    tokio::select! {
        result = &mut writer => {
            reader.abort();
            result
        }
        joined = &mut reader => match joined {
            Ok(Ok(())) => Ok(SessionExit::ServerClosed),
            Ok(Err(e)) => Err(e),
            Err(e) => Err(ChitError::internal(format!("Inbound task failed: {}", e))),
        },
    }
}

/// Send typed lines to the server until logout or end of input
pub async fn run_outbound<W>(
    mut input: mpsc::Receiver<String>,
    mut outbound: Outbound<W>,
    session: SessionState,
    console: Console,
) -> Result<SessionExit>
where
    W: AsyncWrite + Unpin,
{
    let exit = loop {
        let Some(line) = input.recv().await else {
            break SessionExit::InputClosed;
        };
        console.submitted();

        let msg = match parse_input(&line) {
            None => {
                tracing::trace!("Ignoring input line");
                console.redraw(&session.read())?;
                continue;
            }
            Some(Message::Logout) => break SessionExit::Logout,
            Some(msg) => msg,
        };

        let joined = match &msg {
            Message::Cmd(Command::JoinChannel(channel)) => Some(channel.clone()),
            _ => None,
        };

        // SinkExt::send flushes, so every frame leaves before the next line is read
        outbound.send(msg).await?;

        let channel = match joined {
            Some(channel) => {
                let previous = session.swap(channel.clone());
                tracing::debug!("Switched channel from {} to {}", previous, channel);
                channel
            }
            None => session.read(),
        };
        console.sent(&line, &channel)?;
    };

    tracing::info!(?exit, "Outbound loop finished");
    if let Err(e) = outbound.close().await {
        tracing::debug!("Failed to close connection: {}", e);
    }
    Ok(exit)
}

/// Render server replies until the server closes the connection
pub async fn run_inbound<R>(
    mut inbound: Inbound<R>,
    session: SessionState,
    console: Console,
) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    while let Some(reply) = inbound.next().await {
        let reply = reply?;
        tracing::trace!(?reply, "Received reply");
        console.reply(&reply, &session.read())?;
    }

    tracing::info!("Server closed connection");
    Ok(())
}
