//! Terminal line input
//!
//! Stdin is read on a dedicated thread and forwarded over a channel.
//! A read blocked on stdin then never holds up runtime shutdown.

use std::io::{self, BufRead};

use tokio::sync::mpsc;

use chit_utils::Result;

/// Lines buffered between the reader thread and the outbound loop
const INPUT_BUFFER: usize = 32;

/// Start reading stdin lines in the background
///
/// The channel closes when stdin reaches end-of-file or fails.
pub fn spawn_stdin_reader() -> Result<mpsc::Receiver<String>> {
    let (tx, rx) = mpsc::channel(INPUT_BUFFER);

    std::thread::Builder::new()
        .name("chit-stdin".into())
        .spawn(move || read_lines(io::stdin().lock(), tx))?;

    Ok(rx)
}

fn read_lines<R: BufRead>(reader: R, tx: mpsc::Sender<String>) {
    for line in reader.lines() {
        match line {
            Ok(line) => {
                if tx.blocking_send(line).is_err() {
                    tracing::debug!("Input receiver dropped, stopping stdin reader");
                    return;
                }
            }
            Err(e) => {
                tracing::warn!("Failed to read from stdin: {}", e);
                return;
            }
        }
    }
    tracing::debug!("Stdin closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_lines_forwards_each_line() {
        let (tx, mut rx) = mpsc::channel(8);
        read_lines(Cursor::new("hello\r\n/join rust\n\nlogout"), tx);

        assert_eq!(rx.try_recv().unwrap(), "hello");
        assert_eq!(rx.try_recv().unwrap(), "/join rust");
        assert_eq!(rx.try_recv().unwrap(), "");
        assert_eq!(rx.try_recv().unwrap(), "logout");
        // Sender dropped at EOF
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }

    #[test]
    fn test_read_lines_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(8);
        drop(rx);
        // Must return instead of blocking
        read_lines(Cursor::new("a\nb\nc\n"), tx);
    }
}
