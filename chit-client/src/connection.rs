//! Client-server connection management
//!
//! Resolves the server address typed by the user (or taken from the
//! config) and opens a framed TCP stream to it.

use std::collections::HashMap;
use std::fmt;

use futures::SinkExt;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio_util::codec::{FramedRead, FramedWrite};
use url::Url;

use chit_protocol::{ClientCodec, Message};
use chit_utils::{ChitError, Result};

/// Incoming half of a connection, yielding server replies
pub type Inbound<R = OwnedReadHalf> = FramedRead<R, ClientCodec>;

/// Outgoing half of a connection, accepting client messages
pub type Outbound<W = OwnedWriteHalf> = FramedWrite<W, ClientCodec>;

/// Resolved server address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddr {
    pub host: String,
    pub port: u16,
}

impl fmt::Display for ServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Resolve user input into a server address
///
/// Accepts a remote alias from the config, `tcp://host[:port]`,
/// `host:port`, or a bare host. A missing port falls back to
/// `default_port`.
pub fn resolve_addr(
    input: &str,
    default_port: u16,
    remotes: &HashMap<String, String>,
) -> Result<ServerAddr> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ChitError::connection("No server address given"));
    }

    let target = match remotes.get(input) {
        Some(aliased) => {
            tracing::debug!("Resolved remote alias '{}' to {}", input, aliased);
            aliased.as_str()
        }
        None => input,
    };

    let url_str = if target.starts_with("tcp://") {
        target.to_string()
    } else if target.contains("://") {
        return Err(ChitError::connection(format!(
            "Unsupported address scheme in '{}'",
            target
        )));
    } else {
        format!("tcp://{}", target)
    };

    let url = Url::parse(&url_str)
        .map_err(|e| ChitError::connection(format!("Invalid address '{}': {}", target, e)))?;

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| ChitError::connection(format!("Missing host in '{}'", target)))?;

    Ok(ServerAddr {
        host: host.to_string(),
        port: url.port().unwrap_or(default_port),
    })
}

/// Open a TCP connection to the server
pub async fn connect(addr: &ServerAddr) -> Result<TcpStream> {
    let target = addr.to_string();
    let stream = TcpStream::connect(&target)
        .await
        .map_err(|e| ChitError::connection(format!("Failed to connect to {}: {}", target, e)))?;

    tracing::info!("Connected to {}", target);
    Ok(stream)
}

/// Split a stream into framed inbound and outbound halves
pub fn frame<R, W>(reader: R, writer: W) -> (Inbound<R>, Outbound<W>)
where
    R: AsyncRead,
    W: AsyncWrite,
{
    (
        FramedRead::new(reader, ClientCodec::new()),
        FramedWrite::new(writer, ClientCodec::new()),
    )
}

/// Split a connected TCP stream into framed halves
pub fn split(stream: TcpStream) -> (Inbound, Outbound) {
    let (reader, writer) = stream.into_split();
    frame(reader, writer)
}

/// Send the session handshake
pub async fn login<W>(outbound: &mut Outbound<W>, username: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    outbound.send(Message::Login(username.to_string())).await?;
    tracing::info!("Logged in as {}", username);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use tokio::io::{AsyncBufReadExt, BufReader};
    use tokio::net::TcpListener;

    fn no_remotes() -> HashMap<String, String> {
        HashMap::new()
    }

    #[test]
    fn test_resolve_host_and_port() {
        let addr = resolve_addr("127.0.0.1:5000", 4000, &no_remotes()).unwrap();
        assert_eq!(
            addr,
            ServerAddr {
                host: "127.0.0.1".into(),
                port: 5000
            }
        );
    }

    #[test]
    fn test_resolve_bare_host_uses_default_port() {
        let addr = resolve_addr("  chat.example.org ", 4000, &no_remotes()).unwrap();
        assert_eq!(addr.host, "chat.example.org");
        assert_eq!(addr.port, 4000);
    }

    #[test]
    fn test_resolve_tcp_url() {
        let addr = resolve_addr("tcp://10.0.0.2:7000", 4000, &no_remotes()).unwrap();
        assert_eq!(addr.to_string(), "10.0.0.2:7000");
    }

    #[test]
    fn test_resolve_remote_alias() {
        let mut remotes = HashMap::new();
        remotes.insert("home".to_string(), "tcp://192.168.1.5:9999".to_string());

        let addr = resolve_addr("home", 4000, &remotes).unwrap();
        assert_eq!(addr.to_string(), "192.168.1.5:9999");
    }

    #[test]
    fn test_resolve_rejects_bad_input() {
        assert!(resolve_addr("", 4000, &no_remotes()).is_err());
        assert!(resolve_addr("unix:///tmp/chit.sock", 4000, &no_remotes()).is_err());
        assert!(resolve_addr("host:notaport", 4000, &no_remotes()).is_err());
    }

    #[tokio::test]
    async fn test_connect_refused_is_connection_error() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let addr = ServerAddr {
            host: "127.0.0.1".into(),
            port,
        };
        let result = connect(&addr).await;
        assert!(matches!(result, Err(ChitError::Connection(_))));
    }

    #[tokio::test]
    async fn test_connect_and_login() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut lines = BufReader::new(stream).lines();
            lines.next_line().await.unwrap()
        });

        let addr = ServerAddr {
            host: "127.0.0.1".into(),
            port,
        };
        let stream = connect(&addr).await.unwrap();
        let (_inbound, mut outbound) = split(stream);
        login(&mut outbound, "alex").await.unwrap();

        assert_eq!(server.await.unwrap(), Some("Login|~|alex".to_string()));
    }

    #[tokio::test]
    async fn test_frame_reads_replies() {
        let (client, mut server) = tokio::io::duplex(256);
        let (reader, writer) = tokio::io::split(client);
        let (mut inbound, _outbound) = frame(reader, writer);

        tokio::io::AsyncWriteExt::write_all(&mut server, b"S|~|welcome\n")
            .await
            .unwrap();

        let reply = inbound.next().await.unwrap().unwrap();
        assert_eq!(reply, chit_protocol::Reply::Server("welcome".into()));
    }
}
