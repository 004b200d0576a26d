//! chit client - terminal chat client
//!
//! Connects to a chit server over TCP, logs in, and then runs the
//! inbound and outbound chat loops until logout or disconnect.

use chit_utils::{init_logging_with_config, LogConfig, Result};

mod chat;
mod cli;
mod config;
mod connection;
mod session;
mod startup;
mod ui;

use chat::SessionExit;
use cli::Args;
use session::SessionState;
use ui::Console;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments first
    let args = Args::parse_args();

    // Log to file; stdout belongs to the chat
    init_logging_with_config(LogConfig::client())?;
    tracing::info!("chit client starting");
    tracing::debug!("CLI args: {:?}", args);

    match run_app(args).await {
        Ok(exit) => {
            tracing::info!(?exit, "chit client exiting normally");
            Ok(())
        }
        Err(e) => {
            tracing::error!("chit client error: {}", e);
            eprintln!("Error: {}", e);
            Err(e)
        }
    }
}

async fn run_app(args: Args) -> Result<SessionExit> {
    let config = match &args.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    };

    let console = Console::stdout();
    console.banner()?;

    let mut input = ui::spawn_stdin_reader()?;

    let addr_input =
        startup::value_or_prompt(args.addr, &console, &mut input, "Server address").await?;
    let addr = connection::resolve_addr(
        &addr_input,
        args.port.unwrap_or(config.default_port),
        &config.remotes,
    )?;
    let username = startup::value_or_prompt(
        args.username.or(config.username),
        &console,
        &mut input,
        "Username",
    )
    .await?;

    let stream = connection::connect(&addr).await?;
    let (inbound, mut outbound) = connection::split(stream);
    connection::login(&mut outbound, &username).await?;

    let session = SessionState::new(args.channel.unwrap_or(config.default_channel));
    console.notice(&format!("Connected to {} as {}", addr, username))?;
    console.divider(&session.read())?;

    let exit = chat::run(inbound, outbound, input, session, console.clone()).await?;
    if exit == SessionExit::ServerClosed {
        console.notice("Connection closed by server")?;
    }
    Ok(exit)
}
