//! Command-line argument parsing for the chit client
//!
//! Uses clap for argument parsing with derive macros.

use clap::Parser;
use std::path::PathBuf;

/// chit - terminal chat client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Server address (host, host:port, tcp://host:port, or a remote alias)
    ///
    /// Prompted for interactively when omitted.
    #[arg(long, short = 'a', env = "CHIT_ADDR")]
    pub addr: Option<String>,

    /// Username to log in with
    ///
    /// Prompted for interactively when neither this nor the config file
    /// provides one.
    #[arg(long, short = 'u', env = "CHIT_USER")]
    pub username: Option<String>,

    /// Channel shown before the first /join (overrides default_channel)
    #[arg(long, short = 'c')]
    pub channel: Option<String>,

    /// Port used when the address has none (overrides default_port)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Alternate config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
