//! Mailcast binary.
//!
//! Reads one Internet Message Format document from stdin and delivers
//! it as chat messages, including group conversations:
//!
//! ```text
//! From: bot@home-server
//! To: <user@xmpp.me>, <group/groupchat@muc.xmpp.me>
//! Subject: Huston, we got a problem
//!
//! The mainframe is down.
//! ```
//!
//! The `From` value is the nickname used for group conversations.
//! Group targets are marked `username/groupchat@domain` in `To`.
//! Credentials come from `--jid`/`--password` or from the
//! configuration file (default `/etc/mailcast/mailcast.toml`):
//!
//! ```toml
//! [account]
//! jid = "bot@example.org"
//! password = "botpassword"
//! ```

use std::{io, path::PathBuf, process::ExitCode};

use clap::Parser;
use mailcast_cli::{
    config,
    runtime::{self, RuntimeError},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Send an Internet Message Format document as chat messages
#[derive(Parser, Debug)]
#[command(name = "mailcast")]
#[command(about = "Send one message document from stdin as chat deliveries")]
#[command(version)]
struct Args {
    /// Set logging to ERROR
    #[arg(short, long)]
    quiet: bool,

    /// Set logging to DEBUG
    #[arg(short, long)]
    debug: bool,

    /// Alternative configuration file location
    #[arg(short = 'C', long, default_value = config::DEFAULT_CONFIG_PATH)]
    config_file: PathBuf,

    /// Account jid to use (overrides the configuration file)
    #[arg(long)]
    jid: Option<String>,

    /// Account password to use (overrides the configuration file)
    #[arg(long)]
    password: Option<String>,

    /// Read the message from standard input (required)
    #[arg(short = 't')]
    stdin_message: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.quiet {
        "error"
    } else if args.debug {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    if !args.stdin_message {
        tracing::error!("the -t flag is required: the message is read from standard input");
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        },
    }
}

async fn run(args: Args) -> Result<(), RuntimeError> {
    let account = config::resolve(&args.config_file, args.jid, args.password)?;
    let raw = io::read_to_string(io::stdin())?;
    runtime::run(&account, &raw).await
}
