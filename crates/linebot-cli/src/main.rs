//! linebot - command-line tool for the LINE Messaging API
//!
//! Main entry point for the CLI.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use linebot::{CancellationToken, RequestContext};

mod commands;
mod config;

use commands::{chats, config as config_cmd, messages, profile};
use config::Settings;

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// linebot - send messages and query the LINE Messaging API
#[derive(Parser)]
#[command(name = "linebot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Settings file (default: <config dir>/linebot/config.toml)
    #[arg(long, global = true, env = "LINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// API root (default: https://api.line.me)
    #[arg(long, global = true, env = "LINE_ENDPOINT_BASE")]
    pub endpoint_base: Option<String>,

    /// Channel secret
    #[arg(long, global = true, env = "LINE_CHANNEL_SECRET", hide_env_values = true)]
    pub channel_secret: Option<String>,

    /// Channel access token
    #[arg(long, global = true, env = "LINE_CHANNEL_TOKEN", hide_env_values = true)]
    pub channel_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Push messages to a user, group or room
    Push(messages::PushArgs),

    /// Reply to a webhook event
    Reply(messages::ReplyArgs),

    /// Send the same messages to several users
    Multicast(messages::MulticastArgs),

    /// Download the content of a received message
    Content(messages::ContentArgs),

    /// Show a user's profile
    Profile(profile::ProfileArgs),

    /// Leave a group or room
    Leave(chats::LeaveArgs),

    /// Inspect the resolved settings
    Config(config_cmd::ConfigArgs),
}

impl Cli {
    /// Settings given on the command line or through the environment.
    fn overrides(&self) -> Settings {
        Settings {
            channel_secret: self.channel_secret.clone(),
            channel_token: self.channel_token.clone(),
            endpoint_base: self.endpoint_base.clone(),
            timeout_secs: self.timeout,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Interrupts
// ─────────────────────────────────────────────────────────────────────────────

/// Exit status after an interrupt (128 + SIGINT).
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Time a cancelled command gets to report before the process exits.
const INTERRUPT_GRACE: Duration = Duration::from_millis(500);

/// Wait for `signal`, cancel the in-flight request, then give the command
/// `grace` to unwind. Returns `false` if the signal could not be awaited.
async fn cancel_on_interrupt<F>(signal: F, cancellation: CancellationToken, grace: Duration) -> bool
where
    F: Future<Output = std::io::Result<()>>,
{
    if signal.await.is_err() {
        return false;
    }
    tracing::debug!("interrupt received, cancelling request");
    cancellation.cancel();
    tokio::time::sleep(grace).await;
    true
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable.
    let filter = if cli.verbose {
        "linebot=debug,warn"
    } else {
        "linebot=info,warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let file_settings = config::load(cli.config.as_deref()).context("failed to load settings")?;
    let settings = file_settings.merge(cli.overrides());

    // Ctrl-C aborts whatever request is in flight, then exits if the
    // command has not finished by itself.
    let cancellation = CancellationToken::new();
    {
        let cancellation = cancellation.clone();
        tokio::spawn(async move {
            if cancel_on_interrupt(tokio::signal::ctrl_c(), cancellation, INTERRUPT_GRACE).await {
                std::process::exit(INTERRUPTED_EXIT_CODE);
            }
        });
    }

    let mut request = RequestContext::new().with_cancellation(cancellation);
    if let Some(timeout) = settings.timeout() {
        request = request.with_timeout(timeout);
    }

    let ctx = commands::Context {
        settings,
        config_path: cli.config.clone(),
        request,
        json_output: cli.json,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Push(args) => messages::push(args, &ctx).await,
        Commands::Reply(args) => messages::reply(args, &ctx).await,
        Commands::Multicast(args) => messages::multicast(args, &ctx).await,
        Commands::Content(args) => messages::content(args, &ctx).await,
        Commands::Profile(args) => profile::run(args, &ctx).await,
        Commands::Leave(args) => chats::run(args, &ctx).await,
        Commands::Config(args) => config_cmd::run(args, &ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_interrupt_cancels_then_waits_grace() {
        let token = CancellationToken::new();
        let grace = Duration::from_millis(50);
        let started = std::time::Instant::now();

        assert!(cancel_on_interrupt(async { Ok(()) }, token.clone(), grace).await);
        assert!(token.is_cancelled());
        assert!(started.elapsed() >= grace);
    }

    #[tokio::test]
    async fn test_failed_signal_leaves_request_alone() {
        let token = CancellationToken::new();
        let signal = async { Err(std::io::Error::other("no signal handler")) };

        assert!(!cancel_on_interrupt(signal, token.clone(), Duration::ZERO).await);
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_timeout_must_be_positive() {
        assert!(Cli::try_parse_from(["linebot", "--timeout", "0", "profile", "U1"]).is_err());
        let cli = Cli::try_parse_from(["linebot", "--timeout", "5", "profile", "U1"]).unwrap();
        assert_eq!(cli.timeout, Some(5));
    }
}
