//! CLI command handlers.

pub mod chats;
pub mod config;
pub mod messages;
pub mod profile;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use linebot::{LineClient, RequestContext};
use serde::Serialize;

use crate::config::Settings;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Merged settings (file, environment, flags).
    pub settings: Settings,
    /// Settings file named on the command line, if any.
    pub config_path: Option<PathBuf>,
    /// Cancellation and deadline applied to every request.
    pub request: RequestContext,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// Build an API client from the merged settings.
    pub fn client(&self) -> Result<LineClient> {
        LineClient::new(self.settings.client_config()).context(
            "could not create client (set --channel-secret/--channel-token, \
             LINE_CHANNEL_SECRET/LINE_CHANNEL_TOKEN, or the settings file)",
        )
    }
}

/// Result line for commands that only report success.
#[derive(Debug, Serialize)]
struct Done<'a> {
    ok: bool,
    action: &'a str,
    target: &'a str,
}

/// Print a success line, as JSON when requested.
fn print_done(ctx: &Context, action: &str, target: &str) -> Result<()> {
    if ctx.json_output {
        let output = Done {
            ok: true,
            action,
            target,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let green = console::Style::new().green();
        println!("{} {} {}", green.apply_to("✓"), action, target);
    }
    Ok(())
}
