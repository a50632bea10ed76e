//! Config command - inspects the resolved settings.

use anyhow::Result;
use clap::{Args, Subcommand};

use super::Context;
use crate::config::default_config_path;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the merged settings (credentials redacted)
    Show,

    /// Print the settings file path
    Path,
}

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let redacted = ctx.settings.redacted();
            if ctx.json_output {
                println!("{}", serde_json::to_string_pretty(&redacted)?);
            } else {
                let rendered = toml::to_string_pretty(&redacted)?;
                if rendered.trim().is_empty() {
                    println!("# no settings");
                } else {
                    print!("{}", rendered);
                }
            }
        }
        ConfigCommand::Path => {
            let path = ctx.config_path.clone().or_else(default_config_path);
            match path {
                Some(path) => println!("{}", path.display()),
                None => anyhow::bail!("no config directory available on this platform"),
            }
        }
    }
    Ok(())
}
