//! Profile command - shows a user's profile.

use anyhow::{Context as _, Result};
use clap::Args;
use console::{Style, style};

use super::Context;

/// Arguments for the profile command.
#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// User ID
    pub user_id: String,
}

/// Run the profile command.
pub async fn run(args: ProfileArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    let profile = client
        .profiles()
        .with_context(ctx.request.clone())
        .get(&args.user_id)
        .await
        .with_context(|| format!("failed to get profile of {}", args.user_id))?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    println!();
    println!("{}", style(&profile.display_name).bold());
    println!("{}", dim.apply_to("─".repeat(40)));
    println!("  {} {}", dim.apply_to("User ID:"), profile.user_id);
    if let Some(status) = &profile.status_message {
        println!("  {} {}", dim.apply_to("Status:"), status);
    }
    if let Some(picture) = &profile.picture_url {
        println!("  {} {}", dim.apply_to("Picture:"), picture);
    }
    println!();
    Ok(())
}
