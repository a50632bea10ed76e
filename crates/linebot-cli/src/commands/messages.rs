//! Message commands - push, reply, multicast and content download.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use clap::Args;
use linebot::{Message, MulticastRequest, PushMessageRequest, ReplyMessageRequest};

use super::{Context, print_done};

/// Arguments for the push command.
#[derive(Args, Debug)]
pub struct PushArgs {
    /// Recipient user, group or room ID
    pub to: String,

    /// Text messages to send (one message per argument)
    #[arg(required = true)]
    pub text: Vec<String>,
}

/// Arguments for the reply command.
#[derive(Args, Debug)]
pub struct ReplyArgs {
    /// Reply token from the webhook event
    pub reply_token: String,

    /// Text messages to send (one message per argument)
    #[arg(required = true)]
    pub text: Vec<String>,
}

/// Arguments for the multicast command.
#[derive(Args, Debug)]
pub struct MulticastArgs {
    /// Recipient user ID (repeatable)
    #[arg(long = "to", required = true)]
    pub to: Vec<String>,

    /// Text messages to send (one message per argument)
    #[arg(required = true)]
    pub text: Vec<String>,
}

/// Arguments for the content command.
#[derive(Args, Debug)]
pub struct ContentArgs {
    /// Message ID
    pub message_id: String,

    /// Write the content to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn text_messages(text: Vec<String>) -> Vec<Message> {
    text.into_iter().map(Message::text).collect()
}

/// Run the push command.
pub async fn push(args: PushArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let request = PushMessageRequest::new(args.to.clone(), text_messages(args.text));

    client
        .messages()
        .with_context(ctx.request.clone())
        .push(&request)
        .await
        .context("push failed")?;

    tracing::info!(to = %args.to, count = request.messages.len(), "pushed messages");
    print_done(ctx, "pushed to", &args.to)
}

/// Run the reply command.
pub async fn reply(args: ReplyArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let request = ReplyMessageRequest::new(args.reply_token.clone(), text_messages(args.text));

    client
        .messages()
        .with_context(ctx.request.clone())
        .reply(&request)
        .await
        .context("reply failed")?;

    print_done(ctx, "replied with", &args.reply_token)
}

/// Run the multicast command.
pub async fn multicast(args: MulticastArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let recipients = args.to.join(",");
    let request = MulticastRequest::new(args.to, text_messages(args.text));

    client
        .messages()
        .with_context(ctx.request.clone())
        .multicast(&request)
        .await
        .context("multicast failed")?;

    print_done(ctx, "multicast to", &recipients)
}

/// Run the content command.
pub async fn content(args: ContentArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    let content = client
        .messages()
        .with_context(ctx.request.clone())
        .content(&args.message_id)
        .await
        .with_context(|| format!("failed to fetch content of message {}", args.message_id))?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &content.body)
                .with_context(|| format!("failed to write {}", path.display()))?;
            if ctx.verbose {
                eprintln!(
                    "wrote {} bytes ({}) to {}",
                    content.body.len(),
                    content.content_type.as_deref().unwrap_or("unknown type"),
                    path.display()
                );
            }
        }
        None => {
            if ctx.json_output {
                bail!("--json cannot print binary content; use --output");
            }
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&content.body)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
