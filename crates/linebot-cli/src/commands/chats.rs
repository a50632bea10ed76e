//! Leave command - leaves a group or room.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use super::{Context, print_done};

/// Arguments for the leave command.
#[derive(Args, Debug)]
pub struct LeaveArgs {
    #[command(subcommand)]
    pub target: LeaveTarget,
}

#[derive(Subcommand, Debug)]
pub enum LeaveTarget {
    /// Leave a group chat
    Group {
        /// Group ID
        group_id: String,
    },

    /// Leave a multi-person chat room
    Room {
        /// Room ID
        room_id: String,
    },
}

/// Run the leave command.
pub async fn run(args: LeaveArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let chats = client.chats().with_context(ctx.request.clone());

    match &args.target {
        LeaveTarget::Group { group_id } => {
            chats
                .leave_group(group_id)
                .await
                .with_context(|| format!("failed to leave group {}", group_id))?;
            print_done(ctx, "left group", group_id)
        }
        LeaveTarget::Room { room_id } => {
            chats
                .leave_room(room_id)
                .await
                .with_context(|| format!("failed to leave room {}", room_id))?;
            print_done(ctx, "left room", room_id)
        }
    }
}
