// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification subcommands. Fetched when asked for -- there is no
//! background poller.

use clap::Subcommand;
use colored::Colorize;
use hearth_client::GuardRequirement;
use hearth_core::HearthError;

use crate::context::AppContext;
use crate::render;

#[derive(Subcommand, Debug)]
pub enum NotificationsCommand {
    /// Show notifications and the unread count.
    List,
    /// Mark one notification as read.
    Read { id: String },
}

pub async fn run(ctx: &AppContext, cmd: NotificationsCommand) -> Result<(), HearthError> {
    ctx.authorize(GuardRequirement::authenticated()).await?;

    match cmd {
        NotificationsCommand::List => {
            let page = ctx.notifications.list().await?;
            if page.notifications.is_empty() {
                println!("no notifications");
                return Ok(());
            }
            for notification in &page.notifications {
                render::print_notification(notification);
            }
            if page.unread_count > 0 {
                println!("\n{} unread", page.unread_count.to_string().cyan().bold());
            }
        }
        NotificationsCommand::Read { id } => {
            ctx.notifications.mark_read(&id).await?;
            println!("{} marked as read", "ok:".green().bold());
        }
    }
    Ok(())
}
