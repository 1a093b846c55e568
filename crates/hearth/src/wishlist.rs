// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wishlist subcommands.

use clap::Subcommand;
use colored::Colorize;
use hearth_client::GuardRequirement;
use hearth_core::types::PropertyId;
use hearth_core::HearthError;

use crate::context::AppContext;
use crate::render;

#[derive(Subcommand, Debug)]
pub enum WishlistCommand {
    /// Show your wishlist.
    List,
    /// Add or remove a property.
    Toggle { property: String },
    /// Empty the wishlist.
    Clear,
}

pub async fn run(ctx: &AppContext, cmd: WishlistCommand) -> Result<(), HearthError> {
    ctx.authorize(GuardRequirement::authenticated()).await?;

    match cmd {
        WishlistCommand::List => {
            let entries = ctx.wishlist.list().await?;
            if entries.is_empty() {
                println!("wishlist is empty");
                return Ok(());
            }
            for entry in &entries {
                match entry.property.populated() {
                    Some(property) => render::print_property(property),
                    None => println!("{}", entry.property.id()),
                }
            }
        }
        WishlistCommand::Toggle { property } => {
            let wishlisted = ctx.wishlist.toggle(&PropertyId(property)).await?;
            if wishlisted {
                println!("{} added to wishlist", "ok:".green().bold());
            } else {
                println!("{} removed from wishlist", "ok:".green().bold());
            }
        }
        WishlistCommand::Clear => {
            ctx.wishlist.clear().await?;
            println!("{} wishlist cleared", "ok:".green().bold());
        }
    }
    Ok(())
}
