// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property subcommands. Browsing is public; only the agent/admin
//! management surface is gated.

use clap::{Args, Subcommand};
use colored::Colorize;
use hearth_client::properties::PropertyQuery;
use hearth_client::GuardRequirement;
use hearth_core::types::{ListingType, PropertyId};
use hearth_core::HearthError;

use crate::context::AppContext;
use crate::render;

#[derive(Subcommand, Debug)]
pub enum PropertiesCommand {
    /// Browse listings.
    List(ListArgs),
    /// Show one listing with its reviews summary.
    Show { id: String },
    /// Remove a listing (agents and admins; the server enforces ownership).
    Delete { id: String },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// sale or rent.
    #[arg(long = "type")]
    pub listing_type: Option<ListingType>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub min_price: Option<i64>,
    #[arg(long)]
    pub max_price: Option<i64>,
    #[arg(long)]
    pub bedrooms: Option<u32>,
}

pub async fn run(ctx: &AppContext, cmd: PropertiesCommand) -> Result<(), HearthError> {
    match cmd {
        PropertiesCommand::List(args) => {
            let query = PropertyQuery {
                listing_type: args.listing_type,
                city: args.city,
                min_price: args.min_price,
                max_price: args.max_price,
                bedrooms: args.bedrooms,
            };
            let properties = ctx.properties.list(&query).await?;
            if properties.is_empty() {
                println!("no matching properties");
                return Ok(());
            }
            for property in &properties {
                render::print_property(property);
            }
        }
        PropertiesCommand::Show { id } => {
            let id = PropertyId(id);
            let property = ctx.properties.get(&id).await?;
            render::print_property(&property);
            if let Some(description) = &property.description {
                println!("\n{description}");
            }
            // Reviews are an empty state, not a failure, when missing.
            match ctx.reviews.stats(&id).await {
                Ok(stats) if stats.review_count > 0 => {
                    println!(
                        "\nrating: {:.1}/5 ({} reviews)",
                        stats.average_rating, stats.review_count
                    );
                }
                Ok(_) => println!("\nno reviews yet"),
                Err(e) if e.is_not_found() => println!("\nno reviews yet"),
                Err(e) => return Err(e),
            }
        }
        PropertiesCommand::Delete { id } => {
            ctx.authorize(GuardRequirement::authenticated()).await?;
            ctx.properties.delete(&PropertyId(id)).await?;
            println!("{} listing removed", "ok:".green().bold());
        }
    }
    Ok(())
}
