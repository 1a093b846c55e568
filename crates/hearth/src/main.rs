// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hearth - command-line client for the Hearth real-estate platform.
//!
//! This is the presentation layer: every subcommand talks to the platform
//! through the typed domain clients, renders booking actions from the
//! shared policy module, and sits behind the screen guard for anything
//! protected.

mod agents;
mod auth;
mod bookings;
mod context;
mod notifications;
mod payments;
mod properties;
mod render;
mod wishlist;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::context::AppContext;

/// Hearth - browse properties, manage bookings, get paid visits done.
#[derive(Parser, Debug)]
#[command(name = "hearth", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in with your account email.
    Login(auth::LoginArgs),
    /// Create an account and log in.
    Signup(auth::SignupArgs),
    /// Log out. Local session is cleared immediately.
    Logout,
    /// Show the currently authenticated identity.
    Whoami,
    /// Browse and manage property listings.
    #[command(subcommand)]
    Properties(properties::PropertiesCommand),
    /// Create and manage bookings.
    #[command(subcommand)]
    Bookings(bookings::BookingsCommand),
    /// Pay for a confirmed rental or purchase booking.
    Pay(payments::PayArgs),
    /// Manage your wishlist.
    #[command(subcommand)]
    Wishlist(wishlist::WishlistCommand),
    /// Read your notifications.
    #[command(subcommand)]
    Notifications(notifications::NotificationsCommand),
    /// Agent applications: apply, or review as admin.
    #[command(subcommand)]
    Agent(agents::AgentCommand),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match hearth_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            hearth_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.client.log_level);

    let ctx = match AppContext::new(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Login(args) => auth::login(&ctx, args).await,
        Commands::Signup(args) => auth::signup(&ctx, args).await,
        Commands::Logout => auth::logout(&ctx).await,
        Commands::Whoami => auth::whoami(&ctx).await,
        Commands::Properties(cmd) => properties::run(&ctx, cmd).await,
        Commands::Bookings(cmd) => bookings::run(&ctx, cmd).await,
        Commands::Pay(args) => payments::run(&ctx, args).await,
        Commands::Wishlist(cmd) => wishlist::run(&ctx, cmd).await,
        Commands::Notifications(cmd) => notifications::run(&ctx, cmd).await,
        Commands::Agent(cmd) => agents::run(&ctx, cmd).await,
    };

    if let Err(e) = result {
        // Uniform 401 policy, applied once for every command: an expired
        // authenticated session is cleared and reported as such.
        let e = ctx.surface(e).await;
        eprintln!("{} {e}", "error:".red().bold());
        std::process::exit(1);
    }
}

/// Logging level comes from `client.log_level`; `RUST_LOG` wins when set.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
