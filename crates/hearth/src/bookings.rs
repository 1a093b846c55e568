// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Booking subcommands: create per intent, list, and the lifecycle
//! transitions. Whether an action is offered/permitted comes from the
//! shared policy module, not from conditions re-derived here.

use chrono::{NaiveDate, TimeZone, Utc};
use clap::{Args, Subcommand};
use colored::Colorize;
use hearth_client::bookings::{BookingFilter, NewBooking};
use hearth_client::GuardRequirement;
use hearth_core::models::TimeSlot;
use hearth_core::policy::{self, Actor};
use hearth_core::types::{BookingId, BookingStatus, BookingType, PropertyId};
use hearth_core::HearthError;

use crate::context::AppContext;
use crate::render;

#[derive(Subcommand, Debug)]
pub enum BookingsCommand {
    /// List bookings visible to you (the server scopes by role).
    List(ListArgs),
    /// Show one booking with the actions available to you.
    Show { id: String },
    /// Request a viewing appointment.
    BookViewing(BookViewingArgs),
    /// Send a rental inquiry.
    BookRental(BookRentalArgs),
    /// Submit a purchase intent.
    BookPurchase(BookPurchaseArgs),
    /// Cancel your pending booking.
    Cancel {
        id: String,
        /// Why you are cancelling.
        #[arg(long)]
        reason: String,
    },
    /// Confirm a pending booking (agents and admins).
    Confirm { id: String },
    /// Reject a pending booking (agents and admins).
    Reject { id: String },
    /// Acknowledge a received payment (agents and admins).
    ConfirmPayment { id: String },
    /// Aggregate booking counters.
    Stats,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by intent: viewing, rental, purchase.
    #[arg(long = "type")]
    pub booking_type: Option<BookingType>,
    /// Filter by workflow status.
    #[arg(long)]
    pub status: Option<BookingStatus>,
}

#[derive(Args, Debug)]
pub struct BookViewingArgs {
    /// Property id.
    pub property: String,
    /// Appointment date, YYYY-MM-DD.
    #[arg(long)]
    pub date: String,
    /// Start of the time window, e.g. 10:00.
    #[arg(long)]
    pub start: String,
    /// End of the time window, e.g. 11:00.
    #[arg(long)]
    pub end: String,
}

#[derive(Args, Debug)]
pub struct BookRentalArgs {
    /// Property id.
    pub property: String,
    /// Optional note to the agent.
    #[arg(long)]
    pub message: Option<String>,
}

#[derive(Args, Debug)]
pub struct BookPurchaseArgs {
    /// Property id.
    pub property: String,
    /// Offer in major currency units.
    #[arg(long)]
    pub price: i64,
}

pub async fn run(ctx: &AppContext, cmd: BookingsCommand) -> Result<(), HearthError> {
    let user = ctx.authorize(GuardRequirement::authenticated()).await?;
    let actor = Actor::from_user(&user);

    match cmd {
        BookingsCommand::List(args) => {
            let filter = BookingFilter {
                booking_type: args.booking_type,
                status: args.status,
            };
            let bookings = ctx.bookings.list(&filter).await?;
            if bookings.is_empty() {
                println!("no bookings");
                return Ok(());
            }
            for booking in &bookings {
                render::print_booking(booking, &actor);
            }
        }
        BookingsCommand::Show { id } => {
            let booking = ctx.bookings.get(&BookingId(id)).await?;
            render::print_booking(&booking, &actor);
        }
        BookingsCommand::BookViewing(args) => {
            let date = NaiveDate::parse_from_str(&args.date, "%Y-%m-%d")
                .map_err(|_| HearthError::api("Date must be YYYY-MM-DD.", 400))?;
            let date = Utc
                .from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight exists"));
            let booking = ctx
                .bookings
                .create(&NewBooking::viewing(
                    PropertyId(args.property),
                    date,
                    TimeSlot {
                        start: args.start,
                        end: args.end,
                    },
                ))
                .await?;
            println!("{} viewing requested: {}", "ok:".green().bold(), booking.id.0);
        }
        BookingsCommand::BookRental(args) => {
            let booking = ctx
                .bookings
                .create(&NewBooking::rental(PropertyId(args.property), args.message))
                .await?;
            println!("{} rental inquiry sent: {}", "ok:".green().bold(), booking.id.0);
        }
        BookingsCommand::BookPurchase(args) => {
            let booking = ctx
                .bookings
                .create(&NewBooking::purchase(PropertyId(args.property), args.price))
                .await?;
            println!(
                "{} purchase intent submitted: {} at {}",
                "ok:".green().bold(),
                booking.id.0,
                render::format_amount(args.price)
            );
        }
        BookingsCommand::Cancel { id, reason } => {
            // The server arbitrates: a second cancel comes back as its
            // conflict error, surfaced unchanged.
            let booking = ctx.bookings.cancel(&BookingId(id), &reason).await?;
            println!("{} booking cancelled", "ok:".green().bold());
            render::print_booking(&booking, &actor);
        }
        BookingsCommand::Confirm { id } => {
            let booking = ctx.bookings.get(&BookingId(id.clone())).await?;
            if !policy::can_confirm(&actor, &booking) {
                return Err(HearthError::api(
                    "This booking cannot be confirmed by you in its current state.",
                    403,
                ));
            }
            let booking = ctx.bookings.confirm(&BookingId(id)).await?;
            println!("{} booking confirmed", "ok:".green().bold());
            render::print_booking(&booking, &actor);
        }
        BookingsCommand::Reject { id } => {
            let booking = ctx.bookings.get(&BookingId(id.clone())).await?;
            if !policy::can_reject(&actor, &booking) {
                return Err(HearthError::api(
                    "This booking cannot be rejected by you in its current state.",
                    403,
                ));
            }
            let booking = ctx.bookings.reject(&BookingId(id)).await?;
            println!("{} booking rejected", "ok:".green().bold());
            render::print_booking(&booking, &actor);
        }
        BookingsCommand::ConfirmPayment { id } => {
            let booking = ctx.bookings.get(&BookingId(id.clone())).await?;
            if !policy::can_confirm_payment(&actor, &booking) {
                return Err(HearthError::api(
                    "No pending payment to confirm on this booking.",
                    403,
                ));
            }
            let booking = ctx.bookings.confirm_payment(&BookingId(id)).await?;
            println!("{} payment confirmed", "ok:".green().bold());
            render::print_booking(&booking, &actor);
        }
        BookingsCommand::Stats => {
            let stats = ctx.bookings.stats().await?;
            println!("total      {}", stats.total);
            println!("pending    {}", stats.pending);
            println!("confirmed  {}", stats.confirmed);
            println!("completed  {}", stats.completed);
            println!("cancelled  {}", stats.cancelled);
            if let Some(value) = stats.total_value {
                println!("value      {}", render::format_amount(value));
            }
        }
    }
    Ok(())
}
