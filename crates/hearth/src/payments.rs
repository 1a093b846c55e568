// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The "Pay Now" flow: initialize a payment session and hand it to the
//! hosted checkout. Completion is observed via the server, never assumed.

use clap::Args;
use colored::Colorize;
use hearth_client::payments::HostedCheckout;
use hearth_client::GuardRequirement;
use hearth_core::policy::{self, Actor};
use hearth_core::types::BookingId;
use hearth_core::HearthError;

use crate::context::AppContext;
use crate::render;

#[derive(Args, Debug)]
pub struct PayArgs {
    /// The confirmed booking to pay for.
    pub booking: String,
}

pub async fn run(ctx: &AppContext, args: PayArgs) -> Result<(), HearthError> {
    let user = ctx.authorize(GuardRequirement::authenticated()).await?;
    let actor = Actor::from_user(&user);

    let booking = ctx.bookings.get(&BookingId(args.booking)).await?;

    if !policy::can_pay(&actor, &booking) {
        return Err(HearthError::api(
            "This booking is not payable: it must be yours, agent-confirmed, and not already paid.",
            403,
        ));
    }

    let public_key = ctx.config.payment.public_key.clone().ok_or_else(|| {
        HearthError::Checkout("no payment.public_key configured; cannot start checkout".into())
    })?;
    let checkout = HostedCheckout::new(public_key)?;

    let url = ctx
        .payments
        .start_payment(&checkout, &booking, &user.email)
        .await?;

    if let Some(price) = booking.price {
        println!(
            "{} payment session created for {}",
            "ok:".green().bold(),
            render::format_amount(price)
        );
    }
    println!("complete your payment here:\n  {}", url.underline());
    println!(
        "then run {} to see the updated status",
        format!("hearth bookings show {}", booking.id.0).bold()
    );
    Ok(())
}
