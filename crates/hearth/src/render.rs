// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal rendering helpers. Every listing renders status and actions
//! the same way, fed by the shared policy module.

use colored::{ColoredString, Colorize};
use hearth_core::models::{Booking, Notification, Property};
use hearth_core::policy::{self, Actor};
use hearth_core::types::{BookingStatus, PaymentStatus};

/// Colored badge for a booking's workflow status.
pub fn status_badge(status: BookingStatus) -> ColoredString {
    let label = status.to_string().replace('_', " ");
    match status {
        BookingStatus::Pending => label.yellow(),
        BookingStatus::AgentConfirmed => label.green(),
        BookingStatus::Rejected => label.red(),
        BookingStatus::Cancelled => label.dimmed(),
        BookingStatus::Completed => label.blue(),
    }
}

/// Payment state suffix, shown only where payment is relevant.
pub fn payment_badge(booking: &Booking) -> Option<ColoredString> {
    if !booking.payment_relevant() {
        return None;
    }
    Some(match booking.payment_status {
        PaymentStatus::None => "unpaid".dimmed(),
        PaymentStatus::Pending => "payment pending".yellow(),
        PaymentStatus::Paid => "paid".green(),
    })
}

/// `5000000` -> `₦5,000,000`.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}\u{20a6}{grouped}")
}

/// One line per booking: id, property, intent, status, actions for me.
pub fn print_booking(booking: &Booking, actor: &Actor) {
    let title = booking
        .property
        .populated()
        .map(|p| p.title.as_str())
        .unwrap_or("(property)");

    let mut line = format!(
        "{}  {}  {}  {}",
        booking.id.0.bold(),
        title,
        booking.booking_type,
        status_badge(booking.status),
    );
    if let Some(badge) = payment_badge(booking) {
        line.push_str(&format!("  {badge}"));
    }
    if let Some(price) = booking.price {
        line.push_str(&format!("  {}", format_amount(price)));
    }
    println!("{line}");

    if let Some(slot) = &booking.time_slot
        && let Some(date) = booking.date
    {
        println!("    {} {} - {}", date.format("%Y-%m-%d"), slot.start, slot.end);
    }
    if let Some(message) = &booking.message {
        println!("    \u{201c}{message}\u{201d}");
    }

    let actions = policy::visible_actions(actor, booking);
    if !actions.is_empty() {
        let rendered: Vec<String> = actions.iter().map(|a| a.to_string()).collect();
        println!("    actions: {}", rendered.join(", ").cyan());
    }
}

/// One line per property listing.
pub fn print_property(property: &Property) {
    let price = property
        .price
        .map(format_amount)
        .unwrap_or_else(|| "price on request".into());
    let mut line = format!("{}  {}  {}", property.id.0.bold(), property.title, price);
    if let (Some(beds), Some(baths)) = (property.bedrooms, property.bathrooms) {
        line.push_str(&format!("  {beds} bed / {baths} bath"));
    }
    if let Some(address) = &property.address
        && let Some(city) = &address.city
    {
        line.push_str(&format!("  {city}"));
    }
    if let Some(listing_type) = property.listing_type {
        line.push_str(&format!("  [{listing_type}]"));
    }
    println!("{line}");
}

/// One line per notification; unread ones stand out.
pub fn print_notification(notification: &Notification) {
    let marker = if notification.read {
        " ".normal()
    } else {
        "\u{25cf}".cyan()
    };
    let mut line = format!("{marker} {}  {}", notification.id.dimmed(), notification.message);
    if let Some(at) = notification.created_at {
        line.push_str(&format!("  {}", at.format("%Y-%m-%d %H:%M").to_string().dimmed()));
    }
    println!("{line}");
}
