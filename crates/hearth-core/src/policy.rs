// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Booking status and authorization policy.
//!
//! The single source of truth for which actor may see or perform which
//! action on a booking in which state. Every view renders booking actions
//! from these predicates; nothing re-derives the conditions locally.
//!
//! All functions are pure: no I/O, no clocks, no session lookups. The
//! caller supplies the acting identity as an [`Actor`] snapshot.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::models::{Booking, CurrentUser};
use crate::types::{BookingStatus, PaymentStatus, Role};

/// The acting identity a predicate is evaluated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Actor {
            id: id.into(),
            role,
        }
    }

    /// Snapshot the authenticated user as an actor.
    pub fn from_user(user: &CurrentUser) -> Self {
        Actor {
            id: user.id.0.clone(),
            role: user.role,
        }
    }

    fn is_requester(&self, booking: &Booking) -> bool {
        self.id == booking.requester_id()
    }

    fn is_staff(&self) -> bool {
        // Flat roles: "agent or admin" is spelled out, never inferred.
        matches!(self.role, Role::Agent | Role::Admin)
    }
}

/// An action a view may offer on a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum BookingAction {
    Pay,
    Confirm,
    Reject,
    Cancel,
    ConfirmPayment,
}

/// "Pay Now" is offered iff the actor is the requesting user, the booking
/// carries a payment (rental/purchase), the agent has confirmed, and the
/// payment is not already settled.
pub fn can_pay(actor: &Actor, booking: &Booking) -> bool {
    actor.role == Role::User
        && actor.is_requester(booking)
        && booking.payment_relevant()
        && booking.status == BookingStatus::AgentConfirmed
        && booking.payment_status != PaymentStatus::Paid
}

/// Agents and admins may confirm a booking that is still pending.
pub fn can_confirm(actor: &Actor, booking: &Booking) -> bool {
    actor.is_staff() && booking.status == BookingStatus::Pending
}

/// Agents and admins may reject a booking that is still pending.
pub fn can_reject(actor: &Actor, booking: &Booking) -> bool {
    actor.is_staff() && booking.status == BookingStatus::Pending
}

/// The requester may cancel their own booking while it is pending.
///
/// The server additionally accepts a requester cancel from any non-terminal
/// status; the domain client passes such requests through and surfaces the
/// server's verdict. This predicate governs what views offer.
pub fn can_cancel(actor: &Actor, booking: &Booking) -> bool {
    actor.is_requester(booking) && booking.status == BookingStatus::Pending
}

/// "Confirm Payment" is offered to agents and admins once the requester's
/// payment is in flight on a confirmed rental/purchase.
pub fn can_confirm_payment(actor: &Actor, booking: &Booking) -> bool {
    actor.is_staff()
        && booking.payment_relevant()
        && booking.status == BookingStatus::AgentConfirmed
        && booking.payment_status == PaymentStatus::Pending
}

/// The full set of actions a view should offer this actor on this booking.
pub fn visible_actions(actor: &Actor, booking: &Booking) -> Vec<BookingAction> {
    let mut actions = Vec::new();
    if can_pay(actor, booking) {
        actions.push(BookingAction::Pay);
    }
    if can_confirm(actor, booking) {
        actions.push(BookingAction::Confirm);
    }
    if can_reject(actor, booking) {
        actions.push(BookingAction::Reject);
    }
    if can_cancel(actor, booking) {
        actions.push(BookingAction::Cancel);
    }
    if can_confirm_payment(actor, booking) {
        actions.push(BookingAction::ConfirmPayment);
    }
    actions
}

/// Role-gated access check over an optional session.
///
/// `None` user denies everything. `None` requirement admits any
/// authenticated user. Otherwise flat equality: admin does not satisfy an
/// agent-only requirement.
pub fn can_access(user: Option<&CurrentUser>, required: Option<Role>) -> bool {
    let Some(user) = user else {
        return false;
    };
    match required {
        None => true,
        Some(role) => user.role.satisfies(role),
    }
}
