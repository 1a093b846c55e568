// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identifiers and wire enums shared across the Hearth client crates.
//!
//! All enums mirror the server's JSON representation: roles and payment
//! states are lowercase, booking statuses are snake_case. Legacy status
//! spellings that conflated workflow stage with payment state are folded
//! into the canonical variants at the deserialization boundary.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a user account, as issued by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Unique identifier for a property listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub String);

/// Unique identifier for a booking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(pub String);

/// Opaque reference identifying a payment session at the hosted checkout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentReference(pub String);

/// Account role. Access checks are flat equality -- an admin does NOT
/// implicitly satisfy an agent-only requirement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Agent,
    Admin,
}

impl Role {
    /// Flat role check: exact match only, no privilege lattice. Callers
    /// needing "admin or agent" must check both explicitly.
    pub fn satisfies(self, required: Role) -> bool {
        self == required
    }
}

/// Outcome of a user's agent application. Absent on the wire means the
/// user never applied.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AgentStatus {
    Pending,
    Approved,
    Rejected,
}

/// The intent behind a booking request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BookingType {
    Viewing,
    Rental,
    Purchase,
}

impl BookingType {
    /// Payment state is only meaningful for rental and purchase bookings.
    pub fn payment_relevant(self) -> bool {
        matches!(self, BookingType::Rental | BookingType::Purchase)
    }
}

/// Workflow stage of a booking.
///
/// Tracks workflow only; payment progress lives in [`PaymentStatus`]. The
/// server historically emitted `"paid"` and `"payment_pending"` as statuses
/// on some records -- those are accepted as aliases of `completed` and
/// `agent_confirmed` respectively and never re-emitted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    #[serde(alias = "payment_pending")]
    AgentConfirmed,
    Rejected,
    Cancelled,
    #[serde(alias = "paid")]
    Completed,
}

impl BookingStatus {
    /// Terminal statuses permit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BookingStatus::Completed | BookingStatus::Cancelled | BookingStatus::Rejected
        )
    }
}

/// Payment progress for rental/purchase bookings.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaymentStatus {
    /// No payment has been initiated. Also the value for bookings where
    /// payment is not relevant (viewings).
    #[default]
    None,
    Pending,
    Paid,
}

/// Whether a property is listed for sale or for rent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ListingType {
    Sale,
    Rent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_round_trips_through_display() {
        for role in [Role::User, Role::Agent, Role::Admin] {
            let parsed = Role::from_str(&role.to_string()).expect("should parse back");
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn role_satisfies_is_flat_equality() {
        assert!(Role::Agent.satisfies(Role::Agent));
        assert!(!Role::Admin.satisfies(Role::Agent));
        assert!(!Role::Agent.satisfies(Role::Admin));
        assert!(!Role::User.satisfies(Role::Agent));
    }

    #[test]
    fn booking_status_wire_form_is_snake_case() {
        let json = serde_json::to_string(&BookingStatus::AgentConfirmed).unwrap();
        assert_eq!(json, "\"agent_confirmed\"");
        let parsed: BookingStatus = serde_json::from_str("\"agent_confirmed\"").unwrap();
        assert_eq!(parsed, BookingStatus::AgentConfirmed);
    }

    #[test]
    fn legacy_paid_status_folds_into_completed() {
        let parsed: BookingStatus = serde_json::from_str("\"paid\"").unwrap();
        assert_eq!(parsed, BookingStatus::Completed);
        // Canonical spelling is what we re-emit.
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            "\"completed\""
        );
    }

    #[test]
    fn legacy_payment_pending_status_folds_into_agent_confirmed() {
        let parsed: BookingStatus = serde_json::from_str("\"payment_pending\"").unwrap();
        assert_eq!(parsed, BookingStatus::AgentConfirmed);
    }

    #[test]
    fn terminal_statuses() {
        assert!(BookingStatus::Completed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(BookingStatus::Rejected.is_terminal());
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::AgentConfirmed.is_terminal());
    }

    #[test]
    fn payment_status_defaults_to_none() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::None);
    }

    #[test]
    fn payment_relevance_by_booking_type() {
        assert!(!BookingType::Viewing.payment_relevant());
        assert!(BookingType::Rental.payment_relevant());
        assert!(BookingType::Purchase.payment_relevant());
    }
}
