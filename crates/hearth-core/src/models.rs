// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entity models mirroring the platform API's JSON documents.
//!
//! Field names follow the server's camelCase wire form; document ids arrive
//! as `_id`. Reference fields may be populated documents or bare id strings
//! depending on the endpoint, which [`Linked`] absorbs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    AgentStatus, BookingId, BookingStatus, BookingType, ListingType, PaymentReference,
    PaymentStatus, PropertyId, Role, UserId,
};

/// Anything addressable by a server-issued document id.
pub trait Identified {
    fn document_id(&self) -> &str;
}

/// A reference field that the server may or may not have populated.
///
/// List endpoints populate referenced documents (`booking.property` is a
/// full object); some detail endpoints return the bare id string instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Linked<T> {
    Populated(T),
    Id(String),
}

impl<T: Identified> Linked<T> {
    /// The referenced document's id, whichever form the server sent.
    pub fn id(&self) -> &str {
        match self {
            Linked::Populated(doc) => doc.document_id(),
            Linked::Id(id) => id,
        }
    }
}

impl<T> Linked<T> {
    /// The populated document, if the server sent one.
    pub fn populated(&self) -> Option<&T> {
        match self {
            Linked::Populated(doc) => Some(doc),
            Linked::Id(_) => None,
        }
    }
}

/// The authenticated identity as returned by `GET /users/me`.
///
/// Either the whole session exists or none of it does: the session store
/// never exposes a partially populated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Set while a user's agent application is in flight or was rejected.
    #[serde(default)]
    pub agent_status: Option<AgentStatus>,
}

/// Compact user document embedded in bookings and reviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Identified for UserSummary {
    fn document_id(&self) -> &str {
        &self.id.0
    }
}

/// One stored image of a property. Older records carry an uploaded
/// `filename`; newer ones carry an absolute `url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyImage {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Postal address of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// A property listing. Read-mostly from this client's perspective; only
/// the agent/admin surface mutates listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "_id")]
    pub id: PropertyId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub listing_type: Option<ListingType>,
    #[serde(default)]
    pub images: Vec<PropertyImage>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    /// Floor area in square meters.
    #[serde(default)]
    pub area: Option<f64>,
    /// Agent assigned to this listing.
    #[serde(default)]
    pub agent: Option<Linked<UserSummary>>,
}

impl Identified for Property {
    fn document_id(&self) -> &str {
        &self.id.0
    }
}

/// Requested time window of a viewing appointment, e.g. `10:00`-`11:00`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub start: String,
    pub end: String,
}

/// A booking: a user, a property, and an intent, with a lifecycle status.
///
/// The server owns this document. The client never transitions `status` or
/// `payment_status` locally -- it submits an intent and re-fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: BookingId,
    pub property: Linked<Property>,
    /// The requester who created the booking.
    pub user: Linked<UserSummary>,
    #[serde(default)]
    pub agent: Option<Linked<UserSummary>>,
    pub booking_type: BookingType,
    pub status: BookingStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    /// Agreed amount in major currency units; set for rental/purchase.
    #[serde(default)]
    pub price: Option<i64>,
    /// Appointment date for viewings.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub time_slot: Option<TimeSlot>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Id of the user who created this booking.
    pub fn requester_id(&self) -> &str {
        self.user.id()
    }

    /// Whether payment state carries meaning for this booking.
    pub fn payment_relevant(&self) -> bool {
        self.booking_type.payment_relevant()
    }
}

/// A user's application to become an agent. At most one may be
/// outstanding at a time; a rejected applicant may reapply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentApplication {
    pub agency: String,
    pub specialization: String,
    pub bio: String,
    pub phone: String,
}

/// A pending agent application as listed on the admin review queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingApplication {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, rename = "agentApplication")]
    pub application: Option<AgentApplication>,
}

/// A notification addressed to the current user. Fetched on demand,
/// never pushed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A property review left by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    pub property: Linked<Property>,
    pub user: Linked<UserSummary>,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Aggregate review figures for one property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub average_rating: f64,
    pub review_count: u64,
}

/// Payment session handed to the hosted checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSession {
    pub reference: PaymentReference,
    pub authorization_url: String,
    #[serde(default)]
    pub access_code: Option<String>,
}

/// Outcome of a payment as recorded by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentOutcome {
    Pending,
    Success,
    Failed,
}

/// One entry in the user's payment history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub reference: PaymentReference,
    /// Amount in major currency units.
    pub amount: i64,
    pub status: PaymentOutcome,
    #[serde(default)]
    pub booking: Option<Linked<Booking>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for Booking {
    fn document_id(&self) -> &str {
        &self.id.0
    }
}

/// Aggregate booking counters from `GET /bookings/stats/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStats {
    pub total: u64,
    pub pending: u64,
    pub confirmed: u64,
    pub completed: u64,
    pub cancelled: u64,
    #[serde(default)]
    pub total_value: Option<i64>,
}

/// One wishlist entry of the current user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub property: Linked<Property>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking_json() -> serde_json::Value {
        serde_json::json!({
            "_id": "bk1",
            "property": {
                "_id": "prop1",
                "title": "3-bed duplex, Lekki Phase 1",
                "price": 5_000_000,
                "bedrooms": 3,
                "bathrooms": 2,
                "address": {"city": "Lagos", "state": "Lagos"}
            },
            "user": {"_id": "u1", "name": "Ada", "email": "ada@example.com"},
            "bookingType": "purchase",
            "status": "agent_confirmed",
            "paymentStatus": "pending",
            "price": 5_000_000,
            "createdAt": "2026-01-12T09:30:00Z"
        })
    }

    #[test]
    fn booking_deserializes_populated_references() {
        let booking: Booking = serde_json::from_value(booking_json()).unwrap();
        assert_eq!(booking.id.0, "bk1");
        assert_eq!(booking.property.id(), "prop1");
        assert_eq!(booking.requester_id(), "u1");
        assert_eq!(booking.status, BookingStatus::AgentConfirmed);
        assert_eq!(booking.payment_status, PaymentStatus::Pending);
        let property = booking.property.populated().expect("populated");
        assert_eq!(property.title, "3-bed duplex, Lekki Phase 1");
    }

    #[test]
    fn booking_deserializes_bare_id_references() {
        let mut value = booking_json();
        value["property"] = serde_json::json!("prop1");
        value["user"] = serde_json::json!("u1");
        let booking: Booking = serde_json::from_value(value).unwrap();
        assert_eq!(booking.property.id(), "prop1");
        assert!(booking.property.populated().is_none());
        assert_eq!(booking.requester_id(), "u1");
    }

    #[test]
    fn missing_payment_status_defaults_to_none() {
        let mut value = booking_json();
        value["bookingType"] = serde_json::json!("viewing");
        value["status"] = serde_json::json!("pending");
        value.as_object_mut().unwrap().remove("paymentStatus");
        let booking: Booking = serde_json::from_value(value).unwrap();
        assert_eq!(booking.payment_status, PaymentStatus::None);
        assert!(!booking.payment_relevant());
    }

    #[test]
    fn current_user_deserializes_without_agent_status() {
        let user: CurrentUser = serde_json::from_value(serde_json::json!({
            "_id": "u1",
            "name": "Ada",
            "email": "ada@example.com",
            "role": "user"
        }))
        .unwrap();
        assert_eq!(user.role, Role::User);
        assert!(user.agent_status.is_none());
    }

    #[test]
    fn legacy_paid_booking_normalizes() {
        let mut value = booking_json();
        value["status"] = serde_json::json!("paid");
        value["paymentStatus"] = serde_json::json!("paid");
        let booking: Booking = serde_json::from_value(value).unwrap();
        assert_eq!(booking.status, BookingStatus::Completed);
        assert_eq!(booking.payment_status, PaymentStatus::Paid);
    }
}
