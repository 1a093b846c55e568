// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed operations over the booking resource.
//!
//! Thin wrappers over [`ApiClient`]: each unwraps the response envelope and
//! returns the bare entity. Errors propagate unchanged. The client never
//! transitions a booking locally -- every mutation bumps the bookings cache
//! generation so views re-fetch the canonical state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use hearth_core::models::{Booking, BookingStats, TimeSlot};
use hearth_core::types::{BookingId, BookingStatus, BookingType, PropertyId};
use hearth_core::HearthError;
use serde::{Deserialize, Serialize};

use crate::cache::{CacheTracker, Resource};
use crate::http::{ApiClient, Envelope};

#[derive(Debug, Deserialize)]
struct BookingData {
    booking: Booking,
}

#[derive(Debug, Deserialize)]
struct BookingsData {
    bookings: Vec<Booking>,
}

#[derive(Debug, Deserialize)]
struct StatsData {
    stats: BookingStats,
}

/// Server-side filters for listing bookings.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub booking_type: Option<BookingType>,
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    fn to_query(&self) -> String {
        let mut params = Vec::new();
        if let Some(t) = self.booking_type {
            params.push(format!("bookingType={t}"));
        }
        if let Some(s) = self.status {
            params.push(format!("status={s}"));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// A new booking request. Use the per-intent constructors; the server
/// rejects shapes that mix fields across intents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub property: PropertyId,
    pub booking_type: BookingType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<TimeSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
}

impl NewBooking {
    /// A viewing appointment for a date and time window.
    pub fn viewing(property: PropertyId, date: DateTime<Utc>, time_slot: TimeSlot) -> Self {
        Self {
            property,
            booking_type: BookingType::Viewing,
            date: Some(date),
            time_slot: Some(time_slot),
            message: None,
            price: None,
        }
    }

    /// A rental inquiry with an optional note to the agent.
    pub fn rental(property: PropertyId, message: Option<String>) -> Self {
        Self {
            property,
            booking_type: BookingType::Rental,
            date: None,
            time_slot: None,
            message,
            price: None,
        }
    }

    /// A purchase intent at an agreed price (major currency units).
    pub fn purchase(property: PropertyId, price: i64) -> Self {
        Self {
            property,
            booking_type: BookingType::Purchase,
            date: None,
            time_slot: None,
            message: None,
            price: Some(price),
        }
    }
}

/// Fields a requester may amend on a pending booking.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<TimeSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Typed operations over `/bookings`.
#[derive(Debug, Clone)]
pub struct BookingClient {
    api: Arc<ApiClient>,
    cache: Arc<CacheTracker>,
}

impl BookingClient {
    pub fn new(api: Arc<ApiClient>, cache: Arc<CacheTracker>) -> Self {
        Self { api, cache }
    }

    /// Bookings visible to the current session (the server scopes by role).
    pub async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, HearthError> {
        let envelope: Envelope<BookingsData> = self
            .api
            .get(&format!("/bookings{}", filter.to_query()))
            .await?;
        Ok(envelope.data.bookings)
    }

    pub async fn get(&self, id: &BookingId) -> Result<Booking, HearthError> {
        let envelope: Envelope<BookingData> =
            self.api.get(&format!("/bookings/{}", id.0)).await?;
        Ok(envelope.data.booking)
    }

    pub async fn create(&self, booking: &NewBooking) -> Result<Booking, HearthError> {
        let body = serde_json::to_value(booking)
            .map_err(|e| HearthError::Internal(format!("unserializable booking: {e}")))?;
        let envelope: Envelope<BookingData> = self.api.post("/bookings", body).await?;
        self.cache.invalidate(Resource::Bookings);
        Ok(envelope.data.booking)
    }

    pub async fn update(
        &self,
        id: &BookingId,
        patch: &BookingPatch,
    ) -> Result<Booking, HearthError> {
        let body = serde_json::to_value(patch)
            .map_err(|e| HearthError::Internal(format!("unserializable patch: {e}")))?;
        let envelope: Envelope<BookingData> = self
            .api
            .patch(&format!("/bookings/{}", id.0), Some(body))
            .await?;
        self.cache.invalidate(Resource::Bookings);
        Ok(envelope.data.booking)
    }

    /// Requester cancellation. The server arbitrates legality; cancelling
    /// an already-terminal booking surfaces its conflict error unchanged,
    /// never a silent double transition.
    pub async fn cancel(&self, id: &BookingId, reason: &str) -> Result<Booking, HearthError> {
        let envelope: Envelope<BookingData> = self
            .api
            .patch(
                &format!("/bookings/{}/cancel", id.0),
                Some(serde_json::json!({ "cancellationReason": reason })),
            )
            .await?;
        self.cache.invalidate(Resource::Bookings);
        Ok(envelope.data.booking)
    }

    /// Agent/admin confirmation of a pending booking.
    pub async fn confirm(&self, id: &BookingId) -> Result<Booking, HearthError> {
        self.transition(id, "confirm").await
    }

    /// Agent/admin rejection of a pending booking.
    pub async fn reject(&self, id: &BookingId) -> Result<Booking, HearthError> {
        self.transition(id, "reject").await
    }

    /// Agent/admin acknowledgement that the requester's payment arrived.
    pub async fn confirm_payment(&self, id: &BookingId) -> Result<Booking, HearthError> {
        self.transition(id, "confirm-payment").await
    }

    /// Aggregate counters for dashboard headers.
    pub async fn stats(&self) -> Result<BookingStats, HearthError> {
        let envelope: Envelope<StatsData> = self.api.get("/bookings/stats/summary").await?;
        Ok(envelope.data.stats)
    }

    async fn transition(&self, id: &BookingId, action: &str) -> Result<Booking, HearthError> {
        let envelope: Envelope<BookingData> = self
            .api
            .patch(&format!("/bookings/{}/{action}", id.0), None)
            .await?;
        self.cache.invalidate(Resource::Bookings);
        Ok(envelope.data.booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_renders_query_string() {
        let filter = BookingFilter {
            booking_type: Some(BookingType::Purchase),
            status: Some(BookingStatus::Pending),
        };
        assert_eq!(filter.to_query(), "?bookingType=purchase&status=pending");
        assert_eq!(BookingFilter::default().to_query(), "");
    }

    #[test]
    fn new_booking_serializes_only_relevant_fields() {
        let purchase = NewBooking::purchase(PropertyId("p1".into()), 5_000_000);
        let value = serde_json::to_value(&purchase).unwrap();
        assert_eq!(value["bookingType"], "purchase");
        assert_eq!(value["price"], 5_000_000);
        assert!(value.get("date").is_none());
        assert!(value.get("timeSlot").is_none());

        let rental = NewBooking::rental(PropertyId("p1".into()), Some("ASAP".into()));
        let value = serde_json::to_value(&rental).unwrap();
        assert_eq!(value["message"], "ASAP");
        assert!(value.get("price").is_none());
    }
}
