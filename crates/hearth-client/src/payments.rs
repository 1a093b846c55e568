// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payment session handling and the hosted-checkout boundary.
//!
//! The client's whole responsibility here: obtain a payment session
//! reference for a booking, hand it to the external hosted checkout, and
//! later observe the webhook-driven outcome via `verify` and a booking
//! re-fetch. A booking is never marked paid locally.

use std::sync::Arc;

use async_trait::async_trait;
use hearth_core::models::{Booking, PaymentRecord, PaymentSession};
use hearth_core::types::{BookingId, BookingType, PaymentReference};
use hearth_core::HearthError;
use serde::Deserialize;
use tracing::info;

use crate::cache::{CacheTracker, Resource};
use crate::http::{ApiClient, Envelope};

#[derive(Debug, Deserialize)]
struct PaymentData {
    payment: PaymentRecord,
}

#[derive(Debug, Deserialize)]
struct PaymentsData {
    payments: Vec<PaymentRecord>,
}

/// Converts a major-unit amount to the gateway's minor unit. This is the
/// only place the conversion happens.
pub fn to_minor_units(amount: i64) -> i64 {
    amount * 100
}

/// The external hosted-checkout integration.
///
/// Implementations receive an initialized payment session and are expected
/// to launch the provider's flow. They must not report payment completion;
/// the server's webhook-updated state is the sole source of truth.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Hands the session to the provider. Returns the URL the user should
    /// be sent to. `amount_minor` is in the gateway's minor unit.
    async fn begin(
        &self,
        session: &PaymentSession,
        email: &str,
        amount_minor: i64,
    ) -> Result<String, HearthError>;
}

/// Checkout handoff backed by the provider's hosted payment page.
pub struct HostedCheckout {
    public_key: String,
}

impl HostedCheckout {
    /// Requires the gateway public key from `[payment]` config.
    pub fn new(public_key: String) -> Result<Self, HearthError> {
        if !public_key.starts_with("pk_") {
            return Err(HearthError::Checkout(
                "payment gateway key must be a public key (pk_...)".into(),
            ));
        }
        Ok(Self { public_key })
    }
}

#[async_trait]
impl CheckoutGateway for HostedCheckout {
    async fn begin(
        &self,
        session: &PaymentSession,
        email: &str,
        amount_minor: i64,
    ) -> Result<String, HearthError> {
        if session.authorization_url.is_empty() {
            return Err(HearthError::Checkout(
                "payment session has no authorization URL".into(),
            ));
        }
        info!(
            reference = %session.reference.0,
            email,
            amount_minor,
            key_prefix = &self.public_key[..self.public_key.len().min(7)],
            "handing payment session to hosted checkout"
        );
        Ok(session.authorization_url.clone())
    }
}

/// Typed operations over `/payments`.
#[derive(Debug, Clone)]
pub struct PaymentClient {
    api: Arc<ApiClient>,
    cache: Arc<CacheTracker>,
}

impl PaymentClient {
    pub fn new(api: Arc<ApiClient>, cache: Arc<CacheTracker>) -> Self {
        Self { api, cache }
    }

    /// Requests a payment session for a confirmed rental/purchase booking.
    ///
    /// The response is NOT enveloped -- the reference and authorization URL
    /// arrive at the top level.
    pub async fn initialize(
        &self,
        booking: &BookingId,
        email: &str,
        kind: BookingType,
    ) -> Result<PaymentSession, HearthError> {
        let session: PaymentSession = self
            .api
            .post(
                &format!("/payments/initialize/{}", booking.0),
                serde_json::json!({ "email": email, "type": kind }),
            )
            .await?;
        Ok(session)
    }

    /// Asks the server for the verified outcome of a payment. Reflects
    /// whatever the provider's webhook told the server; invalidates the
    /// bookings cache so views pick up a settled payment on next read.
    pub async fn verify(
        &self,
        reference: &PaymentReference,
    ) -> Result<PaymentRecord, HearthError> {
        let envelope: Envelope<PaymentData> = self
            .api
            .get(&format!("/payments/verify/{}", reference.0))
            .await?;
        self.cache.invalidate(Resource::Bookings);
        self.cache.invalidate(Resource::Payments);
        Ok(envelope.data.payment)
    }

    /// The current user's payment history.
    pub async fn history(&self) -> Result<Vec<PaymentRecord>, HearthError> {
        let envelope: Envelope<PaymentsData> = self.api.get("/payments/history").await?;
        Ok(envelope.data.payments)
    }

    /// Full "Pay Now" handoff: initialize a session for the booking, then
    /// pass it to the checkout gateway. Returns the URL to open. Callers
    /// should have consulted `policy::can_pay` before offering this.
    pub async fn start_payment(
        &self,
        gateway: &dyn CheckoutGateway,
        booking: &Booking,
        email: &str,
    ) -> Result<String, HearthError> {
        if !booking.payment_relevant() {
            return Err(HearthError::Checkout(
                "viewings carry no payment".into(),
            ));
        }
        let price = booking
            .price
            .ok_or_else(|| HearthError::Checkout("booking has no agreed price".into()))?;

        let session = self
            .initialize(&booking.id, email, booking.booking_type)
            .await?;
        gateway.begin(&session, email, to_minor_units(price)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_unit_conversion() {
        assert_eq!(to_minor_units(5_000_000), 500_000_000);
        assert_eq!(to_minor_units(0), 0);
    }

    #[test]
    fn hosted_checkout_rejects_secret_keys() {
        assert!(HostedCheckout::new("sk_live_nope".into()).is_err());
        assert!(HostedCheckout::new("pk_test_ok".into()).is_ok());
    }

    #[tokio::test]
    async fn hosted_checkout_requires_authorization_url() {
        let checkout = HostedCheckout::new("pk_test_ok".into()).unwrap();
        let session = PaymentSession {
            reference: PaymentReference("ESTATE_bk1_x7".into()),
            authorization_url: String::new(),
            access_code: None,
        };
        let err = checkout.begin(&session, "a@b.c", 100).await.unwrap_err();
        assert!(matches!(err, HearthError::Checkout(_)));
    }

    #[tokio::test]
    async fn hosted_checkout_returns_the_provider_url() {
        let checkout = HostedCheckout::new("pk_test_ok".into()).unwrap();
        let session = PaymentSession {
            reference: PaymentReference("ESTATE_bk1_x7".into()),
            authorization_url: "https://checkout.example.com/x7".into(),
            access_code: None,
        };
        let url = checkout.begin(&session, "a@b.c", 100).await.unwrap();
        assert_eq!(url, "https://checkout.example.com/x7");
    }
}
