// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared command context: config, API client, session, domain clients.
//!
//! Everything hangs off one explicitly constructed [`AppContext`] -- the
//! session is injected into commands rather than living in a global.

use std::sync::Arc;

use hearth_client::agents::AgentApplicationClient;
use hearth_client::bookings::BookingClient;
use hearth_client::notifications::NotificationClient;
use hearth_client::payments::PaymentClient;
use hearth_client::properties::PropertyClient;
use hearth_client::reviews::ReviewClient;
use hearth_client::wishlist::WishlistClient;
use hearth_client::{
    guard, ApiClient, CacheTracker, GuardDecision, GuardRequirement, SessionManager, TokenStore,
};
use hearth_config::HearthConfig;
use hearth_core::models::CurrentUser;
use hearth_core::HearthError;

pub struct AppContext {
    pub config: HearthConfig,
    pub session: SessionManager,
    pub bookings: BookingClient,
    pub properties: PropertyClient,
    pub payments: PaymentClient,
    pub wishlist: WishlistClient,
    pub reviews: ReviewClient,
    pub notifications: NotificationClient,
    pub agents: AgentApplicationClient,
}

impl AppContext {
    pub fn new(config: HearthConfig) -> Result<Self, HearthError> {
        let tokens = Arc::new(TokenStore::from_config(&config.session));
        let api = Arc::new(ApiClient::new(&config.api, tokens)?);
        let cache = Arc::new(CacheTracker::new());

        Ok(Self {
            session: SessionManager::new(api.clone()),
            bookings: BookingClient::new(api.clone(), cache.clone()),
            properties: PropertyClient::new(api.clone(), cache.clone()),
            payments: PaymentClient::new(api.clone(), cache.clone()),
            wishlist: WishlistClient::new(api.clone(), cache.clone()),
            reviews: ReviewClient::new(api.clone(), cache.clone()),
            notifications: NotificationClient::new(api.clone(), cache.clone()),
            agents: AgentApplicationClient::new(api, cache),
            config,
        })
    }

    /// Bootstraps the session and runs the guard for a protected command.
    ///
    /// Nothing protected executes before the bootstrap check settles; an
    /// unauthenticated or under-privileged session gets a directed message
    /// instead of partial output.
    pub async fn authorize(
        &self,
        requirement: GuardRequirement,
    ) -> Result<CurrentUser, HearthError> {
        let state = self.session.bootstrap().await;
        match guard::evaluate(&requirement, &state) {
            GuardDecision::Allow => state.user().cloned().ok_or_else(|| {
                HearthError::Internal("guard allowed a protected view without a user".into())
            }),
            GuardDecision::RedirectToLogin => Err(HearthError::api(
                "You are not logged in. Run `hearth login` first.",
                401,
            )),
            GuardDecision::RedirectHome => Err(HearthError::api(
                "Your role does not permit this command.",
                403,
            )),
            GuardDecision::Wait => Err(HearthError::Internal(
                "session still loading after bootstrap".into(),
            )),
        }
    }

    /// Applies the uniform 401 policy before an error reaches the user: an
    /// expired authenticated session is invalidated and reworded; anything
    /// else (bad credentials, guard refusals, conflicts) passes through.
    pub async fn surface(&self, err: HearthError) -> HearthError {
        if self.session.note_failure(&err).await {
            return HearthError::api("Your session has expired. Please log in again.", 401);
        }
        err
    }
}
