// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed operations over the current user's wishlist.

use std::sync::Arc;

use hearth_core::models::WishlistEntry;
use hearth_core::types::PropertyId;
use hearth_core::HearthError;
use reqwest::Method;
use serde::Deserialize;

use crate::cache::{CacheTracker, Resource};
use crate::http::{ApiClient, Envelope};

#[derive(Debug, Deserialize)]
struct WishlistData {
    wishlist: Vec<WishlistEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MembershipData {
    in_wishlist: bool,
}

/// Typed operations over `/wishlist`.
#[derive(Debug, Clone)]
pub struct WishlistClient {
    api: Arc<ApiClient>,
    cache: Arc<CacheTracker>,
}

impl WishlistClient {
    pub fn new(api: Arc<ApiClient>, cache: Arc<CacheTracker>) -> Self {
        Self { api, cache }
    }

    pub async fn list(&self) -> Result<Vec<WishlistEntry>, HearthError> {
        let envelope: Envelope<WishlistData> = self.api.get("/wishlist").await?;
        Ok(envelope.data.wishlist)
    }

    /// Adds or removes the property; returns whether it is now wishlisted.
    pub async fn toggle(&self, property: &PropertyId) -> Result<bool, HearthError> {
        let envelope: Envelope<MembershipData> = self
            .api
            .post(
                "/wishlist/toggle",
                serde_json::json!({ "property": property.0 }),
            )
            .await?;
        self.cache.invalidate(Resource::Wishlist);
        Ok(envelope.data.in_wishlist)
    }

    pub async fn check(&self, property: &PropertyId) -> Result<bool, HearthError> {
        let envelope: Envelope<MembershipData> = self
            .api
            .get(&format!("/wishlist/check/{}", property.0))
            .await?;
        Ok(envelope.data.in_wishlist)
    }

    pub async fn add(&self, property: &PropertyId) -> Result<(), HearthError> {
        self.api
            .request::<serde_json::Value>(
                Method::POST,
                "/wishlist/add",
                Some(serde_json::json!({ "property": property.0 })),
            )
            .await?;
        self.cache.invalidate(Resource::Wishlist);
        Ok(())
    }

    pub async fn remove(&self, property: &PropertyId) -> Result<(), HearthError> {
        self.api
            .delete(&format!("/wishlist/remove/{}", property.0))
            .await?;
        self.cache.invalidate(Resource::Wishlist);
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), HearthError> {
        self.api.delete("/wishlist/clear").await?;
        self.cache.invalidate(Resource::Wishlist);
        Ok(())
    }
}
