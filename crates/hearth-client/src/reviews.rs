// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed operations over property reviews.

use std::sync::Arc;

use hearth_core::models::{Review, ReviewStats};
use hearth_core::types::PropertyId;
use hearth_core::HearthError;
use serde::Deserialize;

use crate::cache::{CacheTracker, Resource};
use crate::http::{ApiClient, Envelope};

#[derive(Debug, Deserialize)]
struct ReviewsData {
    reviews: Vec<Review>,
}

#[derive(Debug, Deserialize)]
struct ReviewData {
    review: Review,
}

#[derive(Debug, Deserialize)]
struct StatsData {
    stats: ReviewStats,
}

/// Typed operations over `/review`.
#[derive(Debug, Clone)]
pub struct ReviewClient {
    api: Arc<ApiClient>,
    cache: Arc<CacheTracker>,
}

impl ReviewClient {
    pub fn new(api: Arc<ApiClient>, cache: Arc<CacheTracker>) -> Self {
        Self { api, cache }
    }

    /// Reviews for one property.
    pub async fn list(&self, property: &PropertyId) -> Result<Vec<Review>, HearthError> {
        let envelope: Envelope<ReviewsData> = self
            .api
            .get(&format!("/review?property={}", property.0))
            .await?;
        Ok(envelope.data.reviews)
    }

    /// Leaves a rating (1-5) with an optional comment.
    pub async fn create(
        &self,
        property: &PropertyId,
        rating: u8,
        comment: Option<&str>,
    ) -> Result<Review, HearthError> {
        let envelope: Envelope<ReviewData> = self
            .api
            .post(
                "/review",
                serde_json::json!({
                    "property": property.0,
                    "rating": rating,
                    "comment": comment,
                }),
            )
            .await?;
        self.cache.invalidate(Resource::Reviews);
        Ok(envelope.data.review)
    }

    pub async fn stats(&self, property: &PropertyId) -> Result<ReviewStats, HearthError> {
        let envelope: Envelope<StatsData> = self
            .api
            .get(&format!("/review/stats/property/{}", property.0))
            .await?;
        Ok(envelope.data.stats)
    }
}
