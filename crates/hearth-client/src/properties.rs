// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed operations over the property resource. Read-mostly; the create/
//! update/delete surface exists for the agent and admin dashboards.

use std::sync::Arc;

use hearth_core::models::{Address, Property, PropertyImage};
use hearth_core::types::{ListingType, PropertyId};
use hearth_core::HearthError;
use serde::{Deserialize, Serialize};

use crate::cache::{CacheTracker, Resource};
use crate::http::{ApiClient, Envelope};

#[derive(Debug, Deserialize)]
struct PropertyData {
    property: Property,
}

#[derive(Debug, Deserialize)]
struct PropertiesData {
    properties: Vec<Property>,
}

/// Listing filters, rendered as a query string.
#[derive(Debug, Clone, Default)]
pub struct PropertyQuery {
    pub listing_type: Option<ListingType>,
    pub city: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub bedrooms: Option<u32>,
}

impl PropertyQuery {
    fn to_query(&self) -> String {
        let mut params = Vec::new();
        if let Some(t) = self.listing_type {
            params.push(format!("listingType={t}"));
        }
        if let Some(city) = &self.city {
            params.push(format!("city={city}"));
        }
        if let Some(min) = self.min_price {
            params.push(format!("price[gte]={min}"));
        }
        if let Some(max) = self.max_price {
            params.push(format!("price[lte]={max}"));
        }
        if let Some(beds) = self.bedrooms {
            params.push(format!("bedrooms={beds}"));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// Payload for creating or amending a listing.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_type: Option<ListingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub images: Vec<PropertyImage>,
}

/// Typed operations over `/properties`.
#[derive(Debug, Clone)]
pub struct PropertyClient {
    api: Arc<ApiClient>,
    cache: Arc<CacheTracker>,
}

impl PropertyClient {
    pub fn new(api: Arc<ApiClient>, cache: Arc<CacheTracker>) -> Self {
        Self { api, cache }
    }

    pub async fn list(&self, query: &PropertyQuery) -> Result<Vec<Property>, HearthError> {
        let envelope: Envelope<PropertiesData> = self
            .api
            .get(&format!("/properties{}", query.to_query()))
            .await?;
        Ok(envelope.data.properties)
    }

    pub async fn get(&self, id: &PropertyId) -> Result<Property, HearthError> {
        let envelope: Envelope<PropertyData> =
            self.api.get(&format!("/properties/{}", id.0)).await?;
        Ok(envelope.data.property)
    }

    pub async fn create(&self, draft: &PropertyDraft) -> Result<Property, HearthError> {
        let body = serde_json::to_value(draft)
            .map_err(|e| HearthError::Internal(format!("unserializable draft: {e}")))?;
        let envelope: Envelope<PropertyData> = self.api.post("/properties", body).await?;
        self.cache.invalidate(Resource::Properties);
        Ok(envelope.data.property)
    }

    pub async fn update(
        &self,
        id: &PropertyId,
        draft: &PropertyDraft,
    ) -> Result<Property, HearthError> {
        let body = serde_json::to_value(draft)
            .map_err(|e| HearthError::Internal(format!("unserializable draft: {e}")))?;
        let envelope: Envelope<PropertyData> = self
            .api
            .patch(&format!("/properties/{}", id.0), Some(body))
            .await?;
        self.cache.invalidate(Resource::Properties);
        Ok(envelope.data.property)
    }

    pub async fn delete(&self, id: &PropertyId) -> Result<(), HearthError> {
        self.api.delete(&format!("/properties/{}", id.0)).await?;
        self.cache.invalidate(Resource::Properties);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_renders_range_filters() {
        let query = PropertyQuery {
            listing_type: Some(ListingType::Sale),
            city: Some("Lagos".into()),
            min_price: Some(1_000_000),
            max_price: None,
            bedrooms: Some(3),
        };
        assert_eq!(
            query.to_query(),
            "?listingType=sale&city=Lagos&price[gte]=1000000&bedrooms=3"
        );
        assert_eq!(PropertyQuery::default().to_query(), "");
    }
}
