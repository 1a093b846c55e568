// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed operations over the current user's notifications.
//!
//! Notifications are fetched when the user asks for them (opening the
//! dropdown, running the command) -- no timer-driven background polling.

use std::sync::Arc;

use hearth_core::models::Notification;
use hearth_core::HearthError;
use reqwest::Method;
use serde::Deserialize;

use crate::cache::{CacheTracker, Resource};
use crate::http::ApiClient;

/// One fetch of the notification list plus its unread counter.
#[derive(Debug, Clone)]
pub struct NotificationsPage {
    pub notifications: Vec<Notification>,
    pub unread_count: u64,
}

// The unread counter rides at the top level of the response, outside the
// data envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotificationsResponse {
    data: NotificationsData,
    #[serde(default)]
    unread_count: u64,
}

#[derive(Debug, Deserialize)]
struct NotificationsData {
    notifications: Vec<Notification>,
}

/// Typed operations over `/notifications`.
#[derive(Debug, Clone)]
pub struct NotificationClient {
    api: Arc<ApiClient>,
    cache: Arc<CacheTracker>,
}

impl NotificationClient {
    pub fn new(api: Arc<ApiClient>, cache: Arc<CacheTracker>) -> Self {
        Self { api, cache }
    }

    pub async fn list(&self) -> Result<NotificationsPage, HearthError> {
        let response: NotificationsResponse = self.api.get("/notifications").await?;
        Ok(NotificationsPage {
            notifications: response.data.notifications,
            unread_count: response.unread_count,
        })
    }

    pub async fn mark_read(&self, id: &str) -> Result<(), HearthError> {
        self.api
            .request::<serde_json::Value>(Method::PATCH, &format!("/notifications/{id}/read"), None)
            .await?;
        self.cache.invalidate(Resource::Notifications);
        Ok(())
    }
}
