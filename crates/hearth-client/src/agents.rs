// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agent application flows: apply, and the admin review queue.
//!
//! A user has at most one outstanding application. `agent_status` moves
//! `None -> pending -> {approved, rejected}`; approval flips the account
//! role to agent, and a rejected applicant may apply again.

use std::sync::Arc;

use hearth_core::models::{AgentApplication, CurrentUser, PendingApplication};
use hearth_core::types::UserId;
use hearth_core::HearthError;
use reqwest::Method;
use serde::Deserialize;

use crate::cache::{CacheTracker, Resource};
use crate::http::{ApiClient, Envelope};

#[derive(Debug, Deserialize)]
struct UserData {
    user: CurrentUser,
}

#[derive(Debug, Deserialize)]
struct ApplicationsData {
    applications: Vec<PendingApplication>,
}

/// Typed operations over `/agent-applications`.
#[derive(Debug, Clone)]
pub struct AgentApplicationClient {
    api: Arc<ApiClient>,
    cache: Arc<CacheTracker>,
}

impl AgentApplicationClient {
    pub fn new(api: Arc<ApiClient>, cache: Arc<CacheTracker>) -> Self {
        Self { api, cache }
    }

    /// Submits the current user's application. Returns the updated user
    /// (now carrying `agent_status = pending`); callers should refresh the
    /// session so views see the new status.
    pub async fn apply(
        &self,
        application: &AgentApplication,
    ) -> Result<CurrentUser, HearthError> {
        let body = serde_json::to_value(application)
            .map_err(|e| HearthError::Internal(format!("unserializable application: {e}")))?;
        let envelope: Envelope<UserData> =
            self.api.post("/agent-applications/apply", body).await?;
        self.cache.invalidate(Resource::AgentApplications);
        Ok(envelope.data.user)
    }

    /// Admin: applications awaiting review.
    pub async fn pending(&self) -> Result<Vec<PendingApplication>, HearthError> {
        let envelope: Envelope<ApplicationsData> =
            self.api.get("/agent-applications/pending").await?;
        Ok(envelope.data.applications)
    }

    /// Admin: approve, promoting the applicant to agent.
    pub async fn approve(&self, user: &UserId) -> Result<(), HearthError> {
        self.api
            .request::<serde_json::Value>(
                Method::PATCH,
                &format!("/agent-applications/{}/approve", user.0),
                None,
            )
            .await?;
        self.cache.invalidate(Resource::AgentApplications);
        Ok(())
    }

    /// Admin: reject. The applicant may reapply afterwards.
    pub async fn reject(&self, user: &UserId) -> Result<(), HearthError> {
        self.api
            .request::<serde_json::Value>(
                Method::PATCH,
                &format!("/agent-applications/{}/reject", user.0),
                None,
            )
            .await?;
        self.cache.invalidate(Resource::AgentApplications);
        Ok(())
    }
}
