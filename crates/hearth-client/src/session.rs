// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session store and authentication flows.
//!
//! The session moves through states: Uninitialized -> Loading ->
//! {Authenticated, Unauthenticated}. [`SessionManager::bootstrap`] is the
//! sole suspension point at startup; all protected rendering waits on it.
//!
//! The manager is an explicit handle passed to whoever needs it -- there is
//! no process-global session. Tests construct a fresh manager per case.

use std::sync::Arc;
use std::time::Duration;

use hearth_core::models::CurrentUser;
use hearth_core::policy;
use hearth_core::types::Role;
use hearth_core::HearthError;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::http::{ApiClient, Envelope};

/// States of the client-held session.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    /// Nothing attempted yet.
    #[default]
    Uninitialized,
    /// Bootstrap in flight. Protected views render nothing in this state.
    Loading,
    /// Verified identity. Either the whole user is here or the session is
    /// one of the other states -- no partial identities.
    Authenticated(CurrentUser),
    Unauthenticated,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    /// The settled state of the session; true once bootstrap has resolved.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            SessionState::Authenticated(_) | SessionState::Unauthenticated
        )
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Uninitialized => write!(f, "uninitialized"),
            SessionState::Loading => write!(f, "loading"),
            SessionState::Authenticated(_) => write!(f, "authenticated"),
            SessionState::Unauthenticated => write!(f, "unauthenticated"),
        }
    }
}

/// Payload for `POST /users/signup`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserData {
    user: CurrentUser,
}

/// Owns the authenticated-user state and the login/signup/logout flows.
pub struct SessionManager {
    api: Arc<ApiClient>,
    state: RwLock<SessionState>,
}

impl SessionManager {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            state: RwLock::new(SessionState::Uninitialized),
        }
    }

    /// A snapshot of the current session state.
    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Attempts to restore a session from the stored token at startup.
    ///
    /// Success settles to `Authenticated` with exactly the fields
    /// `/users/me` returned; any failure (especially 401) settles to
    /// `Unauthenticated` and clears the stale token.
    pub async fn bootstrap(&self) -> SessionState {
        {
            let mut state = self.state.write().await;
            *state = SessionState::Loading;
        }

        if self.api.tokens().current().is_none() {
            let mut state = self.state.write().await;
            *state = SessionState::Unauthenticated;
            return state.clone();
        }

        match self.fetch_me().await {
            Ok(user) => {
                debug!(user = %user.email, role = %user.role, "session restored");
                let mut state = self.state.write().await;
                *state = SessionState::Authenticated(user);
                state.clone()
            }
            Err(e) => {
                debug!(error = %e, "stored token rejected, starting unauthenticated");
                if let Err(e) = self.api.tokens().clear() {
                    warn!(error = %e, "failed to clear rejected token");
                }
                let mut state = self.state.write().await;
                *state = SessionState::Unauthenticated;
                state.clone()
            }
        }
    }

    /// Exchanges credentials for a token, then verifies the resulting
    /// identity before trusting it.
    ///
    /// Invalid credentials surface as the server's 401; validation
    /// failures as 400.
    pub async fn login(&self, email: &str, password: &str) -> Result<CurrentUser, HearthError> {
        let response: AuthResponse = self
            .api
            .post(
                "/users/login",
                serde_json::json!({ "email": email, "password": password }),
            )
            .await?;

        if let Some(token) = response.token {
            self.api.tokens().save(&token)?;
        }

        self.establish_session().await
    }

    /// Creates an account and establishes a session for it.
    ///
    /// Runs the same identity verification as login -- a token from signup
    /// is not trusted blindly either.
    pub async fn signup(&self, payload: &SignupRequest) -> Result<CurrentUser, HearthError> {
        let response: AuthResponse = self
            .api
            .post(
                "/users/signup",
                serde_json::to_value(payload)
                    .map_err(|e| HearthError::Internal(format!("unserializable signup: {e}")))?,
            )
            .await?;

        if let Some(token) = response.token {
            self.api.tokens().save(&token)?;
        }

        self.establish_session().await
    }

    /// Clears the session immediately; the server-side invalidation runs in
    /// the background and its outcome never rolls the logout back.
    ///
    /// Deliberate tradeoff: the user is logged out locally the instant they
    /// ask, even if the server call later fails. One delayed retry covers
    /// transient failures; after that the failure is logged and dropped.
    /// The returned handle lets short-lived processes bound-wait for the
    /// reconciliation attempt; long-lived UIs just drop it.
    pub async fn logout(&self) -> tokio::task::JoinHandle<()> {
        {
            let mut state = self.state.write().await;
            *state = SessionState::Unauthenticated;
        }
        if let Err(e) = self.api.tokens().clear() {
            warn!(error = %e, "failed to clear token during logout");
        }
        info!("session cleared");

        let api = self.api.clone();
        tokio::spawn(async move {
            for attempt in 0..2u32 {
                if attempt > 0 {
                    tokio::time::sleep(Duration::from_secs(2)).await;
                }
                match api
                    .request::<serde_json::Value>(Method::GET, "/users/logout", None)
                    .await
                {
                    Ok(_) => return,
                    Err(e) if attempt == 0 => {
                        warn!(error = %e, "server-side logout failed, retrying once");
                    }
                    Err(e) => {
                        warn!(error = %e, "server-side logout failed; local session stays cleared");
                    }
                }
            }
        })
    }

    /// Role-gated access predicate over the current session.
    pub async fn can_access(&self, required: Option<Role>) -> bool {
        let state = self.state.read().await;
        policy::can_access(state.user(), required)
    }

    /// Standard reaction to a 401 observed by any authenticated data call:
    /// the session is gone, locally too.
    pub async fn invalidate(&self) {
        {
            let mut state = self.state.write().await;
            *state = SessionState::Unauthenticated;
        }
        if let Err(e) = self.api.tokens().clear() {
            warn!(error = %e, "failed to clear token during invalidation");
        }
        info!("session invalidated after authorization failure");
    }

    /// Applies the 401 policy to an error from a data call. Returns true
    /// if an authenticated session was invalidated (caller should route to
    /// login). A 401 without a live session -- bad login credentials, a
    /// guard refusal -- is left for the caller to present as-is.
    pub async fn note_failure(&self, err: &HearthError) -> bool {
        if err.is_unauthorized() && self.state.read().await.is_authenticated() {
            self.invalidate().await;
            true
        } else {
            false
        }
    }

    /// Verifies identity via `/users/me` and settles to Authenticated.
    /// Both login and signup funnel through here.
    async fn establish_session(&self) -> Result<CurrentUser, HearthError> {
        let user = self.fetch_me().await?;
        let mut state = self.state.write().await;
        *state = SessionState::Authenticated(user.clone());
        Ok(user)
    }

    /// Re-fetches the current identity into the session, e.g. after an
    /// agent application changes `agent_status`.
    pub async fn refresh(&self) -> Result<CurrentUser, HearthError> {
        self.establish_session().await
    }

    async fn fetch_me(&self) -> Result<CurrentUser, HearthError> {
        let envelope: Envelope<UserData> = self.api.get("/users/me").await?;
        Ok(envelope.data.user)
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").finish_non_exhaustive()
    }
}
