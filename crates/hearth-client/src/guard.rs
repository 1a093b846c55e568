// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Screen guard: the rendering gate in front of every protected view.
//!
//! A view declares its requirement; the guard decides from the current
//! session state. The invariant that matters: a loading session is never
//! treated as authorized, so protected content cannot flash before the
//! bootstrap check resolves.

use hearth_core::policy;
use hearth_core::types::Role;

use crate::session::SessionState;

/// What a view requires before it may render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuardRequirement {
    /// The view needs any authenticated session.
    pub require_auth: bool,
    /// The view needs this exact role. Implies `require_auth`.
    pub required_role: Option<Role>,
}

impl GuardRequirement {
    /// Open to everyone, including while the session is still loading.
    pub fn public() -> Self {
        Self::default()
    }

    /// Any authenticated user.
    pub fn authenticated() -> Self {
        Self {
            require_auth: true,
            required_role: None,
        }
    }

    /// Exactly this role (flat check, no hierarchy).
    pub fn role(role: Role) -> Self {
        Self {
            require_auth: true,
            required_role: Some(role),
        }
    }

    fn is_protected(&self) -> bool {
        self.require_auth || self.required_role.is_some()
    }
}

/// The guard's verdict for one render attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not settled yet: render nothing (or a neutral placeholder).
    Wait,
    /// No session: route to the login view.
    RedirectToLogin,
    /// Authenticated but the role check fails: route to the default view.
    RedirectHome,
    /// Render the protected content.
    Allow,
}

/// Evaluates a requirement against the current session state.
pub fn evaluate(requirement: &GuardRequirement, state: &SessionState) -> GuardDecision {
    if !requirement.is_protected() {
        return GuardDecision::Allow;
    }

    match state {
        SessionState::Uninitialized | SessionState::Loading => GuardDecision::Wait,
        SessionState::Unauthenticated => GuardDecision::RedirectToLogin,
        SessionState::Authenticated(user) => {
            if policy::can_access(Some(user), requirement.required_role) {
                GuardDecision::Allow
            } else {
                GuardDecision::RedirectHome
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::models::CurrentUser;
    use hearth_core::types::UserId;

    fn authenticated(role: Role) -> SessionState {
        SessionState::Authenticated(CurrentUser {
            id: UserId("u1".into()),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            role,
            agent_status: None,
        })
    }

    #[test]
    fn loading_session_never_renders_protected_content() {
        for state in [SessionState::Uninitialized, SessionState::Loading] {
            assert_eq!(
                evaluate(&GuardRequirement::authenticated(), &state),
                GuardDecision::Wait
            );
            assert_eq!(
                evaluate(&GuardRequirement::role(Role::Agent), &state),
                GuardDecision::Wait
            );
        }
    }

    #[test]
    fn public_views_render_even_while_loading() {
        assert_eq!(
            evaluate(&GuardRequirement::public(), &SessionState::Loading),
            GuardDecision::Allow
        );
    }

    #[test]
    fn unauthenticated_redirects_to_login() {
        assert_eq!(
            evaluate(&GuardRequirement::authenticated(), &SessionState::Unauthenticated),
            GuardDecision::RedirectToLogin
        );
    }

    #[test]
    fn role_mismatch_redirects_home() {
        assert_eq!(
            evaluate(&GuardRequirement::role(Role::Admin), &authenticated(Role::Agent)),
            GuardDecision::RedirectHome
        );
        // Flat roles: admin does not pass an agent-only gate.
        assert_eq!(
            evaluate(&GuardRequirement::role(Role::Agent), &authenticated(Role::Admin)),
            GuardDecision::RedirectHome
        );
    }

    #[test]
    fn matching_role_and_plain_auth_allow() {
        assert_eq!(
            evaluate(&GuardRequirement::role(Role::Agent), &authenticated(Role::Agent)),
            GuardDecision::Allow
        );
        assert_eq!(
            evaluate(&GuardRequirement::authenticated(), &authenticated(Role::User)),
            GuardDecision::Allow
        );
    }
}
