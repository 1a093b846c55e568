// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! API client, session management, screen guard, and typed domain clients
//! for the Hearth platform.
//!
//! Layering: [`http::ApiClient`] wraps the wire (token injection, error
//! normalization); the domain clients in [`bookings`], [`properties`],
//! [`payments`], [`wishlist`], [`reviews`], [`notifications`], and
//! [`agents`] add typed operations over it; [`session::SessionManager`]
//! owns the authenticated-user state that [`guard`] gates rendering on; and
//! [`cache::CacheTracker`] carries the invalidate-then-refetch contract
//! between mutations and views.

pub mod agents;
pub mod bookings;
pub mod cache;
pub mod guard;
pub mod http;
pub mod notifications;
pub mod payments;
pub mod properties;
pub mod reviews;
pub mod session;
pub mod token;
pub mod wishlist;

pub use cache::{CacheTracker, CachedQuery, Resource};
pub use guard::{GuardDecision, GuardRequirement};
pub use http::ApiClient;
pub use session::{SessionManager, SessionState, SignupRequest};
pub use token::TokenStore;
