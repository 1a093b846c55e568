// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Hearth platform client.
//!
//! Provides the error type, the domain types and entity models mirroring
//! the platform API, and the booking status/authorization policy shared by
//! every view. This crate performs no I/O.

pub mod error;
pub mod models;
pub mod policy;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::HearthError;
pub use models::{Booking, CurrentUser, Property};
pub use types::{
    AgentStatus, BookingId, BookingStatus, BookingType, PaymentReference, PaymentStatus,
    PropertyId, Role, UserId,
};
