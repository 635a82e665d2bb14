// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite account store for Warden.
//!
//! The `accounts` table's UNIQUE email column is the sole arbiter of
//! per-email uniqueness; concurrent creation attempts for the same email
//! surface as [`DbError::Conflict`] and callers degrade them to a skip.

pub mod account;
pub mod error;
pub mod pool;
pub mod testing;

pub use account::{AccountRepository, NewAccount};
pub use error::DbError;
pub use pool::{create_pool, run_migrations};
