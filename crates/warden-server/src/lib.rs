// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP server for Warden directory synchronization and provisioning.
//!
//! Endpoints:
//! - `POST /api/v1/sync` - run a synchronization pass (admin)
//! - `POST /api/v1/sync/public` - same, unauthenticated (only when enabled)
//! - `POST /api/v1/signup` - self-service signup for directory members
//! - `POST /api/v1/admin/accounts` - create an admin account (admin)
//! - `GET /api/v1/accounts` - list accounts (admin)
//! - `GET /healthz` - liveness probe

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
