// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Directory reconciliation and account provisioning for Warden.
//!
//! This crate provides:
//! - [`Reconciler`] - applies a directory record stream to the account store
//! - [`ProvisioningService`] - the three provisioning entry points
//!   (synchronize, signup, create_admin)
//! - [`SyncOutcome`] - created/skipped counts for a completed run

pub mod error;
pub mod reconciler;
pub mod service;

pub use error::ProvisioningError;
pub use reconciler::{Reconciler, SyncOutcome};
pub use service::ProvisioningService;
