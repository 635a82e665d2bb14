// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-section configuration types: resolved structs and partial layers.

pub mod database;
pub mod directory;
pub mod http;
pub mod logging;
pub mod provisioning;
pub mod sync;

pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use directory::DirectoryConfigLayer;
pub use http::{HttpConfig, HttpConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use provisioning::{ProvisioningConfig, ProvisioningConfigLayer};
pub use sync::{SyncConfig, SyncConfigLayer};
