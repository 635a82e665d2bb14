// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

use warden_server_auth::PasswordError;
use warden_server_db::DbError;
use warden_server_directory::DirectoryError;

/// Errors from the provisioning layer.
///
/// During a synchronization run, only directory-side failures (bind, search,
/// mid-stream protocol errors) escape as errors; store conflicts and hashing
/// failures for individual records are degraded to skips inside the
/// reconciler. The direct paths (signup, admin creation) surface everything.
#[derive(Debug, Error)]
pub enum ProvisioningError {
	#[error(transparent)]
	Directory(#[from] DirectoryError),

	#[error("account store error: {0}")]
	Store(#[from] DbError),

	#[error("credential hashing failed: {0}")]
	Password(#[from] PasswordError),
}
