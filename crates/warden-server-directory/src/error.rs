// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Errors from the directory service.
///
/// `Unavailable`, `AuthFailed`, and `SearchFailed` are fatal to a
/// synchronization run and carry the failing stage so operators can tell
/// connectivity problems from data problems. `RecordNotFound` only occurs on
/// the single-lookup path used by direct signup.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
	#[error("directory unavailable: {0}")]
	Unavailable(String),

	#[error("directory authentication failed: {0}")]
	AuthFailed(String),

	#[error("directory search failed: {0}")]
	SearchFailed(String),

	#[error("no directory record for email {0}")]
	RecordNotFound(String),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
