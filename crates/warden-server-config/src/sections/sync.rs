// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Synchronization trigger exposure.
//!
//! The unauthenticated sync endpoint exists so external schedulers can drive
//! unattended runs without credentials. That makes it an open reconciliation
//! endpoint; operators opt out here.

use serde::Deserialize;

/// Sync configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct SyncConfig {
	/// Whether `POST /api/v1/sync/public` is served without authentication.
	pub allow_unauthenticated: bool,
}

impl Default for SyncConfig {
	fn default() -> Self {
		Self {
			allow_unauthenticated: true,
		}
	}
}

/// Sync configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncConfigLayer {
	#[serde(default)]
	pub allow_unauthenticated: Option<bool>,
}

impl SyncConfigLayer {
	pub fn merge(&mut self, other: SyncConfigLayer) {
		if other.allow_unauthenticated.is_some() {
			self.allow_unauthenticated = other.allow_unauthenticated;
		}
	}

	pub fn finalize(self) -> SyncConfig {
		SyncConfig {
			allow_unauthenticated: self.allow_unauthenticated.unwrap_or(true),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn open_by_default() {
		assert!(SyncConfigLayer::default().finalize().allow_unauthenticated);
	}

	#[test]
	fn can_be_closed() {
		let layer = SyncConfigLayer {
			allow_unauthenticated: Some(false),
		};
		assert!(!layer.finalize().allow_unauthenticated);
	}
}
