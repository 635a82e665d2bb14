// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Provisioning configuration: credential hashing cost and the fallback
//! credential used for directory entries without one.

use serde::Deserialize;

/// Default bcrypt work factor.
const DEFAULT_WORK_FACTOR: u32 = 12;

/// Default credential for directory entries that expose no `userPassword`.
/// Accounts provisioned with it are forced to change it on first login.
const DEFAULT_FALLBACK_CREDENTIAL: &str = "changeme";

/// Provisioning configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct ProvisioningConfig {
	pub work_factor: u32,
	pub fallback_credential: String,
}

impl Default for ProvisioningConfig {
	fn default() -> Self {
		Self {
			work_factor: DEFAULT_WORK_FACTOR,
			fallback_credential: DEFAULT_FALLBACK_CREDENTIAL.to_string(),
		}
	}
}

/// Provisioning configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvisioningConfigLayer {
	#[serde(default)]
	pub work_factor: Option<u32>,
	#[serde(default)]
	pub fallback_credential: Option<String>,
}

impl ProvisioningConfigLayer {
	pub fn merge(&mut self, other: ProvisioningConfigLayer) {
		if other.work_factor.is_some() {
			self.work_factor = other.work_factor;
		}
		if other.fallback_credential.is_some() {
			self.fallback_credential = other.fallback_credential;
		}
	}

	pub fn finalize(self) -> ProvisioningConfig {
		let defaults = ProvisioningConfig::default();
		ProvisioningConfig {
			work_factor: self.work_factor.unwrap_or(defaults.work_factor),
			fallback_credential: self
				.fallback_credential
				.unwrap_or(defaults.fallback_credential),
		}
	}
}
