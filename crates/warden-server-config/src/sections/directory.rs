// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Directory connection configuration.
//!
//! The endpoint, service principal, and search scope have no sensible
//! defaults; missing values are a hard configuration error rather than a
//! baked-in constant.

use serde::Deserialize;
use warden_common_secret::SecretString;
use warden_server_directory::config::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_OBJECT_FILTER};
use warden_server_directory::DirectoryConfig;

use crate::error::ConfigError;

/// Directory configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryConfigLayer {
	#[serde(default)]
	pub endpoint: Option<String>,
	#[serde(default)]
	pub bind_dn: Option<String>,
	#[serde(default)]
	pub bind_secret: Option<SecretString>,
	#[serde(default)]
	pub user_base_dn: Option<String>,
	#[serde(default)]
	pub object_filter: Option<String>,
	#[serde(default)]
	pub connect_timeout_secs: Option<u64>,
}

impl DirectoryConfigLayer {
	pub fn merge(&mut self, other: DirectoryConfigLayer) {
		if other.endpoint.is_some() {
			self.endpoint = other.endpoint;
		}
		if other.bind_dn.is_some() {
			self.bind_dn = other.bind_dn;
		}
		if other.bind_secret.is_some() {
			self.bind_secret = other.bind_secret;
		}
		if other.user_base_dn.is_some() {
			self.user_base_dn = other.user_base_dn;
		}
		if other.object_filter.is_some() {
			self.object_filter = other.object_filter;
		}
		if other.connect_timeout_secs.is_some() {
			self.connect_timeout_secs = other.connect_timeout_secs;
		}
	}

	pub fn finalize(self) -> Result<DirectoryConfig, ConfigError> {
		let endpoint = self
			.endpoint
			.ok_or_else(|| ConfigError::Invalid("directory.endpoint is required".to_string()))?;
		let bind_dn = self
			.bind_dn
			.ok_or_else(|| ConfigError::Invalid("directory.bind_dn is required".to_string()))?;
		let bind_secret = self
			.bind_secret
			.ok_or_else(|| ConfigError::Invalid("directory.bind_secret is required".to_string()))?;
		let user_base_dn = self.user_base_dn.ok_or_else(|| {
			ConfigError::Invalid("directory.user_base_dn is required".to_string())
		})?;

		Ok(DirectoryConfig {
			endpoint,
			bind_dn,
			bind_secret,
			user_base_dn,
			object_filter: self
				.object_filter
				.unwrap_or_else(|| DEFAULT_OBJECT_FILTER.to_string()),
			connect_timeout_secs: self
				.connect_timeout_secs
				.unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
		})
	}
}
