// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Directory connection configuration.

use warden_common_secret::SecretString;

/// Default object filter matching person-like directory entries.
pub const DEFAULT_OBJECT_FILTER: &str = "(objectClass=inetOrgPerson)";

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the directory client.
///
/// All values are operator-supplied; nothing here is baked in at compile
/// time. The bind secret is held as a [`SecretString`] so it cannot leak
/// through `Debug` output.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
	/// Directory endpoint URL, e.g. `ldap://directory.example.com:389`
	/// or `ldaps://directory.example.com:636`.
	pub endpoint: String,

	/// Distinguished name of the service principal used for the bind.
	pub bind_dn: String,

	/// Service principal secret.
	pub bind_secret: SecretString,

	/// Base DN of the user sub-tree searched during synchronization.
	pub user_base_dn: String,

	/// LDAP filter selecting person-like entries.
	pub object_filter: String,

	/// Connect timeout for the initial connection, in seconds.
	pub connect_timeout_secs: u64,
}

impl DirectoryConfig {
	/// Attributes requested from the directory for every search.
	pub fn requested_attributes() -> Vec<String> {
		vec![
			"mail".to_string(),
			"cn".to_string(),
			"userPassword".to_string(),
		]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bind_secret_is_redacted_in_debug() {
		let config = DirectoryConfig {
			endpoint: "ldap://localhost:389".to_string(),
			bind_dn: "cn=service,dc=example,dc=com".to_string(),
			bind_secret: SecretString::new("hunter2"),
			user_base_dn: "ou=people,dc=example,dc=com".to_string(),
			object_filter: DEFAULT_OBJECT_FILTER.to_string(),
			connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
		};

		let rendered = format!("{config:?}");
		assert!(!rendered.contains("hunter2"));
		assert!(rendered.contains("[REDACTED]"));
	}

	#[test]
	fn requested_attributes_cover_identity_fields() {
		let attrs = DirectoryConfig::requested_attributes();
		assert_eq!(attrs, vec!["mail", "cn", "userPassword"]);
	}
}
