// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Local account entity and its public view.
//!
//! Accounts are created once by the provisioning layer and thereafter owned
//! entirely by the account store; nothing in this codebase mutates or deletes
//! an existing account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::AccountId;

/// Account role, which also namespaces the account's storage label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	/// Administrative account with full access.
	Admin,
	/// Regular provisioned account.
	User,
}

impl Role {
	/// Storage-label namespace prefix for this role.
	pub fn storage_prefix(self) -> &'static str {
		match self {
			Role::Admin => "admin",
			Role::User => "user",
		}
	}
}

impl std::fmt::Display for Role {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Role::Admin => write!(f, "admin"),
			Role::User => write!(f, "user"),
		}
	}
}

impl std::str::FromStr for Role {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"admin" => Ok(Role::Admin),
			"user" => Ok(Role::User),
			other => Err(format!("unknown role: {other}")),
		}
	}
}

/// Generate a fresh storage label scoped to the role's namespace.
///
/// Labels are opaque per-account tags used by the store for data isolation,
/// e.g. `user-7f9c0a4e-...`. Each call produces a distinct label.
pub fn generate_storage_label(role: Role) -> String {
	format!("{}-{}", role.storage_prefix(), Uuid::new_v4())
}

/// A local account.
///
/// `email` is the reconciliation key against the external directory: at most
/// one account may exist per email, enforced by the store's unique constraint.
///
/// # PII Handling
///
/// `email` and `name` are PII and should be redacted in logs; the credential
/// hash must never appear in any caller-facing representation (see
/// [`Account::to_profile`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
	/// Unique identifier for this account.
	pub id: AccountId,

	/// Email address, unique within the store.
	pub email: String,

	/// Display name.
	pub name: String,

	/// Bcrypt hash of the account credential.
	pub password_hash: String,

	/// Whether this is an administrative account.
	pub is_admin: bool,

	/// Whether the account must change its credential on first login.
	/// Set for directory-provisioned accounts whose credential was not
	/// chosen by the account holder.
	pub must_change_password: bool,

	/// Opaque store-scoped namespace tag, prefixed by role.
	pub storage_label: String,

	/// When the account was created.
	pub created_at: DateTime<Utc>,
}

impl Account {
	/// Role implied by the admin flag.
	pub fn role(&self) -> Role {
		if self.is_admin {
			Role::Admin
		} else {
			Role::User
		}
	}

	/// Public view of this account, without the credential hash.
	pub fn to_profile(&self) -> AccountProfile {
		AccountProfile {
			id: self.id,
			email: self.email.clone(),
			name: self.name.clone(),
			is_admin: self.is_admin,
			must_change_password: self.must_change_password,
			created_at: self.created_at,
		}
	}
}

/// Public view of an account, safe to return to callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountProfile {
	/// Unique identifier for this account.
	pub id: AccountId,

	/// Email address.
	pub email: String,

	/// Display name.
	pub name: String,

	/// Whether this is an administrative account.
	pub is_admin: bool,

	/// Whether a credential change is forced on first login.
	pub must_change_password: bool,

	/// When the account was created.
	pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn make_test_account() -> Account {
		Account {
			id: AccountId::generate(),
			email: "alice@example.com".to_string(),
			name: "Alice".to_string(),
			password_hash: "$2b$04$abcdefghijklmnopqrstuv".to_string(),
			is_admin: false,
			must_change_password: true,
			storage_label: generate_storage_label(Role::User),
			created_at: Utc::now(),
		}
	}

	mod role {
		use super::*;

		#[test]
		fn storage_prefix_by_role() {
			assert_eq!(Role::Admin.storage_prefix(), "admin");
			assert_eq!(Role::User.storage_prefix(), "user");
		}

		#[test]
		fn display_and_parse_round_trip() {
			for role in [Role::Admin, Role::User] {
				let parsed: Role = role.to_string().parse().unwrap();
				assert_eq!(parsed, role);
			}
		}

		#[test]
		fn parse_rejects_unknown() {
			assert!("superuser".parse::<Role>().is_err());
		}
	}

	mod storage_label {
		use super::*;

		#[test]
		fn label_carries_role_prefix() {
			assert!(generate_storage_label(Role::User).starts_with("user-"));
			assert!(generate_storage_label(Role::Admin).starts_with("admin-"));
		}

		#[test]
		fn labels_are_distinct_per_call() {
			assert_ne!(
				generate_storage_label(Role::User),
				generate_storage_label(Role::User)
			);
		}
	}

	mod account {
		use super::*;

		#[test]
		fn role_follows_admin_flag() {
			let mut account = make_test_account();
			assert_eq!(account.role(), Role::User);

			account.is_admin = true;
			assert_eq!(account.role(), Role::Admin);
		}

		#[test]
		fn profile_omits_credential_hash() {
			let account = make_test_account();
			let profile = account.to_profile();

			assert_eq!(profile.id, account.id);
			assert_eq!(profile.email, account.email);
			assert_eq!(profile.name, account.name);

			let json = serde_json::to_string(&profile).unwrap();
			assert!(!json.contains("password_hash"));
			assert!(!json.contains(&account.password_hash));
		}
	}
}
