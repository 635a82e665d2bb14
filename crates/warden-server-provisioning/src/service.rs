// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Provisioning entry points: bulk synchronization, directory-gated signup,
//! and local admin creation.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use warden_server_auth::{generate_storage_label, hash_password, AccountProfile, Role};
use warden_server_db::{AccountRepository, NewAccount};
use warden_server_directory::{DirectoryConnector, DirectoryError};

use crate::error::ProvisioningError;
use crate::reconciler::{Reconciler, SyncOutcome};

/// Orchestrates directory sessions and the account store.
///
/// Every synchronization or signup opens a fresh directory session through
/// the connector; admin creation never touches the directory.
#[derive(Clone)]
pub struct ProvisioningService {
	connector: Arc<dyn DirectoryConnector>,
	accounts: AccountRepository,
	reconciler: Reconciler,
	work_factor: u32,
}

impl ProvisioningService {
	pub fn new(
		connector: Arc<dyn DirectoryConnector>,
		accounts: AccountRepository,
		work_factor: u32,
		fallback_credential: String,
	) -> Self {
		let reconciler = Reconciler::new(accounts.clone(), work_factor, fallback_credential);
		Self {
			connector,
			accounts,
			reconciler,
			work_factor,
		}
	}

	/// Run one full synchronization pass: bind, search, reconcile.
	///
	/// Bind and search failures abort the run before any account is touched;
	/// a mid-stream failure aborts it with earlier creations intact.
	#[instrument(skip(self))]
	pub async fn synchronize(&self) -> Result<SyncOutcome, ProvisioningError> {
		let directory = self.connector.connect().await?;
		let mut stream = directory.search_users().await?;
		self.reconciler.reconcile(stream.as_mut()).await
	}

	/// Provision a single account for a caller who already exists in the
	/// directory, with a credential of their own choosing.
	///
	/// The email must resolve to a directory record; otherwise the request is
	/// rejected with [`DirectoryError::RecordNotFound`]. The directory's
	/// display name wins over the caller-supplied one.
	#[instrument(skip(self, password, name), fields(email = %email))]
	pub async fn signup(
		&self,
		email: &str,
		password: &str,
		name: &str,
	) -> Result<AccountProfile, ProvisioningError> {
		let directory = self.connector.connect().await?;

		let record = directory.find_user_by_email(email).await?.ok_or_else(|| {
			warn!("signup rejected, email not present in directory");
			DirectoryError::RecordNotFound(email.to_string())
		})?;

		let display_name = record
			.display_names
			.first()
			.cloned()
			.unwrap_or_else(|| name.to_string());
		let password_hash = hash_password(password, self.work_factor)?;

		let account = self
			.accounts
			.create_account(&NewAccount {
				email: record.email,
				name: display_name,
				password_hash,
				is_admin: false,
				must_change_password: false,
				storage_label: generate_storage_label(Role::User),
			})
			.await?;

		info!(account_id = %account.id, "account created via signup");
		Ok(account.to_profile())
	}

	/// Create an administrative account directly, bypassing the directory.
	#[instrument(skip(self, password, name), fields(email = %email))]
	pub async fn create_admin(
		&self,
		email: &str,
		password: &str,
		name: &str,
	) -> Result<AccountProfile, ProvisioningError> {
		let password_hash = hash_password(password, self.work_factor)?;

		let account = self
			.accounts
			.create_account(&NewAccount {
				email: email.to_string(),
				name: name.to_string(),
				password_hash,
				is_admin: true,
				must_change_password: false,
				storage_label: generate_storage_label(Role::Admin),
			})
			.await?;

		info!(account_id = %account.id, "admin account created");
		Ok(account.to_profile())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use async_trait::async_trait;
	use std::sync::Arc;

	use warden_server_auth::verify_password;
	use warden_server_db::testing::create_account_test_pool;
	use warden_server_db::DbError;
	use warden_server_directory::{Directory, DirectoryRecord, RecordStream};

	/// In-memory directory holding a fixed set of records.
	struct FakeDirectory {
		records: Vec<DirectoryRecord>,
	}

	struct FakeStream {
		records: std::vec::IntoIter<DirectoryRecord>,
	}

	#[async_trait]
	impl RecordStream for FakeStream {
		async fn next_record(&mut self) -> Result<Option<DirectoryRecord>, DirectoryError> {
			Ok(self.records.next())
		}

		fn invalid_count(&self) -> u64 {
			0
		}
	}

	#[async_trait]
	impl Directory for FakeDirectory {
		async fn search_users(&self) -> Result<Box<dyn RecordStream>, DirectoryError> {
			Ok(Box::new(FakeStream {
				records: self.records.clone().into_iter(),
			}))
		}

		async fn find_user_by_email(
			&self,
			email: &str,
		) -> Result<Option<DirectoryRecord>, DirectoryError> {
			Ok(self.records.iter().find(|r| r.email == email).cloned())
		}
	}

	struct FakeConnector {
		records: Vec<DirectoryRecord>,
	}

	#[async_trait]
	impl DirectoryConnector for FakeConnector {
		async fn connect(&self) -> Result<Box<dyn Directory>, DirectoryError> {
			Ok(Box::new(FakeDirectory {
				records: self.records.clone(),
			}))
		}
	}

	/// Connector whose every connection attempt fails, for paths that must
	/// not touch the directory.
	struct UnreachableConnector;

	#[async_trait]
	impl DirectoryConnector for UnreachableConnector {
		async fn connect(&self) -> Result<Box<dyn Directory>, DirectoryError> {
			Err(DirectoryError::Unavailable("no route to host".to_string()))
		}
	}

	fn record(email: &str, name: &str, credential: Option<&str>) -> DirectoryRecord {
		DirectoryRecord {
			email: email.to_string(),
			display_names: vec![name.to_string()],
			credential: credential.map(str::to_string),
		}
	}

	async fn service_with_records(
		records: Vec<DirectoryRecord>,
	) -> (ProvisioningService, AccountRepository) {
		let pool = create_account_test_pool().await;
		let repo = AccountRepository::new(pool);
		let service = ProvisioningService::new(
			Arc::new(FakeConnector { records }),
			repo.clone(),
			4,
			"changeme".to_string(),
		);
		(service, repo)
	}

	mod synchronize {
		use super::*;

		#[tokio::test]
		async fn provisions_directory_population() {
			let (service, repo) = service_with_records(vec![
				record("alice@example.com", "Alice", Some("wonderland")),
				record("bob@example.com", "Bob", None),
			])
			.await;

			let outcome = service.synchronize().await.unwrap();
			assert_eq!(outcome, SyncOutcome { created: 2, skipped: 0 });

			let again = service.synchronize().await.unwrap();
			assert_eq!(again, SyncOutcome { created: 0, skipped: 2 });

			assert_eq!(repo.list_accounts(10, 0).await.unwrap().len(), 2);
		}

		#[tokio::test]
		async fn unreachable_directory_fails_without_side_effects() {
			let pool = create_account_test_pool().await;
			let repo = AccountRepository::new(pool);
			let service = ProvisioningService::new(
				Arc::new(UnreachableConnector),
				repo.clone(),
				4,
				"changeme".to_string(),
			);

			let err = service.synchronize().await.unwrap_err();
			assert!(matches!(
				err,
				ProvisioningError::Directory(DirectoryError::Unavailable(_))
			));
			assert!(repo.list_accounts(10, 0).await.unwrap().is_empty());
		}
	}

	mod signup {
		use super::*;

		#[tokio::test]
		async fn creates_account_with_caller_credential() {
			let (service, repo) =
				service_with_records(vec![record("alice@example.com", "Alice Carroll", None)])
					.await;

			let profile = service
				.signup("alice@example.com", "chosen-password", "Alice")
				.await
				.unwrap();

			assert_eq!(profile.email, "alice@example.com");
			assert_eq!(profile.name, "Alice Carroll");
			assert!(!profile.is_admin);
			assert!(!profile.must_change_password);

			let stored = repo
				.get_account_by_email("alice@example.com")
				.await
				.unwrap()
				.unwrap();
			assert!(verify_password("chosen-password", &stored.password_hash).unwrap());
			assert!(stored.storage_label.starts_with("user-"));
		}

		#[tokio::test]
		async fn falls_back_to_caller_name_when_directory_has_none() {
			let (service, repo) = service_with_records(vec![DirectoryRecord {
				email: "nameless@example.com".to_string(),
				display_names: vec![],
				credential: None,
			}])
			.await;

			let profile = service
				.signup("nameless@example.com", "pw", "Self Chosen")
				.await
				.unwrap();

			assert_eq!(profile.name, "Self Chosen");

			let stored = repo
				.get_account_by_email("nameless@example.com")
				.await
				.unwrap()
				.unwrap();
			assert_eq!(stored.name, "Self Chosen");
		}

		#[tokio::test]
		async fn rejects_email_absent_from_directory() {
			let (service, repo) = service_with_records(vec![]).await;

			let err = service
				.signup("stranger@example.com", "pw", "Stranger")
				.await
				.unwrap_err();

			assert!(matches!(
				err,
				ProvisioningError::Directory(DirectoryError::RecordNotFound(_))
			));
			assert!(repo.list_accounts(10, 0).await.unwrap().is_empty());
		}

		#[tokio::test]
		async fn duplicate_signup_is_a_conflict() {
			let (service, _repo) =
				service_with_records(vec![record("alice@example.com", "Alice", None)]).await;

			service
				.signup("alice@example.com", "pw-one", "Alice")
				.await
				.unwrap();
			let err = service
				.signup("alice@example.com", "pw-two", "Alice")
				.await
				.unwrap_err();

			assert!(matches!(err, ProvisioningError::Store(DbError::Conflict(_))));
		}
	}

	mod create_admin {
		use super::*;

		#[tokio::test]
		async fn never_consults_the_directory() {
			let pool = create_account_test_pool().await;
			let repo = AccountRepository::new(pool);
			let service = ProvisioningService::new(
				Arc::new(UnreachableConnector),
				repo.clone(),
				4,
				"changeme".to_string(),
			);

			let profile = service
				.create_admin("root@example.com", "admin-pw", "Root")
				.await
				.unwrap();

			assert!(profile.is_admin);
			assert!(!profile.must_change_password);

			let stored = repo
				.get_account_by_email("root@example.com")
				.await
				.unwrap()
				.unwrap();
			assert!(stored.storage_label.starts_with("admin-"));
			assert!(verify_password("admin-pw", &stored.password_hash).unwrap());
		}
	}
}
