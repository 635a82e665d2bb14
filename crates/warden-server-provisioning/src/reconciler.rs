// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reconciliation of directory records against the local account store.
//!
//! The reconciler consumes a record stream one entry at a time and creates a
//! local account for every email that does not already have one. Existing
//! accounts are never mutated; accounts absent from the directory are never
//! deleted. Running twice against the same directory state is a no-op the
//! second time.

use tracing::{debug, info, instrument, warn};

use warden_server_auth::{generate_storage_label, hash_password, Role};
use warden_server_db::{AccountRepository, NewAccount};
use warden_server_directory::{DirectoryRecord, RecordStream};

use crate::error::ProvisioningError;

/// Counts reported by a completed synchronization run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOutcome {
	/// Accounts created during this run.
	pub created: u64,
	/// Records that resulted in no new account: already provisioned, lost a
	/// creation race, or failed individually.
	pub skipped: u64,
}

/// Applies directory records to the local account store.
#[derive(Clone)]
pub struct Reconciler {
	accounts: AccountRepository,
	work_factor: u32,
	fallback_credential: String,
}

impl Reconciler {
	pub fn new(accounts: AccountRepository, work_factor: u32, fallback_credential: String) -> Self {
		Self {
			accounts,
			work_factor,
			fallback_credential,
		}
	}

	/// Drain the stream, provisioning an account per unseen email.
	///
	/// Per-record failures (store conflict, store error, hashing failure) are
	/// logged and counted as skips; the run keeps going. A stream error is
	/// fatal to the run, but accounts already created stay created.
	#[instrument(skip(self, stream))]
	pub async fn reconcile(
		&self,
		stream: &mut dyn RecordStream,
	) -> Result<SyncOutcome, ProvisioningError> {
		let mut outcome = SyncOutcome::default();

		while let Some(record) = stream.next_record().await? {
			match self.reconcile_record(&record).await {
				Ok(true) => outcome.created += 1,
				Ok(false) => outcome.skipped += 1,
				Err(e) => {
					warn!(email = %record.email, error = %e, "failed to provision record, skipping");
					outcome.skipped += 1;
				}
			}
		}

		info!(
			created = outcome.created,
			skipped = outcome.skipped,
			invalid = stream.invalid_count(),
			"reconciliation complete"
		);

		Ok(outcome)
	}

	/// Provision one record. `Ok(true)` when an account was created,
	/// `Ok(false)` when one already existed.
	async fn reconcile_record(&self, record: &DirectoryRecord) -> Result<bool, ProvisioningError> {
		if self.accounts.get_account_by_email(&record.email).await?.is_some() {
			debug!(email = %record.email, "account already provisioned");
			return Ok(false);
		}

		let plaintext = record
			.credential
			.as_deref()
			.unwrap_or(&self.fallback_credential);
		let password_hash = hash_password(plaintext, self.work_factor)?;

		let account = self
			.accounts
			.create_account(&NewAccount {
				email: record.email.clone(),
				name: record.display_name().to_string(),
				password_hash,
				is_admin: false,
				must_change_password: true,
				storage_label: generate_storage_label(Role::User),
			})
			.await?;

		info!(account_id = %account.id, "provisioned account from directory");
		Ok(true)
	}
}
