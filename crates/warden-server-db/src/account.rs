// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account repository for database operations.
//!
//! Provides the narrow surface the provisioning layer consumes: lookup by
//! email, creation, and read/list for the operator API. Existing accounts are
//! never mutated or deleted by this service.

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use warden_server_auth::{Account, AccountId};

use crate::error::DbError;

/// Fields for a new account, as decided by the provisioning layer.
#[derive(Debug, Clone)]
pub struct NewAccount {
	pub email: String,
	pub name: String,
	pub password_hash: String,
	pub is_admin: bool,
	pub must_change_password: bool,
	pub storage_label: String,
}

/// Repository for account database operations.
///
/// All IDs are UUIDs stored as strings in SQLite.
#[derive(Clone)]
pub struct AccountRepository {
	pool: SqlitePool,
}

impl AccountRepository {
	/// Create a new repository with the given pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Create a new account.
	///
	/// # Errors
	/// Returns `DbError::Conflict` if an account with the same email already
	/// exists; the UNIQUE constraint on `email` is the arbiter, so this is
	/// safe under concurrent creation attempts.
	#[tracing::instrument(skip(self, account), fields(email = %account.email))]
	pub async fn create_account(&self, account: &NewAccount) -> Result<Account, DbError> {
		let id = AccountId::generate();
		let now = Utc::now();

		let result = sqlx::query(
			r#"
			INSERT INTO accounts (id, email, name, password_hash, is_admin, must_change_password, storage_label, created_at)
			VALUES (?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(id.to_string())
		.bind(&account.email)
		.bind(&account.name)
		.bind(&account.password_hash)
		.bind(account.is_admin as i32)
		.bind(account.must_change_password as i32)
		.bind(&account.storage_label)
		.bind(now.to_rfc3339())
		.execute(&self.pool)
		.await;

		match result {
			Ok(_) => {}
			Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
				return Err(DbError::Conflict(format!(
					"account already exists for email {}",
					account.email
				)));
			}
			Err(e) => return Err(e.into()),
		}

		tracing::debug!(account_id = %id, "account created");

		Ok(Account {
			id,
			email: account.email.clone(),
			name: account.name.clone(),
			password_hash: account.password_hash.clone(),
			is_admin: account.is_admin,
			must_change_password: account.must_change_password,
			storage_label: account.storage_label.clone(),
			created_at: now,
		})
	}

	/// Get an account by email.
	///
	/// # Returns
	/// `None` if no account exists with this email.
	#[tracing::instrument(skip(self, email))]
	pub async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, email, name, password_hash, is_admin, must_change_password, storage_label, created_at
			FROM accounts
			WHERE email = ?
			"#,
		)
		.bind(email)
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_account(&r)).transpose()
	}

	/// Get an account by ID.
	#[tracing::instrument(skip(self), fields(account_id = %id))]
	pub async fn get_account(&self, id: &AccountId) -> Result<Option<Account>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, email, name, password_hash, is_admin, must_change_password, storage_label, created_at
			FROM accounts
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_account(&r)).transpose()
	}

	/// List accounts, oldest first.
	#[tracing::instrument(skip(self))]
	pub async fn list_accounts(&self, limit: i64, offset: i64) -> Result<Vec<Account>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT id, email, name, password_hash, is_admin, must_change_password, storage_label, created_at
			FROM accounts
			ORDER BY created_at ASC, id ASC
			LIMIT ? OFFSET ?
			"#,
		)
		.bind(limit)
		.bind(offset)
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_account).collect()
	}
}

fn row_to_account(row: &sqlx::sqlite::SqliteRow) -> Result<Account, DbError> {
	let id: String = row.get("id");
	let created_at: String = row.get("created_at");

	Ok(Account {
		id: AccountId::new(
			Uuid::parse_str(&id).map_err(|e| DbError::Internal(format!("invalid account id: {e}")))?,
		),
		email: row.get("email"),
		name: row.get("name"),
		password_hash: row.get("password_hash"),
		is_admin: row.get::<i32, _>("is_admin") != 0,
		must_change_password: row.get::<i32, _>("must_change_password") != 0,
		storage_label: row.get("storage_label"),
		created_at: DateTime::parse_from_rfc3339(&created_at)
			.map_err(|e| DbError::Internal(format!("invalid created_at: {e}")))?
			.with_timezone(&Utc),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::create_account_test_pool;

	fn new_account(email: &str) -> NewAccount {
		NewAccount {
			email: email.to_string(),
			name: "Test Account".to_string(),
			password_hash: "$2b$04$abcdefghijklmnopqrstuv".to_string(),
			is_admin: false,
			must_change_password: true,
			storage_label: format!("user-{}", Uuid::new_v4()),
		}
	}

	#[tokio::test]
	async fn create_and_get_by_email() {
		let pool = create_account_test_pool().await;
		let repo = AccountRepository::new(pool);

		let created = repo.create_account(&new_account("a@x.com")).await.unwrap();
		let fetched = repo.get_account_by_email("a@x.com").await.unwrap().unwrap();

		assert_eq!(fetched.id, created.id);
		assert_eq!(fetched.email, "a@x.com");
		assert!(fetched.must_change_password);
		assert!(!fetched.is_admin);
	}

	#[tokio::test]
	async fn get_by_email_returns_none_when_absent() {
		let pool = create_account_test_pool().await;
		let repo = AccountRepository::new(pool);

		assert!(repo.get_account_by_email("missing@x.com").await.unwrap().is_none());
	}

	#[tokio::test]
	async fn duplicate_email_is_a_conflict() {
		let pool = create_account_test_pool().await;
		let repo = AccountRepository::new(pool);

		repo.create_account(&new_account("dup@x.com")).await.unwrap();
		let err = repo.create_account(&new_account("dup@x.com")).await.unwrap_err();

		assert!(matches!(err, DbError::Conflict(_)), "got {err:?}");
	}

	#[tokio::test]
	async fn get_account_by_id() {
		let pool = create_account_test_pool().await;
		let repo = AccountRepository::new(pool);

		let created = repo.create_account(&new_account("id@x.com")).await.unwrap();
		let fetched = repo.get_account(&created.id).await.unwrap().unwrap();
		assert_eq!(fetched.email, created.email);
	}

	#[tokio::test]
	async fn list_accounts_in_creation_order() {
		let pool = create_account_test_pool().await;
		let repo = AccountRepository::new(pool);

		repo.create_account(&new_account("first@x.com")).await.unwrap();
		repo.create_account(&new_account("second@x.com")).await.unwrap();

		let accounts = repo.list_accounts(10, 0).await.unwrap();
		assert_eq!(accounts.len(), 2);

		let emails: Vec<_> = accounts.iter().map(|a| a.email.as_str()).collect();
		assert!(emails.contains(&"first@x.com"));
		assert!(emails.contains(&"second@x.com"));
	}
}
