// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request handlers for the provisioning API.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use warden_server_auth::AccountProfile;
use warden_server_provisioning::SyncOutcome;

use crate::error::ApiError;
use crate::state::AppState;

const MAX_PAGE_SIZE: i64 = 200;
const DEFAULT_PAGE_SIZE: i64 = 50;

#[derive(Debug, Serialize)]
pub struct SyncResponse {
	pub created: u64,
	pub skipped: u64,
}

impl From<SyncOutcome> for SyncResponse {
	fn from(outcome: SyncOutcome) -> Self {
		Self {
			created: outcome.created,
			skipped: outcome.skipped,
		}
	}
}

/// POST /api/v1/sync - run one synchronization pass against the directory.
pub async fn sync(State(state): State<AppState>) -> Result<Json<SyncResponse>, ApiError> {
	let outcome = state.provisioning.synchronize().await?;
	info!(created = outcome.created, skipped = outcome.skipped, "synchronization run finished");
	Ok(Json(outcome.into()))
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
	pub email: String,
	pub password: String,
	pub name: String,
}

/// POST /api/v1/signup - self-service account creation for directory members.
pub async fn signup(
	State(state): State<AppState>,
	Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AccountProfile>), ApiError> {
	validate_credentials(&request.email, &request.password)?;

	let profile = state
		.provisioning
		.signup(&request.email, &request.password, &request.name)
		.await?;

	Ok((StatusCode::CREATED, Json(profile)))
}

#[derive(Debug, Deserialize)]
pub struct CreateAdminRequest {
	pub email: String,
	pub password: String,
	pub name: String,
}

/// POST /api/v1/admin/accounts - create an administrative account.
pub async fn create_admin(
	State(state): State<AppState>,
	Json(request): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<AccountProfile>), ApiError> {
	validate_credentials(&request.email, &request.password)?;

	let profile = state
		.provisioning
		.create_admin(&request.email, &request.password, &request.name)
		.await?;

	Ok((StatusCode::CREATED, Json(profile)))
}

#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
	pub limit: Option<i64>,
	pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ListAccountsResponse {
	pub accounts: Vec<AccountProfile>,
}

/// GET /api/v1/accounts - list provisioned accounts, oldest first.
pub async fn list_accounts(
	State(state): State<AppState>,
	Query(query): Query<ListAccountsQuery>,
) -> Result<Json<ListAccountsResponse>, ApiError> {
	let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
	let offset = query.offset.unwrap_or(0).max(0);

	let accounts = state.accounts.list_accounts(limit, offset).await?;

	Ok(Json(ListAccountsResponse {
		accounts: accounts.iter().map(|a| a.to_profile()).collect(),
	}))
}

/// GET /healthz - liveness probe.
pub async fn healthz() -> &'static str {
	"ok"
}

fn validate_credentials(email: &str, password: &str) -> Result<(), ApiError> {
	if email.trim().is_empty() {
		return Err(ApiError::BadRequest("email must not be empty".to_string()));
	}
	if password.is_empty() {
		return Err(ApiError::BadRequest("password must not be empty".to_string()));
	}
	Ok(())
}
