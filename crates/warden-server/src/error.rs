// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use warden_server_db::DbError;
use warden_server_directory::DirectoryError;
use warden_server_provisioning::ProvisioningError;

/// API-facing error for the provisioning endpoints.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
	#[error("bad request: {0}")]
	BadRequest(String),
	#[error("not found: {0}")]
	NotFound(String),
	#[error("conflict: {0}")]
	Conflict(String),
	#[error("directory unavailable: {0}")]
	DirectoryUnavailable(String),
	#[error("directory error: {0}")]
	DirectoryFailed(String),
	#[error("internal error: {0}")]
	Internal(String),
}

impl From<ProvisioningError> for ApiError {
	fn from(e: ProvisioningError) -> Self {
		match e {
			ProvisioningError::Directory(e) => e.into(),
			ProvisioningError::Store(e) => e.into(),
			ProvisioningError::Password(e) => ApiError::Internal(e.to_string()),
		}
	}
}

impl From<DirectoryError> for ApiError {
	fn from(e: DirectoryError) -> Self {
		match e {
			DirectoryError::Unavailable(msg) => ApiError::DirectoryUnavailable(msg),
			DirectoryError::AuthFailed(msg) | DirectoryError::SearchFailed(msg) => {
				ApiError::DirectoryFailed(msg)
			}
			DirectoryError::RecordNotFound(email) => {
				ApiError::NotFound(format!("no directory record for {email}"))
			}
		}
	}
}

impl From<DbError> for ApiError {
	fn from(e: DbError) -> Self {
		match e {
			DbError::Conflict(msg) => ApiError::Conflict(msg),
			DbError::NotFound(msg) => ApiError::NotFound(msg),
			DbError::Sqlx(e) => ApiError::Internal(e.to_string()),
			DbError::Internal(msg) => ApiError::Internal(msg),
		}
	}
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error: String,
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let status = match &self {
			ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
			ApiError::NotFound(_) => StatusCode::NOT_FOUND,
			ApiError::Conflict(_) => StatusCode::CONFLICT,
			ApiError::DirectoryUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
			ApiError::DirectoryFailed(_) => StatusCode::BAD_GATEWAY,
			ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
		};

		// Internal details stay in the logs, not in the response body.
		let detail = match &self {
			ApiError::Internal(msg) => {
				tracing::error!(error = %msg, "internal error serving request");
				"internal error".to_string()
			}
			other => other.to_string(),
		};

		(status, Json(ErrorBody { error: detail })).into_response()
	}
}
