// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	extract::{Request, State},
	http::StatusCode,
	middleware::Next,
	response::Response,
};
use subtle::ConstantTimeEq;
use tracing::warn;
use warden_common_secret::SecretString;

/// Bearer-token gate for the administrative endpoints.
///
/// With no token configured the admin surface is disabled outright rather
/// than left open. Comparison is constant-time once lengths match.
pub async fn admin_auth_middleware(
	State(expected_token): State<Option<SecretString>>,
	request: Request,
	next: Next,
) -> Result<Response, StatusCode> {
	let Some(expected) = expected_token else {
		warn!("admin auth failed: no token configured");
		return Err(StatusCode::UNAUTHORIZED);
	};

	let auth_header = request
		.headers()
		.get("Authorization")
		.and_then(|h| h.to_str().ok());

	let Some(auth_value) = auth_header else {
		warn!("admin auth failed: missing Authorization header");
		return Err(StatusCode::UNAUTHORIZED);
	};

	let token = if let Some(bearer) = auth_value.strip_prefix("Bearer ") {
		bearer.trim()
	} else {
		warn!("admin auth failed: invalid Authorization format");
		return Err(StatusCode::UNAUTHORIZED);
	};

	let expected_bytes = expected.expose().as_bytes();
	let token_bytes = token.as_bytes();

	if expected_bytes.len() != token_bytes.len() {
		warn!("admin auth failed: token length mismatch");
		return Err(StatusCode::UNAUTHORIZED);
	}

	if expected_bytes.ct_eq(token_bytes).into() {
		Ok(next.run(request).await)
	} else {
		warn!("admin auth failed: invalid token");
		Err(StatusCode::UNAUTHORIZED)
	}
}
