// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Router assembly for the provisioning API.

use axum::{
	middleware,
	routing::{get, post},
	Router,
};
use warden_common_secret::SecretString;

use crate::auth::admin_auth_middleware;
use crate::handlers;
use crate::state::AppState;

/// Build the full application router.
///
/// The admin surface (sync, account listing, admin creation) sits behind the
/// bearer-token middleware. `/api/v1/sync/public` is only mounted when
/// unauthenticated synchronization is explicitly allowed by configuration.
pub fn create_router(
	state: AppState,
	admin_token: Option<SecretString>,
	allow_unauthenticated_sync: bool,
) -> Router {
	let admin = Router::new()
		.route("/api/v1/sync", post(handlers::sync))
		.route("/api/v1/accounts", get(handlers::list_accounts))
		.route("/api/v1/admin/accounts", post(handlers::create_admin))
		.route_layer(middleware::from_fn_with_state(
			admin_token,
			admin_auth_middleware,
		));

	let mut router = Router::new()
		.route("/healthz", get(handlers::healthz))
		.route("/api/v1/signup", post(handlers::signup))
		.merge(admin);

	if allow_unauthenticated_sync {
		router = router.route("/api/v1/sync/public", post(handlers::sync));
	}

	router.with_state(state)
}
