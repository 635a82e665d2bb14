// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Warden server binary.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use warden_server::{create_router, AppState};
use warden_server_db::AccountRepository;
use warden_server_directory::LdapConnector;
use warden_server_provisioning::ProvisioningService;

/// Warden - directory synchronization and account provisioning server.
#[derive(Parser, Debug)]
#[command(name = "warden-server", about = "Warden provisioning server", version)]
struct Args {
	/// Path to a TOML config file (defaults to /etc/warden/server.toml)
	#[arg(long, env = "WARDEN_SERVER_CONFIG")]
	config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = match args.config {
		Some(path) => warden_server_config::load_config_with_file(path)?,
		None => warden_server_config::load_config()?,
	};

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		directory = %config.directory.endpoint,
		"starting warden-server"
	);

	if config.sync.allow_unauthenticated {
		tracing::warn!("unauthenticated synchronization endpoint is enabled");
	}
	if config.admin_token.is_none() {
		tracing::warn!("no admin token configured, admin endpoints are disabled");
	}

	let pool = warden_server_db::create_pool(&config.database.url).await?;
	warden_server_db::run_migrations(&pool).await?;

	let accounts = AccountRepository::new(pool);
	let connector = Arc::new(LdapConnector::new(config.directory.clone()));
	let provisioning = ProvisioningService::new(
		connector,
		accounts.clone(),
		config.provisioning.work_factor,
		config.provisioning.fallback_credential.clone(),
	);

	let state = AppState {
		provisioning,
		accounts,
	};

	let app = create_router(
		state,
		config.admin_token.clone(),
		config.sync.allow_unauthenticated,
	)
	.layer(TraceLayer::new_for_http())
	.layer(
		CorsLayer::new()
			.allow_origin(Any)
			.allow_methods(Any)
			.allow_headers(Any),
	);

	let addr = config.socket_addr();
	let listener = tokio::net::TcpListener::bind(&addr).await?;
	tracing::info!(%addr, "listening");

	axum::serve(listener, app).await?;

	Ok(())
}
