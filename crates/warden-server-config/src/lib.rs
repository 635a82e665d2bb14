// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for Warden server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`WARDEN_SERVER_*`)
//!
//! # Usage
//!
//! ```ignore
//! use warden_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Server listening on {}:{}", config.http.host, config.http.port);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};
use warden_common_secret::SecretString;
use warden_server_directory::DirectoryConfig;

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub database: DatabaseConfig,
	pub logging: LoggingConfig,
	pub directory: DirectoryConfig,
	pub provisioning: ProvisioningConfig,
	pub sync: SyncConfig,
	/// Bearer token guarding the administrative endpoints. `None` disables
	/// them entirely rather than leaving them open.
	pub admin_token: Option<SecretString>,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`WARDEN_SERVER_*`)
/// 2. Config file (`/etc/warden/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let database = layer.database.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();
	let directory = layer.directory.unwrap_or_default().finalize()?;
	let provisioning = layer.provisioning.unwrap_or_default().finalize();
	let sync = layer.sync.unwrap_or_default().finalize();

	let admin_token = std::env::var("WARDEN_SERVER_ADMIN_TOKEN")
		.ok()
		.filter(|v| !v.is_empty())
		.map(SecretString::new);

	info!(
		host = %http.host,
		port = http.port,
		database = %database.url,
		directory_endpoint = %directory.endpoint,
		sync_allow_unauthenticated = sync.allow_unauthenticated,
		admin_token_configured = admin_token.is_some(),
		"configuration loaded"
	);

	Ok(ServerConfig {
		http,
		database,
		logging,
		directory,
		provisioning,
		sync,
		admin_token,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	fn write_config(contents: &str) -> tempfile::NamedTempFile {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(contents.as_bytes()).unwrap();
		file
	}

	const MINIMAL_DIRECTORY: &str = r#"
		[directory]
		endpoint = "ldap://localhost:389"
		bind_dn = "cn=service,dc=example,dc=com"
		bind_secret = "secret"
		user_base_dn = "ou=people,dc=example,dc=com"
	"#;

	#[test]
	fn minimal_file_resolves_with_defaults() {
		let file = write_config(MINIMAL_DIRECTORY);
		let config = load_config_with_file(file.path()).unwrap();

		assert_eq!(config.http.port, 8080);
		assert_eq!(config.database.url, "sqlite:./warden.db");
		assert_eq!(config.provisioning.work_factor, 12);
		assert!(config.sync.allow_unauthenticated);
		assert_eq!(config.directory.bind_dn, "cn=service,dc=example,dc=com");
	}

	#[test]
	fn file_overrides_defaults() {
		let file = write_config(&format!(
			"{MINIMAL_DIRECTORY}\n[http]\nport = 9999\n\n[provisioning]\nwork_factor = 6\n"
		));
		let config = load_config_with_file(file.path()).unwrap();

		assert_eq!(config.http.port, 9999);
		assert_eq!(config.provisioning.work_factor, 6);
	}

	#[test]
	fn missing_directory_section_is_invalid() {
		let file = write_config("[http]\nport = 9000\n");
		assert!(matches!(
			load_config_with_file(file.path()),
			Err(ConfigError::Invalid(_))
		));
	}
}
