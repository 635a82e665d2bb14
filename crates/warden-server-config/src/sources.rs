// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: built-in defaults, TOML file, environment.

use std::path::PathBuf;

use tracing::debug;
use warden_common_secret::SecretString;

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{
	DatabaseConfigLayer, DirectoryConfigLayer, HttpConfigLayer, LoggingConfigLayer,
	ProvisioningConfigLayer, SyncConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	/// Source reading from the given path.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// Source reading from the standard system location.
	pub fn system() -> Self {
		Self::new("/etc/warden/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file absent, skipping");
			return Ok(ServerConfigLayer::default());
		}

		let raw = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
			path: self.path.display().to_string(),
			source,
		})?;

		Ok(toml::from_str(&raw)?)
	}
}

/// Environment variable configuration source (`WARDEN_SERVER_*`).
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		let mut layer = ServerConfigLayer::default();

		let http = HttpConfigLayer {
			host: env_string("WARDEN_SERVER_HTTP_HOST"),
			port: env_parsed("WARDEN_SERVER_HTTP_PORT")?,
		};
		if http.host.is_some() || http.port.is_some() {
			layer.http = Some(http);
		}

		if let Some(url) = env_string("WARDEN_SERVER_DATABASE_URL") {
			layer.database = Some(DatabaseConfigLayer { url: Some(url) });
		}

		if let Some(level) = env_string("WARDEN_SERVER_LOG_LEVEL") {
			layer.logging = Some(LoggingConfigLayer { level: Some(level) });
		}

		let directory = DirectoryConfigLayer {
			endpoint: env_string("WARDEN_SERVER_DIRECTORY_ENDPOINT"),
			bind_dn: env_string("WARDEN_SERVER_DIRECTORY_BIND_DN"),
			bind_secret: env_string("WARDEN_SERVER_DIRECTORY_BIND_SECRET").map(SecretString::new),
			user_base_dn: env_string("WARDEN_SERVER_DIRECTORY_USER_BASE_DN"),
			object_filter: env_string("WARDEN_SERVER_DIRECTORY_OBJECT_FILTER"),
			connect_timeout_secs: env_parsed("WARDEN_SERVER_DIRECTORY_CONNECT_TIMEOUT_SECS")?,
		};
		if directory.endpoint.is_some()
			|| directory.bind_dn.is_some()
			|| directory.bind_secret.is_some()
			|| directory.user_base_dn.is_some()
			|| directory.object_filter.is_some()
			|| directory.connect_timeout_secs.is_some()
		{
			layer.directory = Some(directory);
		}

		let provisioning = ProvisioningConfigLayer {
			work_factor: env_parsed("WARDEN_SERVER_PROVISIONING_WORK_FACTOR")?,
			fallback_credential: env_string("WARDEN_SERVER_PROVISIONING_FALLBACK_CREDENTIAL"),
		};
		if provisioning.work_factor.is_some() || provisioning.fallback_credential.is_some() {
			layer.provisioning = Some(provisioning);
		}

		if let Some(allow) = env_parsed("WARDEN_SERVER_SYNC_ALLOW_UNAUTHENTICATED")? {
			layer.sync = Some(SyncConfigLayer {
				allow_unauthenticated: Some(allow),
			});
		}

		Ok(layer)
	}
}

fn env_string(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError>
where
	T::Err: std::fmt::Display,
{
	match env_string(name) {
		None => Ok(None),
		Some(raw) => raw
			.parse()
			.map(Some)
			.map_err(|e| ConfigError::Invalid(format!("{name}: {e}"))),
	}
}
