// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! LDAP directory client.
//!
//! [`LdapDirectory::connect`] establishes the connection and performs the
//! service bind; the bound handle is then reused for the bulk search and the
//! single-entry lookup. A handle is owned by one logical run at a time.

use async_trait::async_trait;
use ldap3::{Ldap, LdapConnAsync, LdapConnSettings, Scope, SearchEntry, SearchStream};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::DirectoryConfig;
use crate::error::DirectoryError;
use crate::escape::escape_filter_value;
use crate::normalize::{normalize_entry, normalize_lookup_entry};
use crate::record::DirectoryRecord;

/// LDAP result code for invalid credentials (RFC 4511).
const RC_INVALID_CREDENTIALS: u32 = 49;

/// A non-restartable stream of normalized directory records.
///
/// A new search must be issued for a new pass; a mid-stream protocol error
/// poisons the whole search. Entries rejected by the normalizer are counted,
/// not surfaced.
#[async_trait]
pub trait RecordStream: Send {
	/// Next normalized record, or `Ok(None)` once the stream completed
	/// cleanly. A mid-stream error is returned as
	/// [`DirectoryError::SearchFailed`] and the stream must not be polled
	/// again.
	async fn next_record(&mut self) -> Result<Option<DirectoryRecord>, DirectoryError>;

	/// Raw entries dropped by the normalizer so far.
	fn invalid_count(&self) -> u64;
}

/// Directory operations consumed by the provisioning layer.
#[async_trait]
pub trait Directory: Send + Sync {
	/// Streamed search over the configured user sub-tree.
	async fn search_users(&self) -> Result<Box<dyn RecordStream>, DirectoryError>;

	/// Look up a single user by email. `Ok(None)` when absent; absence is
	/// not an error at this layer.
	async fn find_user_by_email(
		&self,
		email: &str,
	) -> Result<Option<DirectoryRecord>, DirectoryError>;
}

/// Opens a fresh directory session for one logical run.
///
/// Sessions are not shared across runs; every synchronization or signup
/// binds its own session and drops it when done.
#[async_trait]
pub trait DirectoryConnector: Send + Sync {
	async fn connect(&self) -> Result<Box<dyn Directory>, DirectoryError>;
}

/// [`DirectoryConnector`] producing live LDAP sessions.
pub struct LdapConnector {
	config: DirectoryConfig,
}

impl LdapConnector {
	pub fn new(config: DirectoryConfig) -> Self {
		Self { config }
	}
}

#[async_trait]
impl DirectoryConnector for LdapConnector {
	async fn connect(&self) -> Result<Box<dyn Directory>, DirectoryError> {
		Ok(Box::new(LdapDirectory::connect(self.config.clone()).await?))
	}
}

/// Live LDAP-backed [`Directory`] implementation.
pub struct LdapDirectory {
	ldap: Ldap,
	config: DirectoryConfig,
}

impl LdapDirectory {
	/// Connect to the configured endpoint and perform the service bind.
	///
	/// The bind must complete before any search is issued; a single bound
	/// session is reused for both synchronization and single lookups within
	/// one run, avoiding a re-bind round trip per call.
	#[instrument(skip(config), fields(endpoint = %config.endpoint, bind_dn = %config.bind_dn))]
	pub async fn connect(config: DirectoryConfig) -> Result<Self, DirectoryError> {
		let settings = LdapConnSettings::new()
			.set_conn_timeout(Duration::from_secs(config.connect_timeout_secs));

		let (conn, mut ldap) = LdapConnAsync::with_settings(settings, &config.endpoint)
			.await
			.map_err(|e| {
				DirectoryError::Unavailable(format!(
					"failed to connect to {}: {e}",
					config.endpoint
				))
			})?;

		tokio::spawn(async move {
			if let Err(e) = conn.drive().await {
				warn!(error = %e, "LDAP connection driver error");
			}
		});

		debug!("performing service bind");

		let result = ldap
			.simple_bind(&config.bind_dn, config.bind_secret.expose())
			.await
			.map_err(|e| DirectoryError::Unavailable(format!("bind request failed: {e}")))?;

		if result.rc == RC_INVALID_CREDENTIALS {
			return Err(DirectoryError::AuthFailed(format!(
				"bind rejected for {}",
				config.bind_dn
			)));
		}
		if result.rc != 0 {
			return Err(DirectoryError::Unavailable(format!(
				"bind failed with code {}: {}",
				result.rc, result.text
			)));
		}

		info!("directory session established");

		Ok(Self { ldap, config })
	}
}

#[async_trait]
impl Directory for LdapDirectory {
	#[instrument(skip(self))]
	async fn search_users(&self) -> Result<Box<dyn RecordStream>, DirectoryError> {
		let mut ldap = self.ldap.clone();

		debug!(
			base_dn = %self.config.user_base_dn,
			filter = %self.config.object_filter,
			"starting streamed user search"
		);

		let stream = ldap
			.streaming_search(
				&self.config.user_base_dn,
				Scope::Subtree,
				&self.config.object_filter,
				DirectoryConfig::requested_attributes(),
			)
			.await
			.map_err(|e| DirectoryError::SearchFailed(format!("search request failed: {e}")))?;

		Ok(Box::new(NormalizingStream::new(LdapEntrySource {
			inner: stream,
			finished: false,
		})))
	}

	#[instrument(skip(self, email))]
	async fn find_user_by_email(
		&self,
		email: &str,
	) -> Result<Option<DirectoryRecord>, DirectoryError> {
		let mut ldap = self.ldap.clone();

		let filter = format!(
			"(&{}(mail={}))",
			self.config.object_filter,
			escape_filter_value(email)
		);

		let result = ldap
			.search(
				&self.config.user_base_dn,
				Scope::Subtree,
				&filter,
				DirectoryConfig::requested_attributes(),
			)
			.await
			.map_err(|e| DirectoryError::SearchFailed(format!("lookup request failed: {e}")))?;

		let (entries, _res) = result
			.success()
			.map_err(|e| DirectoryError::SearchFailed(format!("lookup failed: {e}")))?;

		Ok(entries
			.into_iter()
			.next()
			.map(SearchEntry::construct)
			.as_ref()
			.and_then(normalize_lookup_entry))
	}
}

/// A source of raw directory entries, before normalization.
///
/// Seam between the protocol stream and the normalizing layer; tests drive
/// [`NormalizingStream`] with scripted entries through it.
#[async_trait]
pub trait EntrySource: Send {
	/// Next raw entry, or `Ok(None)` once the search completed cleanly.
	async fn next_entry(&mut self) -> Result<Option<SearchEntry>, DirectoryError>;
}

/// [`RecordStream`] that normalizes raw entries as they arrive.
///
/// Entries the normalizer rejects are counted and skipped in place; the
/// stream keeps yielding subsequent records rather than ending early.
pub struct NormalizingStream<S> {
	source: S,
	invalid: u64,
}

impl<S: EntrySource> NormalizingStream<S> {
	pub fn new(source: S) -> Self {
		Self { source, invalid: 0 }
	}
}

#[async_trait]
impl<S: EntrySource> RecordStream for NormalizingStream<S> {
	async fn next_record(&mut self) -> Result<Option<DirectoryRecord>, DirectoryError> {
		loop {
			let Some(entry) = self.source.next_entry().await? else {
				debug!(invalid = self.invalid, "user search stream completed");
				return Ok(None);
			};

			match normalize_entry(&entry) {
				Some(record) => return Ok(Some(record)),
				None => {
					self.invalid += 1;
				}
			}
		}
	}

	fn invalid_count(&self) -> u64 {
		self.invalid
	}
}

/// [`EntrySource`] backed by the live LDAP search stream.
struct LdapEntrySource {
	inner: SearchStream<'static, String, Vec<String>>,
	finished: bool,
}

#[async_trait]
impl EntrySource for LdapEntrySource {
	async fn next_entry(&mut self) -> Result<Option<SearchEntry>, DirectoryError> {
		if self.finished {
			return Ok(None);
		}

		let entry = self
			.inner
			.next()
			.await
			.map_err(|e| DirectoryError::SearchFailed(format!("search stream error: {e}")))?;

		let Some(entry) = entry else {
			self.finished = true;

			// The terminal search result carries the protocol outcome;
			// a nonzero code fails the whole run even though earlier
			// entries were already yielded.
			let result = self.inner.finish().await;
			if result.rc != 0 {
				return Err(DirectoryError::SearchFailed(format!(
					"search ended with code {}: {}",
					result.rc, result.text
				)));
			}

			return Ok(None);
		};

		Ok(Some(SearchEntry::construct(entry)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::{HashMap, VecDeque};

	struct ScriptedEntries {
		items: VecDeque<Result<Option<SearchEntry>, DirectoryError>>,
	}

	impl ScriptedEntries {
		fn new(items: Vec<Result<Option<SearchEntry>, DirectoryError>>) -> Self {
			Self {
				items: items.into_iter().collect(),
			}
		}
	}

	#[async_trait]
	impl EntrySource for ScriptedEntries {
		async fn next_entry(&mut self) -> Result<Option<SearchEntry>, DirectoryError> {
			self.items.pop_front().unwrap_or(Ok(None))
		}
	}

	fn entry(attrs: Vec<(&str, Vec<&str>)>) -> SearchEntry {
		SearchEntry {
			dn: "uid=test,ou=people,dc=example,dc=com".to_string(),
			attrs: attrs
				.into_iter()
				.map(|(k, vs)| (k.to_string(), vs.into_iter().map(str::to_string).collect()))
				.collect(),
			bin_attrs: HashMap::new(),
		}
	}

	fn person(email: &str) -> SearchEntry {
		entry(vec![("mail", vec![email]), ("cn", vec!["Person"])])
	}

	async fn drain(stream: &mut dyn RecordStream) -> Vec<DirectoryRecord> {
		let mut records = Vec::new();
		while let Some(record) = stream.next_record().await.unwrap() {
			records.push(record);
		}
		records
	}

	#[tokio::test]
	async fn invalid_entries_are_skipped_in_place() {
		let mut stream = NormalizingStream::new(ScriptedEntries::new(vec![
			Ok(Some(person("a@x.com"))),
			Ok(Some(entry(vec![("cn", vec!["No Mail"])]))),
			Ok(Some(person("b@x.com"))),
			Ok(Some(entry(vec![("mail", vec!["no-cn@x.com"])]))),
			Ok(Some(person("c@x.com"))),
		]));

		let records = drain(&mut stream).await;
		let emails: Vec<_> = records.iter().map(|r| r.email.as_str()).collect();
		assert_eq!(emails, vec!["a@x.com", "b@x.com", "c@x.com"]);
		assert_eq!(stream.invalid_count(), 2);
	}

	#[tokio::test]
	async fn leading_invalid_entry_does_not_end_the_stream() {
		let mut stream = NormalizingStream::new(ScriptedEntries::new(vec![
			Ok(Some(entry(vec![("cn", vec!["No Mail"])]))),
			Ok(Some(person("a@x.com"))),
		]));

		let records = drain(&mut stream).await;
		assert_eq!(records.len(), 1);
		assert_eq!(records[0].email, "a@x.com");
		assert_eq!(stream.invalid_count(), 1);
	}

	#[tokio::test]
	async fn source_error_propagates() {
		let mut stream = NormalizingStream::new(ScriptedEntries::new(vec![
			Ok(Some(person("a@x.com"))),
			Err(DirectoryError::SearchFailed("connection reset".to_string())),
		]));

		assert!(stream.next_record().await.unwrap().is_some());
		assert!(matches!(
			stream.next_record().await,
			Err(DirectoryError::SearchFailed(_))
		));
	}
}
