// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Record normalizer: raw directory entries to [`DirectoryRecord`]s.
//!
//! Directory data quality issues must not halt synchronization. A malformed
//! entry (missing or empty `mail` or `cn`) is dropped with a warning and an
//! internal counter bump; it is never an error to the caller.

use ldap3::SearchEntry;
use tracing::warn;

use crate::record::DirectoryRecord;

const ATTR_MAIL: &str = "mail";
const ATTR_CN: &str = "cn";
const ATTR_USER_PASSWORD: &str = "userPassword";

/// Normalize one raw search entry for synchronization.
///
/// Returns `None` when the entry lacks a usable `mail` or `cn` value; the
/// caller counts the drop and continues.
pub fn normalize_entry(entry: &SearchEntry) -> Option<DirectoryRecord> {
	let record = normalize_lookup_entry(entry)?;

	if record.display_names.is_empty() {
		warn!(dn = %entry.dn, "dropping directory entry without cn attribute");
		return None;
	}

	Some(record)
}

/// Normalize one raw search entry for the single-lookup path.
///
/// Only `mail` is required here: a lookup caller supplies its own fallback
/// display name, so an entry without `cn` values still resolves (with an
/// empty `display_names`). Synchronization uses the stricter
/// [`normalize_entry`].
pub fn normalize_lookup_entry(entry: &SearchEntry) -> Option<DirectoryRecord> {
	let email = entry
		.attrs
		.get(ATTR_MAIL)
		.and_then(|values| values.iter().find(|v| !v.trim().is_empty()))
		.map(|v| v.trim().to_string());

	let Some(email) = email else {
		warn!(dn = %entry.dn, "dropping directory entry without mail attribute");
		return None;
	};

	let display_names: Vec<String> = entry
		.attrs
		.get(ATTR_CN)
		.map(|values| {
			values
				.iter()
				.map(|v| v.trim())
				.filter(|v| !v.is_empty())
				.map(str::to_string)
				.collect()
		})
		.unwrap_or_default();

	let credential = entry
		.attrs
		.get(ATTR_USER_PASSWORD)
		.and_then(|values| values.first())
		.filter(|v| !v.is_empty())
		.cloned();

	Some(DirectoryRecord {
		email,
		display_names,
		credential,
	})
}
