// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Canonical identity record extracted from one directory entry.

/// Identity data for one directory entry, produced by the normalizer.
///
/// Records are ephemeral: constructed fresh from the search stream on every
/// synchronization run and discarded after reconciliation. A record always
/// has a non-empty email and at least one display name; entries that cannot
/// satisfy that are dropped before they reach the reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRecord {
	/// Directory-side identity key; unique within the directory.
	pub email: String,

	/// Name values, in directory order. The first is canonical.
	pub display_names: Vec<String>,

	/// Directory-held credential value, if the entry exposes one.
	/// Absent means the fallback credential is used at provisioning time.
	pub credential: Option<String>,
}

impl DirectoryRecord {
	/// Canonical display name (first `cn` value).
	pub fn display_name(&self) -> &str {
		// Invariant: display_names is non-empty; the normalizer drops
		// entries without a cn value.
		self.display_names.first().map(String::as_str).unwrap_or("")
	}
}
