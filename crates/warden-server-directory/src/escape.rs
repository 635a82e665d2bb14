// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! LDAP filter value escaping.

/// Escape special characters in LDAP filter values (RFC 4515).
///
/// Caller-supplied values (the signup email) are interpolated into search
/// filters; escaping prevents filter injection through values like
/// `*)(objectClass=*`.
pub fn escape_filter_value(value: &str) -> String {
	value
		.replace('\\', "\\5c")
		.replace('*', "\\2a")
		.replace('(', "\\28")
		.replace(')', "\\29")
		.replace('\0', "\\00")
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn plain_values_pass_through() {
		assert_eq!(escape_filter_value("alice@example.com"), "alice@example.com");
	}

	#[test]
	fn metacharacters_are_escaped() {
		assert_eq!(escape_filter_value("a*b"), "a\\2ab");
		assert_eq!(escape_filter_value("(admin)"), "\\28admin\\29");
		assert_eq!(escape_filter_value("a\\b"), "a\\5cb");
		assert_eq!(escape_filter_value("a\0b"), "a\\00b");
	}

	#[test]
	fn injection_attempt_is_neutralized() {
		let escaped = escape_filter_value("*)(mail=*");
		assert_eq!(escaped, "\\2a\\29\\28mail=\\2a");
	}

	proptest! {
		#[test]
		fn escaped_output_has_no_raw_metacharacters(value in ".*") {
			let escaped = escape_filter_value(&value);
			prop_assert!(!escaped.contains('('));
			prop_assert!(!escaped.contains(')'));
			prop_assert!(!escaped.contains('*'));
			prop_assert!(!escaped.contains('\0'));
		}
	}
}
