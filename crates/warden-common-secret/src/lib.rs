// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret wrapper type that prevents accidental logging of sensitive values.
//!
//! [`SecretString`] holds values like the LDAP bind password or the admin API
//! token. `Debug` and `Display` render a redaction marker, the inner value is
//! zeroized on drop, and the raw string is only reachable through an explicit
//! [`SecretString::expose`] call at the point of use.

use zeroize::Zeroizing;

/// Marker rendered in place of the secret value.
const REDACTED: &str = "[REDACTED]";

/// A string whose value must not leak into logs or error messages.
#[derive(Clone)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
	/// Wrap a secret value.
	pub fn new(value: impl Into<String>) -> Self {
		Self(Zeroizing::new(value.into()))
	}

	/// Access the underlying value.
	///
	/// Call sites should pass the result directly to the consumer (bind call,
	/// header comparison) rather than storing it.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns true if the wrapped value is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl std::fmt::Debug for SecretString {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(REDACTED)
	}
}

impl std::fmt::Display for SecretString {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(REDACTED)
	}
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		String::deserialize(deserializer).map(Self::new)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn debug_is_redacted() {
		let secret = SecretString::new("hunter2");
		assert_eq!(format!("{secret:?}"), "[REDACTED]");
	}

	#[test]
	fn display_is_redacted() {
		let secret = SecretString::new("hunter2");
		assert_eq!(secret.to_string(), "[REDACTED]");
	}

	#[test]
	fn expose_returns_value() {
		let secret = SecretString::new("hunter2");
		assert_eq!(secret.expose(), "hunter2");
	}

	#[test]
	fn is_empty() {
		assert!(SecretString::new("").is_empty());
		assert!(!SecretString::new("x").is_empty());
	}

	#[cfg(feature = "serde")]
	#[test]
	fn deserializes_from_plain_string() {
		let secret: SecretString = serde_json::from_str("\"hunter2\"").unwrap();
		assert_eq!(secret.expose(), "hunter2");
	}
}
