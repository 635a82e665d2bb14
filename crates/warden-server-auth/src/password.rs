// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bcrypt credential hashing with a configurable work factor.
//!
//! The work factor (bcrypt cost) comes from configuration so operators can
//! tune hashing cost without a rebuild. Tests use [`MIN_WORK_FACTOR`] to stay
//! fast; production deployments should use [`DEFAULT_WORK_FACTOR`] or higher.

use tracing::instrument;

/// Minimum cost accepted by bcrypt. Only suitable for tests.
pub const MIN_WORK_FACTOR: u32 = 4;

/// Default bcrypt cost for production deployments.
pub const DEFAULT_WORK_FACTOR: u32 = 12;

/// Errors from the credential-hashing collaborator.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
	#[error("hashing failed: {0}")]
	Hash(#[from] bcrypt::BcryptError),
}

/// Hash a plaintext credential at the given work factor.
#[instrument(skip(plaintext))]
pub fn hash_password(plaintext: &str, work_factor: u32) -> Result<String, PasswordError> {
	Ok(bcrypt::hash(plaintext, work_factor)?)
}

/// Verify a plaintext credential against a stored hash.
#[instrument(skip(plaintext, hash))]
pub fn verify_password(plaintext: &str, hash: &str) -> Result<bool, PasswordError> {
	Ok(bcrypt::verify(plaintext, hash)?)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hash_then_verify_round_trip() {
		let hash = hash_password("correct horse", MIN_WORK_FACTOR).unwrap();
		assert!(verify_password("correct horse", &hash).unwrap());
		assert!(!verify_password("battery staple", &hash).unwrap());
	}

	#[test]
	fn hashes_are_salted() {
		let a = hash_password("secret", MIN_WORK_FACTOR).unwrap();
		let b = hash_password("secret", MIN_WORK_FACTOR).unwrap();
		assert_ne!(a, b);
	}

	#[test]
	fn hash_embeds_work_factor() {
		let hash = hash_password("secret", MIN_WORK_FACTOR).unwrap();
		// bcrypt encodes the cost in the hash prefix, e.g. "$2b$04$".
		assert!(hash.contains("$04$"));
	}
}
