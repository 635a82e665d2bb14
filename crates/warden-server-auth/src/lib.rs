// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account entity, roles, and credential hashing for Warden.
//!
//! This crate provides:
//! - [`Account`] - the local account entity owned by the account store
//! - [`AccountProfile`] - public view of an account (no credential hash)
//! - [`AccountId`] - UUID newtype for account identifiers
//! - [`Role`] - account role with its storage-label namespace prefix
//! - [`password`] - bcrypt hashing with a configurable work factor

pub mod account;
pub mod password;
pub mod types;

pub use account::{generate_storage_label, Account, AccountProfile, Role};
pub use password::{hash_password, verify_password, PasswordError};
pub use types::AccountId;
