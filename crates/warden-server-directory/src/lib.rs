// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! LDAP directory client and record normalizer for Warden.
//!
//! This crate owns the connection to the external directory service:
//! authenticated bind, streamed subtree search over the user population, and
//! single-entry lookup by email. Raw protocol shapes never leave this crate;
//! callers see [`DirectoryRecord`]s produced by the normalizer.
//!
//! The live client is behind the [`Directory`] trait so the provisioning
//! layer can be exercised against in-memory fakes.

pub mod client;
pub mod config;
pub mod error;
pub mod escape;
pub mod normalize;
pub mod record;

pub use client::{
	Directory, DirectoryConnector, EntrySource, LdapConnector, LdapDirectory, NormalizingStream,
	RecordStream,
};
pub use config::DirectoryConfig;
pub use error::DirectoryError;
pub use record::DirectoryRecord;

pub use ldap3::SearchEntry;
