// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use warden_server_db::AccountRepository;
use warden_server_provisioning::ProvisioningService;

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
	pub provisioning: ProvisioningService,
	pub accounts: AccountRepository,
}
