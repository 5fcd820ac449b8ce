//! # Gatecert Provisioning
//!
//! Orchestrates the provisioning workflows on top of the generators and the
//! management API client:
//! - Certificate install, check and delete (hosted and private cloud)
//! - Public key retrieval from the auth proxy
//! - Key/secret generation, registration and bootstrap URL regionalization

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bootstrap;
pub mod config;
pub mod provisioner;

// Re-export main types
pub use bootstrap::regionalize;
pub use config::ProvisionConfig;
pub use provisioner::{require_identity, resolve_auth, Provisioner, PRIVATE_KEY_ENTRY, PUBLIC_KEY_ENTRY};

use gatecert_core::GatecertConfig;
use gatecert_services::{ManagementClient, ManagementConfig};
use gatecert_types::Result;
use std::sync::Arc;
use std::time::Duration;

/// Build a provisioner talking HTTP to the management service described by `settings`.
pub fn connect(settings: &GatecertConfig) -> Result<Provisioner> {
    let client = ManagementClient::new(ManagementConfig {
        timeout: Duration::from_secs(settings.request_timeout_secs),
        insecure: settings.insecure,
    })?;

    tracing::debug!(
        management_uri = %settings.management_uri,
        timeout_secs = settings.request_timeout_secs,
        "management client ready"
    );

    Ok(Provisioner::new(
        Arc::new(client),
        ProvisionConfig::from_settings(settings)?,
    ))
}
