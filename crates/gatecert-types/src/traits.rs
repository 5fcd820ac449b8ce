//! Core trait definitions for gatecert abstractions.

use async_trait::async_trait;
use crate::config::Auth;
use crate::errors::Result;
use crate::identifiers::VaultTarget;
use crate::models::{CredentialPair, RemoteResponse};

/// The remote management service.
///
/// Every method is a single remote call. Implementations run each response
/// through error translation, so an `Ok` never carries a status >= 400.
#[async_trait]
pub trait ManagementApi: Send + Sync {
    /// Fetch a public key from `url` (unauthenticated).
    async fn get_public_key(&self, url: &str) -> Result<String>;

    /// List the entries of a vault, returning the raw response body.
    async fn list_vault_entries(
        &self,
        mgmt_uri: &str,
        target: &VaultTarget,
        auth: &Auth,
    ) -> Result<String>;

    /// Create a vault.
    ///
    /// Fails with `VaultAlreadyExists` if the service reports the store exists.
    async fn create_vault(&self, mgmt_uri: &str, target: &VaultTarget, auth: &Auth) -> Result<()>;

    /// Delete a vault. Deleting an absent vault succeeds.
    async fn delete_vault(&self, mgmt_uri: &str, target: &VaultTarget, auth: &Auth) -> Result<()>;

    /// Add a name/value entry to a vault.
    async fn add_vault_entry(
        &self,
        mgmt_uri: &str,
        target: &VaultTarget,
        name: &str,
        value: &str,
        auth: &Auth,
    ) -> Result<()>;

    /// Register a key/secret pair with the credential endpoint.
    async fn register_credential(
        &self,
        url: &str,
        credentials: &CredentialPair,
        auth: &Auth,
    ) -> Result<RemoteResponse>;

    /// Query the region lookup endpoint.
    async fn lookup_region(&self, url: &str, auth: &Auth) -> Result<RemoteResponse>;
}
