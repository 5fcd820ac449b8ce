//! # gatecert Types
//!
//! Core types, traits, and errors shared across all gatecert crates.
//!
//! This crate provides:
//!
//! - Validated names for organizations, environments and vaults
//! - The credential, certificate and region data model
//! - The [`ManagementApi`] trait implemented by the remote management client
//! - Error types and result aliases
//!
//! ## Example
//!
//! ```
//! use gatecert_types::{EnvName, OrgName, VaultName, VaultTarget};
//!
//! let target = VaultTarget::new(
//!     OrgName::new("acme").unwrap(),
//!     EnvName::new("test").unwrap(),
//!     VaultName::new("microgateway").unwrap(),
//! );
//! assert_eq!(
//!     target.vault_path(),
//!     "/v1/organizations/acme/environments/test/vaults/microgateway"
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod identifiers;
pub mod enums;
pub mod models;
pub mod traits;
pub mod config;

// Re-export common types for convenience
pub use errors::{GatecertError, Result};
pub use identifiers::{EnvName, OrgName, VaultName, VaultTarget};
pub use enums::{LogLevel, RemoteErrorCode};
pub use models::{
    CertificateBundle, CredentialPair, ProvisionOptions, ProvisionedKeys, RegionInfo,
    RemoteResponse,
};
pub use config::Auth;
pub use traits::ManagementApi;
