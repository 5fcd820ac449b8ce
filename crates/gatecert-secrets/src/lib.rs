//! # gatecert Secrets
//!
//! Generation of the secret material gatecert provisions:
//! - Self-signed X.509 certificates and their private keys
//! - Random API key/secret pairs

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;

pub use types::*;
