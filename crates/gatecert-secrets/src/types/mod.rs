//! Generated secret material.

pub mod x509;
pub mod credential;

pub use x509::{CertOptions, CertificateGenerator};
pub use credential::{generate_credentials, generate_credentials_with};
