//! Data carried between the generators, the management client and the orchestrator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A freshly generated API key/secret pair.
///
/// Both halves are 64-character lowercase hexadecimal digests.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    /// Public key half
    pub key: String,
    /// Secret half
    pub secret: String,
}

// Keeps the secret out of logs and panic messages.
impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// A self-signed certificate and the private key it was issued for.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateBundle {
    /// PEM-encoded certificate
    pub certificate: String,
    /// PEM-encoded private key
    pub service_key: String,
}

impl fmt::Debug for CertificateBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateBundle")
            .field("certificate", &self.certificate)
            .field("service_key", &"<redacted>")
            .finish()
    }
}

/// Body of the region lookup endpoint.
///
/// Both fields are optional on the wire; the orchestrator rejects responses
/// that lack either of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionInfo {
    /// Region identifier (e.g. `us`)
    #[serde(default)]
    pub region: Option<String>,
    /// Regional host name (e.g. `api.us.example.com`)
    #[serde(default)]
    pub host: Option<String>,
}

/// Result of credential provisioning.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionedKeys {
    /// Regionalized bootstrap URL
    pub bootstrap: String,
    /// Uploaded key
    pub key: String,
    /// Uploaded secret
    pub secret: String,
}

impl fmt::Debug for ProvisionedKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisionedKeys")
            .field("bootstrap", &self.bootstrap)
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// A completed HTTP exchange that passed error translation (status < 400).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteResponse {
    /// HTTP method
    pub method: String,
    /// Request URL
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl RemoteResponse {
    /// Whether the status is one the provisioning endpoints accept (200..=202).
    pub fn is_accepted(&self) -> bool {
        (200..=202).contains(&self.status)
    }
}

/// Options for one provisioning call, assembled by the CLI.
///
/// Identity fields are optional here; the orchestrator validates them before
/// any network call is made.
#[derive(Clone, Default)]
pub struct ProvisionOptions {
    /// Organization name
    pub org: Option<String>,
    /// Environment name
    pub env: Option<String>,
    /// Organization admin username
    pub username: Option<String>,
    /// Organization admin password
    pub password: Option<String>,
    /// OAuth bearer token, used instead of username/password when present
    pub token: Option<String>,
    /// Delete an existing vault before creating it
    pub force: bool,
    /// Management URL for private-cloud installs
    pub mgmt_url: Option<String>,
    /// Runtime URL for private-cloud public key retrieval
    pub runtime_url: Option<String>,
    /// Base path of the auth proxy on the runtime
    pub base_path: Option<String>,
}

impl fmt::Debug for ProvisionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisionOptions")
            .field("org", &self.org)
            .field("env", &self.env)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("force", &self.force)
            .field("mgmt_url", &self.mgmt_url)
            .field("runtime_url", &self.runtime_url)
            .field("base_path", &self.base_path)
            .finish()
    }
}
