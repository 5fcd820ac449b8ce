//! Error types for gatecert operations.

use crate::enums::RemoteErrorCode;
use thiserror::Error;

/// The main error type for gatecert operations.
///
/// Remote failures keep enough context (method, URL, status, body) for the
/// CLI to print a useful diagnostic, and carry the structured error code the
/// management service reported, if any.
#[derive(Error, Debug)]
pub enum GatecertError {
    /// A required option was missing or malformed. Raised before any network call.
    #[error("{0}")]
    Validation(String),

    /// Network-level failure: the request produced no response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The management service answered with an HTTP status >= 400.
    #[error("cannot {method} {url} ({status})")]
    Remote {
        /// HTTP method of the failed request
        method: String,
        /// Request URL
        url: String,
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
        /// Structured error code parsed from the body, if present
        code: Option<RemoteErrorCode>,
    },

    /// The vault already exists and `force` was not requested.
    #[error("Store already exists. Use --force to replace keys.")]
    VaultAlreadyExists {
        /// Name of the existing vault
        vault: String,
    },

    /// The region lookup succeeded but its response was unusable.
    #[error("Invalid response from region api: {0}")]
    RegionLookup(String),

    /// Certificate or key generation failed.
    #[error("Certificate generation failed: {0}")]
    CertGeneration(String),

    /// The secure random source failed.
    #[error("Entropy source failed: {0}")]
    Entropy(String),

    /// The operation was cancelled before it completed.
    #[error("Operation cancelled")]
    Cancelled,

    /// Configuration-related error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl GatecertError {
    /// Build a remote error for a failed HTTP exchange.
    pub fn remote(
        method: impl Into<String>,
        url: impl Into<String>,
        status: u16,
        body: impl Into<String>,
        code: Option<RemoteErrorCode>,
    ) -> Self {
        Self::Remote {
            method: method.into(),
            url: url.into(),
            status,
            body: body.into(),
            code,
        }
    }

    /// Check whether this is a remote error carrying the given error code.
    pub fn has_remote_code(&self, expected: &RemoteErrorCode) -> bool {
        matches!(self, Self::Remote { code: Some(code), .. } if code == expected)
    }

    /// HTTP status of a remote error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body of a remote error.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Remote { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// A specialized Result type for gatecert operations.
pub type Result<T> = std::result::Result<T, GatecertError>;

/// Helper macro to bail out with a GatecertError
///
/// This is used for expected error conditions.
///
/// # Example
///
/// ```ignore
/// if options.org.is_none() {
///     bail!(Validation, "org is required");
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($variant:ident, $msg:expr) => {
        return Err($crate::GatecertError::$variant($msg.to_string()))
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::GatecertError::$variant(format!($fmt, $($arg)*)))
    };
    ($msg:expr) => {
        return Err($crate::GatecertError::Other($msg.to_string()))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display() {
        let err = GatecertError::remote(
            "POST",
            "https://mgmt.example.com/v1/organizations/acme/environments/test/vaults",
            409,
            "{}",
            Some(RemoteErrorCode::StoreAlreadyExists),
        );
        assert_eq!(
            err.to_string(),
            "cannot POST https://mgmt.example.com/v1/organizations/acme/environments/test/vaults (409)"
        );
        assert_eq!(err.status(), Some(409));
        assert!(err.has_remote_code(&RemoteErrorCode::StoreAlreadyExists));
        assert!(!err.has_remote_code(&RemoteErrorCode::StoreDoesNotExist));
    }

    #[test]
    fn test_has_remote_code_ignores_other_variants() {
        let err = GatecertError::Transport("connection refused".to_string());
        assert!(!err.has_remote_code(&RemoteErrorCode::StoreDoesNotExist));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_vault_exists_mentions_force() {
        let err = GatecertError::VaultAlreadyExists { vault: "microgateway".to_string() };
        assert!(err.to_string().contains("--force"));
    }

    fn validate(org: Option<&str>) -> Result<()> {
        if org.is_none() {
            bail!(Validation, "org is required");
        }
        Ok(())
    }

    #[test]
    fn test_bail_macro() {
        let err = validate(None).unwrap_err();
        assert!(matches!(err, GatecertError::Validation(ref m) if m == "org is required"));
        assert!(validate(Some("acme")).is_ok());
    }
}
