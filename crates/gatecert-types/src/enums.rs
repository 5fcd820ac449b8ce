//! Common enumerations used throughout gatecert.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::errors::{GatecertError, Result};

/// Log level enumeration for the logging system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// No logging
    None,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Detailed trace messages
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::None => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl FromStr for LogLevel {
    type Err = GatecertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "NONE" => Ok(LogLevel::None),
            "ERROR" => Ok(LogLevel::Error),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            "TRACE" => Ok(LogLevel::Trace),
            _ => Err(GatecertError::Validation(format!("Invalid log level: {}", s))),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::None => write!(f, "NONE"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Trace => write!(f, "TRACE"),
        }
    }
}

/// Error codes reported by the management service's secure store.
///
/// The service returns a JSON body such as
/// `{"code": "com.apigee.secure-store.storekey.already.exists", "message": "..."}`.
/// Codes outside the known set are preserved verbatim in [`RemoteErrorCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RemoteErrorCode {
    /// A store with the requested name already exists
    StoreAlreadyExists,
    /// The requested store does not exist
    StoreDoesNotExist,
    /// The requested store entry does not exist
    StoreItemDoesNotExist,
    /// Any other code reported by the service
    Other(String),
}

impl RemoteErrorCode {
    /// Wire code for a store that already exists.
    pub const STORE_ALREADY_EXISTS: &'static str = "com.apigee.secure-store.storekey.already.exists";
    /// Wire code for a missing store.
    pub const STORE_DOES_NOT_EXIST: &'static str = "com.apigee.secure-store.securestore_does_not_exist";
    /// Wire code for a missing store entry.
    pub const STORE_ITEM_DOES_NOT_EXIST: &'static str = "com.apigee.secure-store.storeitem_does_not_exist";

    /// Parse a wire code.
    pub fn from_code(code: &str) -> Self {
        match code {
            Self::STORE_ALREADY_EXISTS => Self::StoreAlreadyExists,
            Self::STORE_DOES_NOT_EXIST => Self::StoreDoesNotExist,
            Self::STORE_ITEM_DOES_NOT_EXIST => Self::StoreItemDoesNotExist,
            other => Self::Other(other.to_string()),
        }
    }

    /// The wire representation of this code.
    pub fn as_str(&self) -> &str {
        match self {
            Self::StoreAlreadyExists => Self::STORE_ALREADY_EXISTS,
            Self::StoreDoesNotExist => Self::STORE_DOES_NOT_EXIST,
            Self::StoreItemDoesNotExist => Self::STORE_ITEM_DOES_NOT_EXIST,
            Self::Other(code) => code,
        }
    }

    /// Whether this code belongs to the enumerated set.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for RemoteErrorCode {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<RemoteErrorCode> for String {
    fn from(code: RemoteErrorCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for RemoteErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_code_parsing() {
        assert_eq!(
            RemoteErrorCode::from_code("com.apigee.secure-store.storekey.already.exists"),
            RemoteErrorCode::StoreAlreadyExists
        );
        assert_eq!(
            RemoteErrorCode::from_code("com.apigee.secure-store.securestore_does_not_exist"),
            RemoteErrorCode::StoreDoesNotExist
        );

        let other = RemoteErrorCode::from_code("keymanagement.service.invalid_credentials");
        assert!(!other.is_known());
        assert_eq!(other.as_str(), "keymanagement.service.invalid_credentials");
    }

    #[test]
    fn test_remote_code_serde() {
        let code: RemoteErrorCode =
            serde_json::from_str("\"com.apigee.secure-store.storeitem_does_not_exist\"").unwrap();
        assert_eq!(code, RemoteErrorCode::StoreItemDoesNotExist);
        assert_eq!(
            serde_json::to_string(&RemoteErrorCode::StoreAlreadyExists).unwrap(),
            "\"com.apigee.secure-store.storekey.already.exists\""
        );
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::Debug.as_filter(), "debug");
        assert!("loud".parse::<LogLevel>().is_err());
    }
}
