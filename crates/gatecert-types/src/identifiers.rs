//! Type-safe identifiers for organizations, environments and vaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::errors::{GatecertError, Result};

/// Check that a name can be used verbatim as a URL path segment.
fn is_valid_segment(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        && name != "."
        && name != ".."
}

macro_rules! segment_identifier {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new validated name.
            ///
            /// # Errors
            ///
            /// Returns a validation error if the name is empty or contains
            /// characters other than ASCII letters, digits, `-`, `_` and `.`.
            pub fn new(name: impl AsRef<str>) -> Result<Self> {
                let name = name.as_ref();
                if !is_valid_segment(name) {
                    return Err(GatecertError::Validation(format!(
                        "Invalid {} name '{}': must contain only letters, digits, '-', '_' or '.'",
                        $label, name
                    )));
                }
                Ok(Self(name.to_string()))
            }

            /// Get the name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = GatecertError;

            fn from_str(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = GatecertError;

            fn try_from(s: String) -> Result<Self> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(name: $name) -> Self {
                name.0
            }
        }
    };
}

segment_identifier!(
    /// A validated organization name.
    ///
    /// # Example
    ///
    /// ```
    /// use gatecert_types::OrgName;
    ///
    /// let org = OrgName::new("acme").unwrap();
    /// assert_eq!(org.as_str(), "acme");
    /// assert!(OrgName::new("acme/other").is_err());
    /// ```
    OrgName,
    "organization"
);

segment_identifier!(
    /// A validated environment name.
    EnvName,
    "environment"
);

segment_identifier!(
    /// A validated vault (secure store) name.
    VaultName,
    "vault"
);

/// The fully qualified location of a vault: `(organization, environment, vault)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VaultTarget {
    /// Owning organization
    pub org: OrgName,
    /// Owning environment
    pub env: EnvName,
    /// Vault name
    pub vault: VaultName,
}

impl VaultTarget {
    /// Create a new vault target.
    pub fn new(org: OrgName, env: EnvName, vault: VaultName) -> Self {
        Self { org, env, vault }
    }

    /// Path of the vault collection for this org/env, relative to the management URI.
    pub fn collection_path(&self) -> String {
        format!(
            "/v1/organizations/{}/environments/{}/vaults",
            self.org, self.env
        )
    }

    /// Path of this vault, relative to the management URI.
    pub fn vault_path(&self) -> String {
        format!("{}/{}", self.collection_path(), self.vault)
    }

    /// Path of this vault's entries, relative to the management URI.
    pub fn entries_path(&self) -> String {
        format!("{}/entries", self.vault_path())
    }
}

impl fmt::Display for VaultTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.org, self.env, self.vault)
    }
}
