//! Explicit configuration for the provisioning workflows.

use gatecert_core::{render_template, GatecertConfig};
use gatecert_secrets::CertOptions;
use gatecert_types::{Result, VaultName};

/// Everything the [`Provisioner`](crate::Provisioner) needs besides the per-call options.
///
/// Endpoint fields are templates containing `{org}` and `{env}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionConfig {
    /// Management API root
    pub management_uri: String,
    /// Auth proxy template; `/publicKey` is appended
    pub auth_uri: String,
    /// Credential registration endpoint template
    pub credential_url: String,
    /// Region lookup endpoint template
    pub region_url: String,
    /// Bootstrap endpoint template
    pub bootstrap_url: String,
    /// Vault holding the certificate
    pub vault_name: VaultName,
    /// Certificate generation options
    pub cert: CertOptions,
}

impl ProvisionConfig {
    /// Derive provisioning configuration from the loaded settings.
    pub fn from_settings(settings: &GatecertConfig) -> Result<Self> {
        Ok(Self {
            management_uri: settings.management_uri.clone(),
            auth_uri: settings.auth_uri.clone(),
            credential_url: settings.endpoint_template("credential"),
            region_url: settings.endpoint_template("region"),
            bootstrap_url: settings.endpoint_template("bootstrap"),
            vault_name: VaultName::new(&settings.vault_name)?,
            cert: CertOptions::default(),
        })
    }

    /// Public key URL of the auth proxy for an org/env.
    pub fn public_key_url(&self, org: &str, env: &str) -> String {
        format!(
            "{}/publicKey",
            render_template(&self.auth_uri, org, env).trim_end_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_settings() {
        let config = ProvisionConfig::from_settings(&GatecertConfig::default()).unwrap();

        assert_eq!(config.vault_name.as_str(), "microgateway");
        assert_eq!(
            config.credential_url,
            "https://edgemicroservices.apigee.net/edgemicro/credential/organization/{org}/environment/{env}"
        );
        assert_eq!(
            config.public_key_url("acme", "test"),
            "https://acme-test.apigee.net/edgemicro-auth/publicKey"
        );
        assert_eq!(config.cert.days, 1);
    }

    #[test]
    fn test_invalid_vault_name_rejected() {
        let settings = GatecertConfig {
            vault_name: "bad name".to_string(),
            ..Default::default()
        };
        assert!(ProvisionConfig::from_settings(&settings).is_err());
    }
}
