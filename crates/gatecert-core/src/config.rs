//! Configuration management for gatecert.
//!
//! Configuration values are resolved in this priority order:
//! 1. Environment variables (`GATECERT_*`)
//! 2. Programmatically set values (command-line overrides)
//! 3. Values loaded from the YAML config file
//! 4. Default values
//!
//! ## Example
//!
//! ```no_run
//! use gatecert_core::config::{Config, GatecertConfig};
//!
//! let mut config = Config::load("~/.gatecert/config.yml")?;
//! config.set("vault_name", "edge-vault")?;
//!
//! let settings = GatecertConfig::from_config(&config)?;
//! assert_eq!(settings.vault_name, "edge-vault");
//! # Ok::<(), gatecert_types::GatecertError>(())
//! ```

use crate::util::{data, expand_path};
use gatecert_types::config::LogConfig;
use gatecert_types::{GatecertError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variables that override string settings, with the key they set.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("GATECERT_MANAGEMENT_URI", "management_uri"),
    ("GATECERT_AUTH_URI", "auth_uri"),
    ("GATECERT_BASE_URI", "base_uri"),
    ("GATECERT_VAULT_NAME", "vault_name"),
];

/// Environment variable overriding the per-request timeout, in seconds.
const ENV_TIMEOUT: &str = "GATECERT_REQUEST_TIMEOUT";

/// Configuration layer priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigLayer {
    /// Default values
    Default = 0,
    /// Values loaded from file
    Loaded = 1,
    /// Values set programmatically
    Set = 2,
    /// Values from environment variables
    Environment = 3,
}

impl ConfigLayer {
    const LOWEST_FIRST: [ConfigLayer; 4] = [
        ConfigLayer::Default,
        ConfigLayer::Loaded,
        ConfigLayer::Set,
        ConfigLayer::Environment,
    ];
}

/// Layered configuration store.
///
/// This is the low-level configuration type; [`GatecertConfig`] is the typed
/// view the rest of the tool consumes.
#[derive(Clone, Debug)]
pub struct Config {
    layers: HashMap<ConfigLayer, Value>,
    file_path: Option<PathBuf>,
}

impl Config {
    /// An empty configuration holding only the defaults.
    pub fn defaults() -> Result<Self> {
        let mut layers = HashMap::new();
        layers.insert(ConfigLayer::Default, serde_json::to_value(GatecertConfig::default())?);

        Ok(Self {
            layers,
            file_path: None,
        })
    }

    /// Load configuration from a YAML file, then apply environment overrides.
    ///
    /// A missing file is not an error; the defaults are used instead.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = expand_path(path);
        let mut config = Self::defaults()?;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| GatecertError::Config(format!("Failed to read config file: {}", e)))?;

            let value = data::load_yaml(&content)
                .map_err(|e| GatecertError::Config(format!("Failed to parse config: {}", e)))?;

            // An empty file parses as null
            if !value.is_null() {
                config.layers.insert(ConfigLayer::Loaded, value);
            }
            tracing::debug!(path = %path.display(), "loaded configuration file");
        } else {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
        }

        config.file_path = Some(path);
        config.apply_env(std::env::vars())?;
        Ok(config)
    }

    /// Populate the environment layer from `(name, value)` pairs.
    pub fn apply_env<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut layer = Value::Object(Default::default());

        for (name, value) in vars {
            if let Some((_, key)) = ENV_OVERRIDES.iter().find(|(var, _)| *var == name) {
                data::set_path(&mut layer, key, Value::String(value))?;
            } else if name == ENV_TIMEOUT {
                let secs: u64 = value.parse().map_err(|_| {
                    GatecertError::Config(format!("{} must be a number of seconds, got '{}'", ENV_TIMEOUT, value))
                })?;
                data::set_path(&mut layer, "request_timeout_secs", Value::from(secs))?;
            }
        }

        self.layers.insert(ConfigLayer::Environment, layer);
        Ok(())
    }

    /// Get a configuration value by dotted key, respecting layer priority.
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        for layer in ConfigLayer::LOWEST_FIRST.iter().rev() {
            if let Some(value) = self.layers.get(layer).and_then(|d| data::get_path(d, key)) {
                if let Ok(typed_value) = serde_json::from_value(value.clone()) {
                    return Some(typed_value);
                }
            }
        }

        None
    }

    /// Set a configuration value programmatically.
    pub fn set(&mut self, key: &str, value: impl Serialize) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| GatecertError::Config(format!("Failed to serialize value: {}", e)))?;

        let set_layer = self
            .layers
            .entry(ConfigLayer::Set)
            .or_insert(Value::Object(Default::default()));

        data::set_path(set_layer, key, value)
    }

    /// The file this configuration was loaded from, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Merge all layers, highest priority last.
    fn merged_data(&self) -> Value {
        ConfigLayer::LOWEST_FIRST
            .iter()
            .filter_map(|layer| self.layers.get(layer))
            .fold(Value::Object(Default::default()), |merged, layer| {
                data::deep_merge(merged, layer.clone())
            })
    }
}

/// Typed gatecert settings.
///
/// URL templates use `{org}` and `{env}` placeholders; `base_uri` additionally
/// takes `{api}`, which is replaced by `credential`, `region` or `bootstrap` to
/// derive the service endpoints that are not configured explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatecertConfig {
    /// Management API root, e.g. `https://api.enterprise.apigee.com`
    pub management_uri: String,
    /// Auth proxy template serving the public key
    pub auth_uri: String,
    /// Template for the edge micro service endpoints
    pub base_uri: String,
    /// Explicit credential registration endpoint template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_url: Option<String>,
    /// Explicit region lookup endpoint template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_url: Option<String>,
    /// Explicit bootstrap endpoint template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bootstrap_url: Option<String>,
    /// Name of the vault holding the certificate
    pub vault_name: String,
    /// Printed above the bootstrap URL
    pub bootstrap_message: String,
    /// Printed above the generated key/secret
    pub key_secret_message: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Skip TLS verification of the management service
    pub insecure: bool,
    /// Logging settings
    pub log: LogConfig,
}

impl Default for GatecertConfig {
    fn default() -> Self {
        Self {
            management_uri: "https://api.enterprise.apigee.com".to_string(),
            auth_uri: "https://{org}-{env}.apigee.net/edgemicro-auth".to_string(),
            base_uri: "https://edgemicroservices.apigee.net/edgemicro/{api}/organization/{org}/environment/{env}"
                .to_string(),
            credential_url: None,
            region_url: None,
            bootstrap_url: None,
            vault_name: "microgateway".to_string(),
            bootstrap_message: "Please copy the following property to the edge micro agent config".to_string(),
            key_secret_message: "The following credentials are required to start edge micro".to_string(),
            request_timeout_secs: 30,
            insecure: false,
            log: LogConfig::default(),
        }
    }
}

impl GatecertConfig {
    /// Load settings from a file (default `~/.gatecert/config.yml`) plus environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
        Self::from_config(&Config::load(path)?)
    }

    /// Build typed settings from a layered configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let settings: GatecertConfig = serde_json::from_value(config.merged_data())
            .map_err(|e| GatecertError::Config(format!("Failed to parse config: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// The default configuration file location.
    pub fn default_path() -> PathBuf {
        PathBuf::from("~/.gatecert/config.yml")
    }

    /// Template for one of the edge micro service endpoints.
    pub fn endpoint_template(&self, api: &str) -> String {
        let explicit = match api {
            "credential" => self.credential_url.as_ref(),
            "region" => self.region_url.as_ref(),
            "bootstrap" => self.bootstrap_url.as_ref(),
            _ => None,
        };

        explicit
            .cloned()
            .unwrap_or_else(|| self.base_uri.replace("{api}", api))
    }

    fn validate(&self) -> Result<()> {
        if self.management_uri.trim().is_empty() {
            return Err(GatecertError::Config("management_uri cannot be empty".to_string()));
        }
        if self.vault_name.trim().is_empty() {
            return Err(GatecertError::Config("vault_name cannot be empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(GatecertError::Config("request_timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}

/// Substitute `{org}` and `{env}` in a URL template.
pub fn render_template(template: &str, org: &str, env: &str) -> String {
    template.replace("{org}", org).replace("{env}", env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_layers() {
        let mut config = Config::defaults().unwrap();
        config.layers.insert(ConfigLayer::Loaded, serde_json::json!({"vault_name": "loaded"}));

        let value: String = config.get("vault_name").unwrap();
        assert_eq!(value, "loaded");

        config.set("vault_name", "set").unwrap();
        let value: String = config.get("vault_name").unwrap();
        assert_eq!(value, "set");

        config
            .apply_env(vec![("GATECERT_VAULT_NAME".to_string(), "from-env".to_string())])
            .unwrap();
        let value: String = config.get("vault_name").unwrap();
        assert_eq!(value, "from-env");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "management_uri: https://mgmt.example.com").unwrap();
        writeln!(file, "request_timeout_secs: 5").unwrap();
        writeln!(file, "log:").unwrap();
        writeln!(file, "  level: DEBUG").unwrap();

        let mut config = Config::load(file.path()).unwrap();
        // Ignore whatever the test process environment carries
        config.apply_env(Vec::new()).unwrap();

        let settings = GatecertConfig::from_config(&config).unwrap();
        assert_eq!(settings.management_uri, "https://mgmt.example.com");
        assert_eq!(settings.request_timeout_secs, 5);
        assert_eq!(settings.log.level, gatecert_types::LogLevel::Debug);
        assert_eq!(settings.vault_name, "microgateway");
        assert_eq!(config.file_path(), Some(file.path()));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::load(dir.path().join("absent.yml")).unwrap();
        config.apply_env(Vec::new()).unwrap();

        let settings = GatecertConfig::from_config(&config).unwrap();
        assert_eq!(settings, GatecertConfig::default());
    }

    #[test]
    fn test_env_timeout_must_be_numeric() {
        let mut config = Config::defaults().unwrap();
        let err = config
            .apply_env(vec![(ENV_TIMEOUT.to_string(), "soon".to_string())])
            .unwrap_err();
        assert!(matches!(err, GatecertError::Config(_)));

        config
            .apply_env(vec![(ENV_TIMEOUT.to_string(), "12".to_string())])
            .unwrap();
        assert_eq!(config.get::<u64>("request_timeout_secs"), Some(12));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = Config::defaults().unwrap();
        config.set("request_timeout_secs", 0).unwrap();
        assert!(GatecertConfig::from_config(&config).is_err());
    }

    #[test]
    fn test_endpoint_templates() {
        let mut settings = GatecertConfig::default();
        assert_eq!(
            settings.endpoint_template("region"),
            "https://edgemicroservices.apigee.net/edgemicro/region/organization/{org}/environment/{env}"
        );

        settings.bootstrap_url = Some("https://mgmt.example.com/bootstrap/{org}/{env}".to_string());
        assert_eq!(
            render_template(&settings.endpoint_template("bootstrap"), "acme", "test"),
            "https://mgmt.example.com/bootstrap/acme/test"
        );
    }
}
