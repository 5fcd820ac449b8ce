//! Provisioning workflows.
//!
//! Each operation validates its options, then runs a strictly ordered
//! sequence of steps. The first failing step aborts the rest and its error is
//! returned unchanged; nothing already done is rolled back. A cancellation
//! token is checked before every step and raced against the step in flight.

use crate::bootstrap::regionalize;
use crate::config::ProvisionConfig;
use gatecert_core::render_template;
use gatecert_secrets::{generate_credentials, CertificateGenerator};
use gatecert_types::{
    bail, Auth, EnvName, GatecertError, ManagementApi, OrgName, ProvisionOptions,
    ProvisionedKeys, RegionInfo, RemoteResponse, Result, VaultTarget,
};
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Vault entry holding the service private key.
pub const PRIVATE_KEY_ENTRY: &str = "private_key";

/// Vault entry holding the public certificate.
pub const PUBLIC_KEY_ENTRY: &str = "public_key";

/// Default base path of the auth proxy on a private-cloud runtime.
pub const DEFAULT_BASE_PATH: &str = "/edgemicro-auth";

/// Runs certificate and credential provisioning against a management API.
#[derive(Clone)]
pub struct Provisioner {
    api: Arc<dyn ManagementApi>,
    config: ProvisionConfig,
    generator: CertificateGenerator,
    cancel: CancellationToken,
}

impl Provisioner {
    /// Create a provisioner over the given management API.
    pub fn new(api: Arc<dyn ManagementApi>, config: ProvisionConfig) -> Self {
        Self {
            api,
            config,
            generator: CertificateGenerator::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Abort remaining steps once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Provisioning configuration in use.
    pub fn config(&self) -> &ProvisionConfig {
        &self.config
    }

    /// Generate a certificate and store it in the vault. Returns the public certificate.
    pub async fn install_cert(&self, options: &ProvisionOptions) -> Result<String> {
        let target = self.target(options)?;
        let auth = resolve_auth(options)?;
        let mgmt_uri = self.config.management_uri.clone();
        self.install(&mgmt_uri, &target, &auth, options.force).await
    }

    /// [`install_cert`](Self::install_cert) against the per-call management URL.
    pub async fn install_private_cert(&self, options: &ProvisionOptions) -> Result<String> {
        let target = self.target(options)?;
        let auth = resolve_auth(options)?;
        let mgmt_uri = required(&options.mgmt_url, "mgmt_url")?;
        self.install(mgmt_uri, &target, &auth, options.force).await
    }

    /// Delete the certificate vault. An absent vault counts as deleted.
    pub async fn delete_cert(&self, options: &ProvisionOptions) -> Result<()> {
        let target = self.target(options)?;
        let auth = resolve_auth(options)?;

        info!(vault = %target, "deleting vault");
        self.step("delete vault", self.api.delete_vault(&self.config.management_uri, &target, &auth))
            .await
    }

    /// List the vault entries. Returns the raw response body.
    pub async fn check_cert(&self, options: &ProvisionOptions) -> Result<String> {
        let target = self.target(options)?;
        let auth = resolve_auth(options)?;
        self.check(&self.config.management_uri, &target, &auth).await
    }

    /// [`check_cert`](Self::check_cert) against the per-call management URL.
    pub async fn check_private_cert(&self, options: &ProvisionOptions) -> Result<String> {
        let target = self.target(options)?;
        let auth = resolve_auth(options)?;
        let mgmt_uri = required(&options.mgmt_url, "mgmt_url")?;
        self.check(mgmt_uri, &target, &auth).await
    }

    /// Fetch the public key published by the auth proxy.
    pub async fn retrieve_public_key(&self, options: &ProvisionOptions) -> Result<String> {
        let (org, env) = require_identity(options)?;
        let url = self.config.public_key_url(org.as_str(), env.as_str());

        debug!(%url, "retrieving public key");
        self.step("retrieve public key", self.api.get_public_key(&url)).await
    }

    /// Fetch the public key from a private-cloud runtime.
    pub async fn retrieve_public_key_private(&self, options: &ProvisionOptions) -> Result<String> {
        require_identity(options)?;
        let runtime_url = required(&options.runtime_url, "runtime_url")?;
        let base_path = options.base_path.as_deref().unwrap_or(DEFAULT_BASE_PATH);
        let url = format!(
            "{}{}/publicKey",
            runtime_url.trim_end_matches('/'),
            base_path.trim_end_matches('/')
        );

        debug!(%url, "retrieving public key");
        self.step("retrieve public key", self.api.get_public_key(&url)).await
    }

    /// Generate, register and regionalize a new key/secret pair.
    pub async fn generate_keys(&self, options: &ProvisionOptions) -> Result<ProvisionedKeys> {
        let (org, env) = require_identity(options)?;
        let admin = resolve_auth(options)?;
        let (org, env) = (org.as_str(), env.as_str());

        let pair = self.step("generate credentials", async { generate_credentials() }).await?;

        let credential_url = render_template(&self.config.credential_url, org, env);
        info!(url = %credential_url, "registering credentials");
        let resp = self
            .step("register credentials", self.api.register_credential(&credential_url, &pair, &admin))
            .await?;
        require_accepted(resp)?;

        let region_url = render_template(&self.config.region_url, org, env);
        info!(url = %region_url, "looking up region");
        let key_auth = Auth::basic(&pair.key, &pair.secret);
        let resp = self
            .step("lookup region", self.api.lookup_region(&region_url, &key_auth))
            .await?;
        let host = regional_host(require_accepted(resp)?)?;

        let bootstrap_url = render_template(&self.config.bootstrap_url, org, env);
        let bootstrap = regionalize(&bootstrap_url, &host)?;
        debug!(%bootstrap, key_len = pair.key.len(), "credentials provisioned");

        Ok(ProvisionedKeys {
            bootstrap,
            key: pair.key,
            secret: pair.secret,
        })
    }

    async fn install(
        &self,
        mgmt_uri: &str,
        target: &VaultTarget,
        auth: &Auth,
        force: bool,
    ) -> Result<String> {
        let cert_options = &self.config.cert;
        let bundle = self
            .step("generate certificate", async { self.generator.generate(cert_options) })
            .await?;

        if force {
            info!(vault = %target, "deleting vault");
            self.step("delete vault", self.api.delete_vault(mgmt_uri, target, auth))
                .await?;
        }

        info!(vault = %target, auth = %auth.describe(), "creating vault");
        self.step("create vault", self.api.create_vault(mgmt_uri, target, auth))
            .await?;

        info!(vault = %target, "adding {}", PRIVATE_KEY_ENTRY);
        self.step(
            "add private key",
            self.api
                .add_vault_entry(mgmt_uri, target, PRIVATE_KEY_ENTRY, &bundle.service_key, auth),
        )
        .await?;

        info!(vault = %target, "adding {}", PUBLIC_KEY_ENTRY);
        self.step(
            "add public key",
            self.api
                .add_vault_entry(mgmt_uri, target, PUBLIC_KEY_ENTRY, &bundle.certificate, auth),
        )
        .await?;

        Ok(bundle.certificate)
    }

    async fn check(&self, mgmt_uri: &str, target: &VaultTarget, auth: &Auth) -> Result<String> {
        info!(vault = %target, "checking certificate");
        self.step("list vault entries", self.api.list_vault_entries(mgmt_uri, target, auth))
            .await
    }

    async fn step<T, F>(&self, name: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.cancel.is_cancelled() {
            warn!(step = name, "cancelled before start");
            return Err(GatecertError::Cancelled);
        }

        debug!(step = name, "starting");
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                warn!(step = name, "cancelled in flight");
                Err(GatecertError::Cancelled)
            }
            result = fut => result,
        }
    }

    fn target(&self, options: &ProvisionOptions) -> Result<VaultTarget> {
        let (org, env) = require_identity(options)?;
        Ok(VaultTarget::new(org, env, self.config.vault_name.clone()))
    }
}

/// Validate and parse the org and env options.
pub fn require_identity(options: &ProvisionOptions) -> Result<(OrgName, EnvName)> {
    let org = OrgName::new(required(&options.org, "org")?)?;
    let env = EnvName::new(required(&options.env, "env")?)?;
    Ok((org, env))
}

/// Pick the credentials for management calls: a bearer token when present,
/// otherwise username and password.
pub fn resolve_auth(options: &ProvisionOptions) -> Result<Auth> {
    if let Some(token) = options.token.as_deref().filter(|t| !t.is_empty()) {
        return Ok(Auth::Bearer(token.to_string()));
    }

    let username = required(&options.username, "username")?;
    let password = required(&options.password, "password")?;
    Ok(Auth::basic(username, password))
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => bail!(Validation, "{} is required", name),
    }
}

fn require_accepted(resp: RemoteResponse) -> Result<RemoteResponse> {
    if resp.is_accepted() {
        return Ok(resp);
    }
    Err(GatecertError::remote(resp.method, resp.url, resp.status, resp.body, None))
}

fn regional_host(resp: RemoteResponse) -> Result<String> {
    let info: RegionInfo = serde_json::from_str(&resp.body)
        .map_err(|e| GatecertError::RegionLookup(format!("{}: {}", resp.url, e)))?;

    match (info.region, info.host) {
        (Some(region), Some(host)) if !region.is_empty() && !host.is_empty() => {
            debug!(%region, %host, "region resolved");
            Ok(host)
        }
        _ => Err(GatecertError::RegionLookup(resp.body)),
    }
}
