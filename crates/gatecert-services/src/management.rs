//! Management API client implementation.

use crate::translate::translate;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use gatecert_types::traits::ManagementApi;
use gatecert_types::{
    Auth, CredentialPair, GatecertError, RemoteErrorCode, RemoteResponse, Result, VaultTarget,
};
use reqwest::{header, Client, Method};
use std::time::Duration;
use url::Url;

/// Management client configuration.
#[derive(Debug, Clone)]
pub struct ManagementConfig {
    /// Timeout applied to each request
    pub timeout: Duration,
    /// Skip TLS verification
    pub insecure: bool,
}

impl Default for ManagementConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            insecure: false,
        }
    }
}

/// HTTP client for the remote management service.
#[derive(Debug, Clone)]
pub struct ManagementClient {
    client: Client,
}

impl ManagementClient {
    /// Create a new management client.
    pub fn new(config: ManagementConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("gatecert/{}", env!("CARGO_PKG_VERSION")));

        if config.insecure {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| GatecertError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn auth_header(auth: &Auth) -> String {
        match auth {
            Auth::Basic { username, password } => format!(
                "Basic {}",
                general_purpose::STANDARD.encode(format!("{}:{}", username, password))
            ),
            Auth::Bearer(token) => format!("Bearer {}", token),
        }
    }

    /// Send one request and translate the outcome.
    async fn send(
        &self,
        method: Method,
        url: &str,
        auth: Option<&Auth>,
        body: Option<serde_json::Value>,
    ) -> Result<RemoteResponse> {
        let parsed = Url::parse(url)
            .map_err(|e| GatecertError::Config(format!("Invalid URL '{}': {}", url, e)))?;

        tracing::debug!(
            %method,
            %url,
            auth = auth.map(Auth::describe).unwrap_or_else(|| "none".to_string()),
            "sending request"
        );

        let mut req = self
            .client
            .request(method.clone(), parsed)
            .header(header::ACCEPT, "application/json");

        if let Some(auth) = auth {
            req = req.header(header::AUTHORIZATION, Self::auth_header(auth));
        }

        if let Some(body) = body {
            req = req.json(&body);
        }

        let resp = translate(&method, url, req.send().await).await?;
        tracing::debug!(%method, %url, status = resp.status, "request completed");
        Ok(resp)
    }
}

fn join(mgmt_uri: &str, path: &str) -> String {
    format!("{}{}", mgmt_uri.trim_end_matches('/'), path)
}

#[async_trait]
impl ManagementApi for ManagementClient {
    async fn get_public_key(&self, url: &str) -> Result<String> {
        let resp = self.send(Method::GET, url, None, None).await?;
        Ok(resp.body)
    }

    async fn list_vault_entries(
        &self,
        mgmt_uri: &str,
        target: &VaultTarget,
        auth: &Auth,
    ) -> Result<String> {
        let url = join(mgmt_uri, &target.entries_path());
        let resp = self.send(Method::GET, &url, Some(auth), None).await?;
        Ok(resp.body)
    }

    async fn create_vault(&self, mgmt_uri: &str, target: &VaultTarget, auth: &Auth) -> Result<()> {
        let url = join(mgmt_uri, &target.collection_path());
        let body = serde_json::json!({ "name": target.vault.as_str() });

        match self.send(Method::POST, &url, Some(auth), Some(body)).await {
            Ok(_) => Ok(()),
            Err(e) if e.has_remote_code(&RemoteErrorCode::StoreAlreadyExists) => {
                Err(GatecertError::VaultAlreadyExists {
                    vault: target.vault.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn delete_vault(&self, mgmt_uri: &str, target: &VaultTarget, auth: &Auth) -> Result<()> {
        let url = join(mgmt_uri, &target.vault_path());

        match self.send(Method::DELETE, &url, Some(auth), None).await {
            Ok(_) => Ok(()),
            Err(e) if e.has_remote_code(&RemoteErrorCode::StoreDoesNotExist) => {
                tracing::debug!(vault = %target, "vault already absent");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn add_vault_entry(
        &self,
        mgmt_uri: &str,
        target: &VaultTarget,
        name: &str,
        value: &str,
        auth: &Auth,
    ) -> Result<()> {
        let url = join(mgmt_uri, &target.entries_path());
        let body = serde_json::json!({ "name": name, "value": value });

        self.send(Method::POST, &url, Some(auth), Some(body)).await?;
        Ok(())
    }

    async fn register_credential(
        &self,
        url: &str,
        credentials: &CredentialPair,
        auth: &Auth,
    ) -> Result<RemoteResponse> {
        let body = serde_json::to_value(credentials)?;
        self.send(Method::POST, url, Some(auth), Some(body)).await
    }

    async fn lookup_region(&self, url: &str, auth: &Auth) -> Result<RemoteResponse> {
        self.send(Method::GET, url, Some(auth), None).await
    }
}
