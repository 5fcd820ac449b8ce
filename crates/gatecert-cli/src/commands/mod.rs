//! CLI command implementations.

pub mod cert;
pub mod keys;
pub mod public_key;

use crate::cli::{Credentials, Target};
use crate::ui::progress;
use anyhow::Result;
use dialoguer::Password;
use gatecert_core::GatecertConfig;
use gatecert_provision::{require_identity, Provisioner};
use gatecert_types::ProvisionOptions;
use indicatif::ProgressBar;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// State shared by every command.
pub struct Session {
    pub settings: GatecertConfig,
    pub provisioner: Provisioner,
    quiet: bool,
}

impl Session {
    pub fn new(settings: &GatecertConfig, cancel: CancellationToken, quiet: bool) -> Result<Self> {
        let provisioner = gatecert_provision::connect(settings)?.with_cancellation(cancel);
        Ok(Self {
            settings: settings.clone(),
            provisioner,
            quiet,
        })
    }

    /// Assemble provisioning options, prompting for the password when needed.
    pub fn options(&self, target: &Target, credentials: Option<&Credentials>) -> Result<ProvisionOptions> {
        let mut options = ProvisionOptions {
            org: target.org.clone(),
            env: target.env.clone(),
            ..Default::default()
        };
        require_identity(&options)?;

        if let Some(credentials) = credentials {
            options.username = credentials.username.clone();
            options.password = credentials.password.clone();
            options.token = credentials.token.clone();

            if needs_password_prompt(&options) {
                let password = Password::new().with_prompt("Password").interact()?;
                options.password = Some(password);
            }
        }

        Ok(options)
    }

    /// Run `fut` behind a spinner.
    pub async fn with_spinner<T, F>(&self, message: &str, fut: F) -> T
    where
        F: Future<Output = T>,
    {
        let pb = if self.quiet {
            ProgressBar::hidden()
        } else {
            progress::spinner(message)
        };
        let result = fut.await;
        pb.finish_and_clear();
        result
    }
}

/// A password is prompted for when a username is given without a password or token.
fn needs_password_prompt(options: &ProvisionOptions) -> bool {
    let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());
    !present(&options.token) && present(&options.username) && !present(&options.password)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_credentials(username: Option<&str>, password: Option<&str>, token: Option<&str>) -> ProvisionOptions {
        ProvisionOptions {
            username: username.map(str::to_string),
            password: password.map(str::to_string),
            token: token.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_password_prompt_conditions() {
        assert!(needs_password_prompt(&with_credentials(Some("admin"), None, None)));
        assert!(needs_password_prompt(&with_credentials(Some("admin"), None, Some(""))));
        assert!(needs_password_prompt(&with_credentials(Some("admin"), Some(""), None)));

        assert!(!needs_password_prompt(&with_credentials(Some("admin"), Some("pw"), None)));
        assert!(!needs_password_prompt(&with_credentials(Some("admin"), None, Some("tok"))));
        assert!(!needs_password_prompt(&with_credentials(None, None, None)));
    }
}
