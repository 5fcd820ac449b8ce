//! Key/secret provisioning.

use super::Session;
use anyhow::{Context, Result};
use colored::Colorize;
use gatecert_types::ProvisionOptions;

pub async fn generate(session: &Session, options: &ProvisionOptions) -> Result<()> {
    let keys = session
        .with_spinner("Provisioning credentials", session.provisioner.generate_keys(options))
        .await
        .context("Failed to provision credentials")?;

    tracing::info!(bootstrap = %keys.bootstrap, "credentials provisioned");

    println!();
    println!("{}", session.settings.bootstrap_message);
    println!("  bootstrap: {}", keys.bootstrap.cyan());
    println!();
    println!("{}", session.settings.key_secret_message);
    println!("  key: {}", keys.key);
    println!("  secret: {}", keys.secret);
    println!();

    Ok(())
}
