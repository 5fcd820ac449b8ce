//! Certificate vault commands.

use super::Session;
use anyhow::Result;
use colored::Colorize;
use gatecert_types::ProvisionOptions;

pub async fn install(session: &Session, options: &ProvisionOptions) -> Result<()> {
    let cert = session
        .with_spinner("Installing certificate", session.provisioner.install_cert(options))
        .await?;
    print_installed(&cert);
    Ok(())
}

pub async fn install_private(session: &Session, options: &ProvisionOptions) -> Result<()> {
    let cert = session
        .with_spinner(
            "Installing certificate",
            session.provisioner.install_private_cert(options),
        )
        .await?;
    print_installed(&cert);
    Ok(())
}

pub async fn delete(session: &Session, options: &ProvisionOptions) -> Result<()> {
    session
        .with_spinner("Deleting vault", session.provisioner.delete_cert(options))
        .await?;
    println!("{}", "Vault deleted!".green().bold());
    Ok(())
}

pub async fn check(session: &Session, options: &ProvisionOptions) -> Result<()> {
    let body = session
        .with_spinner("Checking certificate", session.provisioner.check_cert(options))
        .await?;
    print_checked(&body);
    Ok(())
}

pub async fn check_private(session: &Session, options: &ProvisionOptions) -> Result<()> {
    let body = session
        .with_spinner(
            "Checking certificate",
            session.provisioner.check_private_cert(options),
        )
        .await?;
    print_checked(&body);
    Ok(())
}

fn print_installed(cert: &str) {
    println!("{}", "Success!".green().bold());
    println!();
    println!("{}", cert.trim_end());
}

fn print_checked(body: &str) {
    println!("{}", "Certificate installed".green().bold());
    if !body.trim().is_empty() {
        println!("{}", body.trim_end());
    }
}
