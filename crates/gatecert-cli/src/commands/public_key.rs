//! Public key retrieval.

use super::Session;
use anyhow::Result;
use gatecert_types::{GatecertError, ProvisionOptions};

pub async fn retrieve(session: &Session, options: &ProvisionOptions) -> Result<()> {
    let outcome = session
        .with_spinner("Retrieving public key", session.provisioner.retrieve_public_key(options))
        .await;
    print_key(outcome)
}

pub async fn retrieve_private(session: &Session, options: &ProvisionOptions) -> Result<()> {
    let outcome = session
        .with_spinner(
            "Retrieving public key",
            session.provisioner.retrieve_public_key_private(options),
        )
        .await;
    print_key(outcome)
}

fn print_key(outcome: gatecert_types::Result<String>) -> Result<()> {
    let key = outcome.map_err(not_found_body)?;
    println!("{}", key.trim_end());
    Ok(())
}

// A 404 from the auth proxy carries a readable explanation in its body.
fn not_found_body(err: GatecertError) -> anyhow::Error {
    match &err {
        GatecertError::Remote { status: 404, body, .. } if !body.trim().is_empty() => {
            anyhow::anyhow!("{}", body.trim())
        }
        _ => err.into(),
    }
}
