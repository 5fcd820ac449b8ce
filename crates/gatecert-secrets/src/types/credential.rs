//! API key/secret generation.
//!
//! Each half is a SHA-256 digest over a millisecond timestamp, 256 bytes from
//! the operating system's secure random source, and a second timestamp. The
//! timestamps keep the output unpredictable even if the random source were
//! compromised; the two halves are drawn independently.

use gatecert_types::{CredentialPair, GatecertError, Result};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random bytes mixed into each digest.
pub const RANDOM_BYTES: usize = 256;

/// Length of a generated key or secret, in hex characters.
pub const TOKEN_LEN: usize = 64;

/// Generate a fresh key/secret pair.
pub fn generate_credentials() -> Result<CredentialPair> {
    generate_credentials_with(&mut OsRng)
}

/// Generate a key/secret pair from the given random source.
pub fn generate_credentials_with<R: RngCore + ?Sized>(rng: &mut R) -> Result<CredentialPair> {
    let key = generate_token(rng)?;
    let secret = generate_token(rng)?;
    tracing::debug!(len = key.len(), "generated key/secret pair");
    Ok(CredentialPair { key, secret })
}

/// Generate a single 64-character lowercase hex token.
pub fn generate_token<R: RngCore + ?Sized>(rng: &mut R) -> Result<String> {
    let mut hasher = Sha256::new();
    hasher.update(timestamp().as_bytes());

    let mut buf = [0u8; RANDOM_BYTES];
    rng.try_fill_bytes(&mut buf)
        .map_err(|e| GatecertError::Entropy(e.to_string()))?;
    hasher.update(buf);

    hasher.update(timestamp().as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

fn timestamp() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}
