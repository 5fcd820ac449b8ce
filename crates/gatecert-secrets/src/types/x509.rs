//! Self-signed X.509 certificate generation.

use gatecert_types::{CertificateBundle, GatecertError, Result};
use rcgen::{
    Certificate, CertificateParams, CertificateSigningRequest, DistinguishedName, DnType, KeyPair,
};
use time::{Duration, OffsetDateTime};

/// Default certificate validity, in days.
pub const DEFAULT_VALIDITY_DAYS: u32 = 1;

/// Default subject common name.
pub const DEFAULT_COMMON_NAME: &str = "localhost";

/// Options for [`CertificateGenerator::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertOptions {
    /// Sign with the certificate's own key
    pub self_signed: bool,
    /// Validity in days, counted from now
    pub days: u32,
    /// Subject common name
    pub common_name: String,
    /// PEM private key to use instead of generating one
    pub service_key: Option<String>,
    /// PEM certificate signing request to sign with the service key
    pub csr: Option<String>,
}

impl Default for CertOptions {
    fn default() -> Self {
        Self {
            self_signed: true,
            days: DEFAULT_VALIDITY_DAYS,
            common_name: DEFAULT_COMMON_NAME.to_string(),
            service_key: None,
            csr: None,
        }
    }
}

/// Produces certificate/private key bundles. No network I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct CertificateGenerator;

impl CertificateGenerator {
    /// Create a generator.
    pub fn new() -> Self {
        Self
    }

    /// Generate a certificate bundle.
    ///
    /// Without a service key or CSR a fresh key pair and a matching
    /// self-signed certificate are produced together. A supplied service key
    /// becomes the certificate key. A supplied CSR is signed by an issuer
    /// built from the service key, which is then required.
    pub fn generate(&self, options: &CertOptions) -> Result<CertificateBundle> {
        Self::validate(options)?;

        let key_pair = match &options.service_key {
            Some(pem) => Some(
                KeyPair::from_pem(pem)
                    .map_err(|e| cert_error("Failed to parse service key", e))?,
            ),
            None => None,
        };

        let issuer = Certificate::from_params(self.params(options, key_pair)?)
            .map_err(|e| cert_error("Failed to create certificate", e))?;

        let certificate = match &options.csr {
            Some(csr_pem) => {
                let csr = CertificateSigningRequest::from_pem(csr_pem)
                    .map_err(|e| cert_error("Failed to parse CSR", e))?;
                csr.serialize_pem_with_signer(&issuer)
                    .map_err(|e| cert_error("Failed to sign CSR", e))?
            }
            None => issuer
                .serialize_pem()
                .map_err(|e| cert_error("Failed to encode certificate", e))?,
        };

        let service_key = match &options.service_key {
            Some(pem) => pem.clone(),
            None => issuer.serialize_private_key_pem(),
        };

        tracing::debug!(
            days = options.days,
            common_name = %options.common_name,
            from_csr = options.csr.is_some(),
            "generated certificate"
        );

        Ok(CertificateBundle {
            certificate,
            service_key,
        })
    }

    fn validate(options: &CertOptions) -> Result<()> {
        if options.days == 0 {
            return Err(GatecertError::CertGeneration("Validity days must be positive".to_string()));
        }

        if options.common_name.trim().is_empty() {
            return Err(GatecertError::CertGeneration("Common name cannot be empty".to_string()));
        }

        if options.csr.is_some() && options.service_key.is_none() {
            return Err(GatecertError::CertGeneration(
                "Signing a CSR requires a service key".to_string(),
            ));
        }

        if !options.self_signed && options.csr.is_none() {
            return Err(GatecertError::CertGeneration(
                "Certificates that are not self-signed require a CSR".to_string(),
            ));
        }

        Ok(())
    }

    fn params(&self, options: &CertOptions, key_pair: Option<KeyPair>) -> Result<CertificateParams> {
        let mut params = CertificateParams::new(vec![options.common_name.clone()]);

        let mut name = DistinguishedName::new();
        name.push(DnType::CommonName, options.common_name.clone());
        params.distinguished_name = name;

        let now = OffsetDateTime::now_utc();
        params.not_before = now;
        params.not_after = now + Duration::days(i64::from(options.days));

        if let Some(key_pair) = key_pair {
            params.alg = key_pair.compatible_algs().next().ok_or_else(|| {
                GatecertError::CertGeneration("Service key uses an unsupported algorithm".to_string())
            })?;
            params.key_pair = Some(key_pair);
        }

        Ok(params)
    }
}

fn cert_error(context: &str, err: rcgen::RcgenError) -> GatecertError {
    GatecertError::CertGeneration(format!("{}: {}", context, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use x509_parser::pem::parse_x509_pem;

    fn parse_validity_secs(pem: &str) -> (i64, String, String) {
        let (_, pem) = parse_x509_pem(pem.as_bytes()).unwrap();
        let cert = pem.parse_x509().unwrap();
        let validity = cert.validity();
        (
            validity.not_after.timestamp() - validity.not_before.timestamp(),
            cert.subject().to_string(),
            cert.issuer().to_string(),
        )
    }

    #[test]
    fn test_self_signed_defaults() {
        let bundle = CertificateGenerator::new().generate(&CertOptions::default()).unwrap();

        assert!(bundle.certificate.starts_with("-----BEGIN CERTIFICATE-----"));
        assert!(bundle.service_key.contains("PRIVATE KEY"));

        let (lifetime, subject, issuer) = parse_validity_secs(&bundle.certificate);
        assert_eq!(lifetime, 24 * 60 * 60);
        assert_eq!(subject, issuer);
        assert!(subject.contains("localhost"));
    }

    #[test]
    fn test_validity_is_parameterizable() {
        let options = CertOptions { days: 30, ..Default::default() };
        let bundle = CertificateGenerator::new().generate(&options).unwrap();

        let (lifetime, _, _) = parse_validity_secs(&bundle.certificate);
        assert_eq!(lifetime, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_each_run_uses_a_fresh_key() {
        let generator = CertificateGenerator::new();
        let first = generator.generate(&CertOptions::default()).unwrap();
        let second = generator.generate(&CertOptions::default()).unwrap();
        assert_ne!(first.service_key, second.service_key);
    }

    #[test]
    fn test_supplied_service_key_is_used() {
        let key = KeyPair::generate(&rcgen::PKCS_ECDSA_P256_SHA256).unwrap();
        let key_pem = key.serialize_pem();

        let options = CertOptions { service_key: Some(key_pem.clone()), ..Default::default() };
        let bundle = CertificateGenerator::new().generate(&options).unwrap();

        assert_eq!(bundle.service_key, key_pem);
        assert!(bundle.certificate.starts_with("-----BEGIN CERTIFICATE-----"));
    }

    #[test]
    fn test_csr_is_signed_by_service_key() {
        let requester = Certificate::from_params(CertificateParams::new(vec![
            "agent.example.com".to_string(),
        ]))
        .unwrap();
        let csr_pem = requester.serialize_request_pem().unwrap();
        let signer = KeyPair::generate(&rcgen::PKCS_ECDSA_P256_SHA256).unwrap();

        let options = CertOptions {
            common_name: "gatecert-issuer".to_string(),
            service_key: Some(signer.serialize_pem()),
            csr: Some(csr_pem),
            ..Default::default()
        };
        let bundle = CertificateGenerator::new().generate(&options).unwrap();

        let (_, subject, issuer) = parse_validity_secs(&bundle.certificate);
        assert!(issuer.contains("gatecert-issuer"));
        assert_ne!(subject, issuer);
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        let generator = CertificateGenerator::new();

        let zero_days = CertOptions { days: 0, ..Default::default() };
        assert!(matches!(generator.generate(&zero_days), Err(GatecertError::CertGeneration(_))));

        let csr_without_key = CertOptions { csr: Some("csr".to_string()), ..Default::default() };
        assert!(matches!(generator.generate(&csr_without_key), Err(GatecertError::CertGeneration(_))));

        let not_self_signed = CertOptions { self_signed: false, ..Default::default() };
        assert!(matches!(generator.generate(&not_self_signed), Err(GatecertError::CertGeneration(_))));

        let bad_key = CertOptions { service_key: Some("not a key".to_string()), ..Default::default() };
        assert!(matches!(generator.generate(&bad_key), Err(GatecertError::CertGeneration(_))));
    }
}
