//! Bootstrap URL regionalization.

use gatecert_types::{GatecertError, Result};
use url::Url;

/// Replace the host of `bootstrap_url` with the regional `host`.
///
/// `host` may carry a port (`api.us.example.com:8443`, `[::1]:8443`); without
/// one the template's port is dropped along with its host. Scheme, path,
/// query and fragment are preserved. A host with a path, user info or an
/// invalid port is rejected.
pub fn regionalize(bootstrap_url: &str, host: &str) -> Result<String> {
    let mut url = Url::parse(bootstrap_url).map_err(|e| {
        GatecertError::Config(format!("Invalid bootstrap URL '{}': {}", bootstrap_url, e))
    })?;

    let invalid = |reason: &str| GatecertError::RegionLookup(format!("Invalid regional host '{}': {}", host, reason));

    let authority = Url::parse(&format!("{}://{}", url.scheme(), host)).map_err(|e| invalid(&e.to_string()))?;
    if authority.path() != "/" || authority.query().is_some() || authority.fragment().is_some() {
        return Err(invalid("unexpected path"));
    }
    if !authority.username().is_empty() || authority.password().is_some() {
        return Err(invalid("unexpected user info"));
    }
    let name = authority.host_str().ok_or_else(|| invalid("missing host name"))?;

    url.set_host(Some(name)).map_err(|e| invalid(&e.to_string()))?;
    url.set_port(authority.port())
        .map_err(|_| GatecertError::RegionLookup(format!("Cannot set port on '{}'", bootstrap_url)))?;

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_host_is_replaced() {
        let url = regionalize("https://mgmt.example.com/bootstrap/acme/test", "api.us.example.com").unwrap();
        assert_eq!(url, "https://api.us.example.com/bootstrap/acme/test");
    }

    #[test]
    fn test_query_and_port() {
        let url = regionalize(
            "https://mgmt.example.com:9000/edgemicro/bootstrap/organization/acme/environment/test?v=2",
            "api.eu.example.com:8443",
        )
        .unwrap();
        assert_eq!(
            url,
            "https://api.eu.example.com:8443/edgemicro/bootstrap/organization/acme/environment/test?v=2"
        );

        let url = regionalize("https://mgmt.example.com:9000/b?x=1", "api.eu.example.com").unwrap();
        assert_eq!(url, "https://api.eu.example.com/b?x=1");
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(regionalize("not a url", "api.example.com"), Err(GatecertError::Config(_))));
        assert!(matches!(
            regionalize("https://mgmt.example.com/b", "bad host"),
            Err(GatecertError::RegionLookup(_))
        ));
    }

    #[test]
    fn test_bracketed_ipv6_with_port() {
        let url = regionalize("https://mgmt.example.com/bootstrap/acme/test?x=1", "[::1]:8443").unwrap();
        assert_eq!(url, "https://[::1]:8443/bootstrap/acme/test?x=1");
    }

    #[test]
    fn test_malformed_hosts_rejected() {
        let template = "https://mgmt.example.com/bootstrap/acme/test?x=1";

        for host in [
            "api.us.example.com:99999",
            "api.us.example.com:port",
            "api.us.example.com/other",
            "user:pw@api.us.example.com",
            "",
        ] {
            assert!(
                matches!(regionalize(template, host), Err(GatecertError::RegionLookup(_))),
                "accepted {:?}",
                host
            );
        }
    }

    proptest! {
        #[test]
        fn prop_only_host_changes(
            region in "[a-z]{2,6}",
            org in "[a-z][a-z0-9-]{0,10}",
            env in "[a-z][a-z0-9]{0,8}",
        ) {
            let template = format!("https://mgmt.example.com/bootstrap/{}/{}?from=cli", org, env);
            let host = format!("api.{}.example.com", region);

            let original = Url::parse(&template).unwrap();
            let updated = Url::parse(&regionalize(&template, &host).unwrap()).unwrap();

            prop_assert_eq!(updated.host_str(), Some(host.as_str()));
            prop_assert_eq!(updated.scheme(), original.scheme());
            prop_assert_eq!(updated.path(), original.path());
            prop_assert_eq!(updated.query(), original.query());
        }
    }
}
