// restkit/src/host.rs
use std::fmt;

use url::Url;

use crate::error::{Error, Result};

/// Scheme+host+port identity of a connection target, with no path, query,
/// or fragment. Two URIs sharing scheme, host, and port derive equal keys,
/// so all requests to one host route through one cached client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostKey(String);

impl HostKey {
    /// Derive the key for an absolute URI with a host component.
    pub fn derive(endpoint: &str) -> Result<Self> {
        Self::derive_named("endpoint", endpoint)
    }

    /// Same derivation, reporting failures against `name` (the registry
    /// validates its `host` parameter through this).
    pub(crate) fn derive_named(name: &'static str, value: &str) -> Result<Self> {
        let url = parse_absolute(name, value)?;
        Self::from_url_named(name, &url)
    }

    /// Key for an already-parsed URL.
    pub fn from_url(url: &Url) -> Result<Self> {
        Self::from_url_named("endpoint", url)
    }

    fn from_url_named(name: &'static str, url: &Url) -> Result<Self> {
        let host = url
            .host_str()
            .ok_or_else(|| Error::malformed(name, url.as_str(), "URI has no host"))?;
        // Url normalizes an explicit default port away, so http://h:80 and
        // http://h produce the same key.
        let key = match url.port() {
            Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
            None => format!("{}://{}", url.scheme(), host),
        };
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse `value` as an absolute URI, reporting blank input as a missing
/// `name` and unparseable input as malformed.
pub(crate) fn parse_absolute(name: &'static str, value: &str) -> Result<Url> {
    if value.trim().is_empty() {
        return Err(Error::missing(name));
    }
    Url::parse(value).map_err(|e| Error::malformed(name, value, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_ignores_path_query_fragment() {
        let a = HostKey::derive("http://example.com/api/x?y=1").unwrap();
        let b = HostKey::derive("http://example.com/other#frag").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "http://example.com");
    }

    #[test]
    fn test_key_includes_explicit_port() {
        let a = HostKey::derive("https://example.com:8443/api").unwrap();
        assert_eq!(a.as_str(), "https://example.com:8443");
    }

    #[test]
    fn test_default_port_spelling_is_stable() {
        let a = HostKey::derive("http://example.com:80/x").unwrap();
        let b = HostKey::derive("http://example.com/y").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_scheme_distinguishes_keys() {
        let a = HostKey::derive("http://example.com/").unwrap();
        let b = HostKey::derive("https://example.com/").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_blank_endpoint_is_missing() {
        let err = HostKey::derive("  ").unwrap_err();
        assert!(matches!(err, Error::Missing { name: "endpoint" }));
    }

    #[test]
    fn test_non_uri_is_malformed() {
        let err = HostKey::derive("??not a uri??").unwrap_err();
        assert!(matches!(err, Error::Malformed { name: "endpoint", .. }));
    }

    #[test]
    fn test_hostless_uri_is_malformed() {
        let err = HostKey::derive("data:text/plain,hi").unwrap_err();
        assert!(matches!(err, Error::Malformed { name: "endpoint", .. }));
    }
}
