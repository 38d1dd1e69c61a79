//! Connection target and URL building.
//!
//! A [`ConnectionTarget`] is built fresh from the current operator-supplied
//! settings each time a connection attempt is made and is not retained after
//! the resulting socket closes.
//!
//! # URL Format
//!
//! ```text
//! {ws|wss}://{host}:{port}/websocket{query}
//! ```
//!
//! The path suffix and query forwarding are fixed for compatibility with
//! existing counterpart services.

// ============================================================================
// Imports
// ============================================================================

use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Fixed path suffix expected by counterpart services.
const WS_PATH: &str = "/websocket";

// ============================================================================
// ConnectionTarget
// ============================================================================

/// Operator-supplied connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    /// Remote host name or address.
    pub host: String,

    /// Remote port.
    pub port: u16,

    /// Use TLS (`wss` scheme) instead of plain `ws`.
    pub secure: bool,
}

impl ConnectionTarget {
    /// Creates a new connection target.
    #[inline]
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, secure: bool) -> Self {
        Self {
            host: host.into(),
            port,
            secure,
        }
    }

    /// Returns the URL scheme for this target.
    #[inline]
    #[must_use]
    pub const fn scheme(&self) -> &'static str {
        if self.secure { "wss" } else { "ws" }
    }

    /// Builds the transport URL, forwarding the diagnostic query string
    /// verbatim (leading `?` included) when one is configured.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if the assembled URL does not parse,
    /// e.g. for an empty or malformed host.
    pub fn url(&self, query: Option<&str>) -> Result<Url> {
        let raw = format!(
            "{}://{}:{}{}{}",
            self.scheme(),
            self.host,
            self.port,
            WS_PATH,
            query.unwrap_or_default(),
        );

        Url::parse(&raw).map_err(|e| Error::connection(format!("invalid URL {raw}: {e}")))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_url() {
        let target = ConnectionTarget::new("localhost", 8080, false);
        let url = target.url(None).expect("valid url");
        assert_eq!(url.as_str(), "ws://localhost:8080/websocket");
    }

    #[test]
    fn test_secure_url() {
        let target = ConnectionTarget::new("example.com", 8443, true);
        let url = target.url(None).expect("valid url");
        assert_eq!(url.as_str(), "wss://example.com:8443/websocket");
    }

    #[test]
    fn test_query_forwarded_verbatim() {
        let target = ConnectionTarget::new("localhost", 8080, false);
        let url = target.url(Some("?debug=1&trace=all")).expect("valid url");
        assert_eq!(
            url.as_str(),
            "ws://localhost:8080/websocket?debug=1&trace=all"
        );
    }

    #[test]
    fn test_scheme() {
        assert_eq!(ConnectionTarget::new("h", 1, false).scheme(), "ws");
        assert_eq!(ConnectionTarget::new("h", 1, true).scheme(), "wss");
    }

    #[test]
    fn test_empty_host_rejected() {
        let target = ConnectionTarget::new("", 8080, false);
        let err = target.url(None).expect_err("must fail");
        assert!(err.is_connection_error());
    }
}
