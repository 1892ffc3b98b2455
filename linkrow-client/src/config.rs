//! Client configuration.

use std::{fmt, time::Duration};

use linkrow_core::{Error, Result};
use url::Url;

/// Prefix of the `Authorization` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthScheme {
    /// Database token (`Authorization: Token <key>`).
    #[default]
    Token,
    /// User session token (`Authorization: JWT <key>`).
    Jwt,
}

impl AuthScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthScheme::Token => "Token",
            AuthScheme::Jwt => "JWT",
        }
    }
}

/// Connection settings for a Baserow instance.
///
/// # Example
///
/// ```ignore
/// let config = ClientConfig::new("https://baserow.example.com/api", "secret")?
///     .user_field_names(true)
///     .page_size(Some(200));
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    base_url: Url,
    token: String,
    auth_scheme: AuthScheme,
    user_field_names: bool,
    page_size: Option<u32>,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a config for the API rooted at `base_url`.
    ///
    /// The base url is normalized to end with `/` so endpoint paths join
    /// below it instead of replacing its last segment.
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self> {
        let trimmed = base_url.trim();
        let normalized = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };

        let base_url = Url::parse(&normalized).map_err(|e| {
            Box::new(Error::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Box::new(Error::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", base_url.scheme()),
            }));
        }

        Ok(Self {
            base_url,
            token: token.into(),
            auth_scheme: AuthScheme::default(),
            user_field_names: false,
            page_size: None,
            timeout: None,
        })
    }

    /// Set the `Authorization` header prefix.
    pub fn auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth_scheme = scheme;
        self
    }

    /// Key rows by field name instead of `field_<id>`.
    pub fn user_field_names(mut self, enabled: bool) -> Self {
        self.user_field_names = enabled;
        self
    }

    /// Rows per page to request; the server default applies when unset.
    pub fn page_size(mut self, size: Option<u32>) -> Self {
        self.page_size = size;
        self
    }

    /// Per-request timeout. Unset means requests may block indefinitely.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn uses_user_field_names(&self) -> bool {
        self.user_field_names
    }

    pub fn rows_per_page(&self) -> Option<u32> {
        self.page_size
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Value of the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.auth_scheme.as_str(), self.token)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .field("auth_scheme", &self.auth_scheme)
            .field("user_field_names", &self.user_field_names)
            .field("page_size", &self.page_size)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_added() {
        let config = ClientConfig::new("https://baserow.example.com/api", "k").unwrap();
        assert_eq!(config.base_url().as_str(), "https://baserow.example.com/api/");
    }

    #[test]
    fn test_trailing_slash_kept() {
        let config = ClientConfig::new("https://baserow.example.com/api/", "k").unwrap();
        assert_eq!(config.base_url().as_str(), "https://baserow.example.com/api/");
    }

    #[test]
    fn test_invalid_url() {
        let err = ClientConfig::new("not a url", "k").unwrap_err();
        assert!(matches!(*err, Error::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_unsupported_scheme() {
        let err = ClientConfig::new("ftp://baserow.example.com/api/", "k").unwrap_err();
        assert!(matches!(*err, Error::InvalidBaseUrl { ref reason, .. } if reason.contains("ftp")));
    }

    #[test]
    fn test_authorization_header() {
        let config = ClientConfig::new("http://localhost/api/", "secret").unwrap();
        assert_eq!(config.authorization(), "Token secret");

        let config = config.auth_scheme(AuthScheme::Jwt);
        assert_eq!(config.authorization(), "JWT secret");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("http://localhost/api/", "secret").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
