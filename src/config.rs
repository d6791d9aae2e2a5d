//! # Configuration
//!
//! The storefront talks to a single API gateway. Its base URL defaults to the
//! local gateway and can be overridden with `--api-url` or the
//! [`API_URL_ENV`] environment variable.

use thiserror::Error;
use url::Url;

/// Gateway the storefront talks to when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Environment variable consulted by the CLI for the gateway base URL.
pub const API_URL_ENV: &str = "STOREFRONT_API_URL";

/// Default capacity of the view's request channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Errors raised while building a [`StorefrontConfig`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Runtime settings for the storefront.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Gateway base URL. Endpoint paths are appended to it.
    pub api_base_url: Url,
    /// Capacity of the view's request channel. Purchases wait when it is full.
    pub channel_capacity: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl StorefrontConfig {
    /// Builds a configuration for the gateway at `api_base_url`.
    ///
    /// Only absolute `http`/`https` URLs are accepted.
    pub fn new(api_base_url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: api_base_url.to_string(),
            reason,
        };

        let url = Url::parse(api_base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
        }
        if url.cannot_be_a_base() {
            return Err(invalid("URL cannot carry a path".to_string()));
        }

        Ok(Self {
            api_base_url: url,
            ..Self::default()
        })
    }

    /// Appends `segments` to the base URL, keeping any path prefix the base
    /// already carries. Each segment is percent-encoded on its own.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ConfigError> {
        let mut url = self.api_base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| ConfigError::InvalidBaseUrl {
                url: self.api_base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_gateway() {
        let config = StorefrontConfig::default();
        assert_eq!(
            config.endpoint(&["api", "products"]).unwrap().as_str(),
            "http://localhost:8080/api/products"
        );
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let config = StorefrontConfig::new("https://shop.example.com/gateway/").unwrap();
        assert_eq!(
            config.endpoint(&["api", "orders"]).unwrap().as_str(),
            "https://shop.example.com/gateway/api/orders"
        );

        let config = StorefrontConfig::new("https://shop.example.com/gateway").unwrap();
        assert_eq!(
            config.endpoint(&["api", "orders"]).unwrap().as_str(),
            "https://shop.example.com/gateway/api/orders"
        );
    }

    #[test]
    fn test_segments_are_encoded() {
        let config = StorefrontConfig::default();
        assert_eq!(
            config.endpoint(&["api", "products", "a/b c"]).unwrap().as_str(),
            "http://localhost:8080/api/products/a%2Fb%20c"
        );
    }

    #[test]
    fn test_rejects_non_http_urls() {
        assert!(matches!(
            StorefrontConfig::new("ftp://example.com"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(StorefrontConfig::new("not a url").is_err());
        assert!(StorefrontConfig::new("mailto:shop@example.com").is_err());
    }
}
