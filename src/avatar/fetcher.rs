use std::fmt;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Url;

use crate::core::identity::{AvatarStyle, avatar_url};

/// Errors that can occur while fetching the avatar.
#[derive(Debug)]
pub enum AvatarError {
    /// The configured base URL does not parse.
    InvalidUrl(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The endpoint answered with a non-success status.
    Api { status: u16 },
    /// Success status but nothing to show.
    EmptyBody,
}

impl fmt::Display for AvatarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvatarError::InvalidUrl(msg) => write!(f, "invalid avatar URL: {msg}"),
            AvatarError::Network(msg) => write!(f, "network error: {msg}"),
            AvatarError::Api { status } => write!(f, "avatar endpoint returned HTTP {status}"),
            AvatarError::EmptyBody => write!(f, "avatar endpoint returned an empty body"),
        }
    }
}

impl std::error::Error for AvatarError {}

/// A fetched avatar image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarImage {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait AvatarFetcher: Send + Sync {
    /// Fetch the avatar generated for `display_name`.
    async fn fetch(&self, display_name: &str) -> Result<AvatarImage, AvatarError>;
}

/// Fetches avatars from an avatar-generation HTTP endpoint.
pub struct HttpAvatarFetcher {
    client: reqwest::Client,
    style: AvatarStyle,
}

impl HttpAvatarFetcher {
    pub fn new(style: AvatarStyle) -> Self {
        Self {
            client: reqwest::Client::new(),
            style,
        }
    }

    pub fn url_for(&self, display_name: &str) -> Result<Url, AvatarError> {
        avatar_url(&self.style, display_name).map_err(AvatarError::InvalidUrl)
    }
}

#[async_trait]
impl AvatarFetcher for HttpAvatarFetcher {
    async fn fetch(&self, display_name: &str) -> Result<AvatarImage, AvatarError> {
        let url = self.url_for(display_name)?;
        debug!("Requesting avatar from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AvatarError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Avatar request failed with HTTP {}", status.as_u16());
            return Err(AvatarError::Api {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AvatarError::Network(e.to_string()))?;
        if bytes.is_empty() {
            return Err(AvatarError::EmptyBody);
        }

        debug!("Avatar fetched: {} bytes ({:?})", bytes.len(), content_type);
        Ok(AvatarImage {
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_uses_style() {
        let fetcher = HttpAvatarFetcher::new(AvatarStyle {
            base_url: "http://localhost:9/avatar".to_string(),
            background: "000000".to_string(),
            color: "ffffff".to_string(),
        });
        let url = fetcher.url_for("Ana Gil").unwrap();
        assert_eq!(url.path(), "/avatar");
        assert!(url.as_str().contains("background=000000"));
        assert!(url.as_str().contains("color=ffffff"));
    }

    #[test]
    fn test_invalid_base_url_is_reported_without_a_request() {
        let fetcher = HttpAvatarFetcher::new(AvatarStyle {
            base_url: "::nope::".to_string(),
            ..Default::default()
        });
        let result = tokio_test::block_on(fetcher.fetch("Ana"));
        assert!(matches!(result, Err(AvatarError::InvalidUrl(_))));
    }
}
