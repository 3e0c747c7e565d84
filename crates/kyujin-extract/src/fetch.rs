//! Document acquisition: HTTP and local files behind one trait.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;

use crate::error::FetchError;

/// Raw bytes of one document and what the transport said about them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    pub location: String,
    pub bytes: Vec<u8>,
    /// Charset reported by the transport, e.g. from `Content-Type`.
    pub charset: Option<String>,
}

/// Something that can turn a location into document bytes.
#[allow(async_fn_in_trait)]
pub trait DocumentFetcher {
    /// # Errors
    ///
    /// Returns [`FetchError`] when the document cannot be retrieved.
    async fn fetch(&self, location: &str) -> Result<FetchedDocument, FetchError>;
}

/// `true` for `http://` and `https://` locations.
#[must_use]
pub fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// The `charset` parameter of a `Content-Type` header value.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .map(|(_, value)| value.trim().trim_matches('"').to_ascii_lowercase())
        .filter(|charset| !charset.is_empty())
}

/// Static HTTP fetcher. JavaScript is not executed.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, location: &str) -> Result<FetchedDocument, FetchError> {
        let response = self
            .client
            .get(location)
            .header(ACCEPT, "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: location.to_string(),
            });
        }

        let charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(charset_from_content_type);
        let bytes = response.bytes().await?.to_vec();

        tracing::debug!(
            url = location,
            status = status.as_u16(),
            bytes = bytes.len(),
            charset = charset.as_deref().unwrap_or(""),
            "fetched document"
        );
        Ok(FetchedDocument {
            location: location.to_string(),
            bytes,
            charset,
        })
    }
}

/// Reads documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

impl DocumentFetcher for FileFetcher {
    async fn fetch(&self, location: &str) -> Result<FetchedDocument, FetchError> {
        let bytes = tokio::fs::read(location)
            .await
            .map_err(|e| FetchError::Io {
                path: location.to_string(),
                source: e,
            })?;
        tracing::debug!(path = location, bytes = bytes.len(), "read document");
        Ok(FetchedDocument {
            location: location.to_string(),
            bytes,
            charset: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_parsing() {
        assert_eq!(
            charset_from_content_type("text/html; charset=Shift_JIS").as_deref(),
            Some("shift_jis")
        );
        assert_eq!(
            charset_from_content_type(r#"text/html;CHARSET="EUC-JP""#).as_deref(),
            Some("euc-jp")
        );
        assert_eq!(charset_from_content_type("text/html"), None);
        assert_eq!(charset_from_content_type("text/html; charset="), None);
    }

    #[test]
    fn remote_detection() {
        assert!(is_remote("https://kirara-support.jp/job/1"));
        assert!(is_remote("HTTP://example.com"));
        assert!(!is_remote("./fixtures/job.html"));
        assert!(!is_remote("/tmp/https.html"));
    }
}
