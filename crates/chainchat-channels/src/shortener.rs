use std::time::Duration;

use chainchat_common::{Error, Result};
use reqwest::Client;
use tracing::debug;

const TINYURL_API: &str = "https://tinyurl.com/api-create.php";
const SHORTEN_TIMEOUT: Duration = Duration::from_secs(5);

/// Shortens magic links before they go into a Telegram button.
///
/// Purely cosmetic: any failure (network, non-2xx, empty body) falls back to
/// the original URL and is never surfaced to the user.
pub struct LinkShortener {
    client: Client,
    api_url: String,
}

impl LinkShortener {
    pub fn new() -> Self {
        Self::with_api_url(TINYURL_API)
    }

    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(SHORTEN_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    /// Shortened URL, or the original when shortening fails for any reason.
    pub async fn shorten(&self, link: &str) -> String {
        match self.try_shorten(link).await {
            Ok(short) => short,
            Err(e) => {
                debug!("link shortening failed, using original url: {e}");
                link.to_string()
            }
        }
    }

    async fn try_shorten(&self, link: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("url", link)])
            .send()
            .await
            .map_err(|e| Error::Channel(format!("shorten request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Channel(format!(
                "shortener returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Channel(format!("shortener body unreadable: {e}")))?;
        let short = body.trim();
        if short.is_empty() {
            return Err(Error::Channel("shortener returned empty body".to_string()));
        }
        Ok(short.to_string())
    }
}

impl Default for LinkShortener {
    fn default() -> Self {
        Self::new()
    }
}
