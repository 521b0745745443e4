use crate::error::Result;
use reqwest::Client;
use tracing::debug;

/// Fetches page markup over HTTP. One shared client, one attempt per URL,
/// no retries.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Self {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent("Favscout/0.1 (https://github.com/favscout/favscout)")
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(timeout_secs / 2))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetch the body of `url` as text. Transport failures and non-2xx
    /// statuses both surface as the same error kind.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;

        Ok(body)
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}
