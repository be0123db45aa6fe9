mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use tracing::debug;

/// GETs `url` and returns the body. Non-2xx responses are errors.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse().with_context(|| format!("invalid URL '{url}'"))?,
    );

    let resp = client.execute(req).await?.error_for_status()?;
    let bytes = resp.bytes().await?.to_vec();

    debug!(url, bytes = bytes.len(), "Fetched remote body");
    Ok(bytes)
}

/// True when `source` should be fetched over HTTP rather than read from disk.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.org/tn-jobcards.json"));
        assert!(is_remote("http://localhost:8080/data.json"));
        assert!(!is_remote("data/tn-jobcards.json"));
        assert!(!is_remote("httpdata/tn.json"));
    }

    #[tokio::test]
    async fn test_fetch_rejects_invalid_url() {
        let client = BasicClient::new();
        assert!(fetch_bytes(&client, "not a url").await.is_err());
    }
}
