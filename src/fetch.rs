//! Page fetching.

use crate::error::{DigestError, Result};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// User-Agent sent with every page request
pub const USER_AGENT: &str = concat!("event-digest/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client used for page fetches
///
/// No timeout is applied unless one is given.
pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Fetches a listing page and returns its body as text
pub async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|e| DigestError::InvalidUrl(format!("{url}: {e}")))?;

    let response = client
        .get(parsed)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(DigestError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let html = response.text().await?;
    ::log::debug!("Fetched {} bytes from {}", html.len(), url);
    Ok(html)
}
