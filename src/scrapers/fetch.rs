use anyhow::{bail, Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

/// Timeout for the directory root fetch.
pub const ROOT_TIMEOUT: Duration = Duration::from_secs(15);
/// Longer timeout used for GrowthZone profile pages.
pub const PROFILE_TIMEOUT: Duration = Duration::from_secs(30);
/// Backoff before the single root-fetch retry.
pub const ROOT_RETRY_BACKOFF: Duration = Duration::from_secs(15);
/// Politeness pause after a successful page fetch.
pub const FETCH_SETTLE: Duration = Duration::from_secs(1);

/// GET a page and return its body.
///
/// `timeout` overrides the client default for this request. Transport
/// failures and non-success statuses surface as distinct errors; callers
/// apply the same skip/abort policy to both.
pub async fn fetch_page(client: &Client, url: &str, timeout: Option<Duration>) -> Result<String> {
    let mut request = client.get(url);
    if let Some(timeout) = timeout {
        request = request.timeout(timeout);
    }

    let response = request
        .send()
        .await
        .with_context(|| format!("request to {url} failed"))?;

    let status = response.status();
    if !status.is_success() {
        bail!("GET {url} returned {status}");
    }

    response
        .text()
        .await
        .with_context(|| format!("reading body from {url} failed"))
}

/// Fetch the directory root page, retrying exactly once after `backoff`.
///
/// Both transport failures and non-success statuses get the one retry; a
/// second failure is fatal for the run.
pub async fn fetch_root(client: &Client, url: &str, backoff: Duration) -> Result<String> {
    match fetch_page(client, url, Some(ROOT_TIMEOUT)).await {
        Ok(body) => Ok(body),
        Err(err) => {
            warn!(
                "Directory root fetch failed ({err:#}); retrying in {}s",
                backoff.as_secs()
            );
            tokio::time::sleep(backoff).await;
            fetch_page(client, url, Some(ROOT_TIMEOUT))
                .await
                .context("directory root unreachable after retry")
        }
    }
}
