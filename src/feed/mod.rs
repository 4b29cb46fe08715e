pub(crate) mod standings;
pub(crate) mod stats;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{MatchdayError, Result};

/// The two remote feeds the app reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum FeedKind {
    Standings,
    Stats,
}

impl FeedKind {
    /// Generic message shown in place of the table when a fetch fails.
    pub fn failure_message(self) -> String {
        format!("Failed to load {self}")
    }
}

/// Fetch a URL and decode the body as JSON, retrying transient failures
/// up to `config.retries` times.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    config: &ClientConfig,
    url: &str,
) -> Result<T> {
    let mut attempt = 0;
    loop {
        match fetch_once(client, config, url).await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < config.retries => {
                attempt += 1;
                warn!(error = %e, attempt, url, "retrying request");
                tokio::time::sleep(config.retry_backoff).await;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn fetch_once<T: DeserializeOwned>(
    client: &reqwest::Client,
    config: &ClientConfig,
    url: &str,
) -> Result<T> {
    debug!(url, "fetching feed");

    let response = client
        .get(url)
        .timeout(config.timeout)
        .send()
        .await
        .map_err(|e| MatchdayError::Http {
            url: url.to_owned(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(MatchdayError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| MatchdayError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    decode(url, &body)
}

pub(crate) fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| MatchdayError::Json {
        url: url.to_owned(),
        source: e,
    })
}
