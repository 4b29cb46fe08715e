use tracing::instrument;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::feed;
use crate::model::*;

/// Read-only client for the 365scores standings and statistics feeds.
///
/// `SportsClient` wraps a [`reqwest::Client`] together with a
/// [`ClientConfig`] that controls the base URL, retry budget and timeouts.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> matchday::Result<()> {
/// use matchday::{Competition, SportsClient};
///
/// let client = SportsClient::new();
/// let table = client.get_standings(Competition::PremierLeague).await?;
/// println!("{} teams", table.team_count());
/// # Ok(())
/// # }
/// ```
pub struct SportsClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl SportsClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure proxies, headers, etc.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            http: client,
            config: ClientConfig::default(),
        }
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the standings of a competition, grouped where it has groups.
    #[instrument(skip(self))]
    pub async fn get_standings(&self, competition: Competition) -> Result<StandingsTable> {
        feed::standings::get_standings(&self.http, &self.config, competition).await
    }

    /// Fetch goal, assist and expected-value leaderboards of a competition.
    #[instrument(skip(self))]
    pub async fn get_player_stats(&self, competition: Competition) -> Result<PlayerLeaderboards> {
        feed::stats::get_player_stats(&self.http, &self.config, competition).await
    }
}

impl Default for SportsClient {
    fn default() -> Self {
        Self::new()
    }
}
