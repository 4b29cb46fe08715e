use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{MatchdayError, Result};
use crate::lifecycle::{bucket, Buckets};
use crate::model::{MatchRecord, StreamSource, Team};

/// Supplies the full match list.
pub trait MatchSource {
    fn all_matches(&self) -> Vec<MatchRecord>;
}

/// An in-process match list bundled with the app.
#[derive(Debug, Clone, Default)]
pub struct StaticMatchSource {
    matches: Vec<MatchRecord>,
}

impl StaticMatchSource {
    pub fn new(matches: Vec<MatchRecord>) -> Self {
        Self { matches }
    }

    /// Load the bundled JSON array of match entries.
    pub fn from_json(raw: &str) -> Result<Self> {
        let entries: Vec<BundledMatch> =
            serde_json::from_str(raw).map_err(|e| MatchdayError::Json {
                url: "bundled matches".to_owned(),
                source: e,
            })?;
        let matches = entries.into_iter().map(MatchRecord::from).collect_vec();
        debug!(count = matches.len(), "loaded bundled matches");
        Ok(Self { matches })
    }
}

impl MatchSource for StaticMatchSource {
    fn all_matches(&self) -> Vec<MatchRecord> {
        self.matches.clone()
    }
}

/// Match entry in the layout the app bundles.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundledMatch {
    #[serde(default)]
    team1: Team,
    #[serde(default)]
    team2: Team,
    #[serde(default)]
    competition_logo: String,
    #[serde(default)]
    competition_dark_logo: String,
    #[serde(default)]
    competition_name: String,
    #[serde(default)]
    match_time: String,
    stream_url_english: Option<String>,
    stream_url_arabic: Option<String>,
    stream_url_server3: Option<String>,
    stream_url_server4: Option<String>,
}

impl From<BundledMatch> for MatchRecord {
    fn from(entry: BundledMatch) -> Self {
        let streams = StreamSource::from_slots(
            entry.stream_url_english.as_deref(),
            entry.stream_url_arabic.as_deref(),
            entry.stream_url_server3.as_deref(),
            entry.stream_url_server4.as_deref(),
        );
        MatchRecord {
            team1: entry.team1,
            team2: entry.team2,
            competition_name: entry.competition_name,
            competition_logo_url: entry.competition_logo,
            competition_logo_url_dark: entry.competition_dark_logo,
            kickoff_time: entry.match_time,
            streams,
        }
    }
}

/// A competition entry of the schedule filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompetitionSummary {
    pub name: String,
    pub logo_url: String,
}

/// Distinct competitions in first-seen order.
pub fn competitions(matches: &[MatchRecord]) -> Vec<CompetitionSummary> {
    matches
        .iter()
        .unique_by(|m| m.competition_name.as_str())
        .map(|m| CompetitionSummary {
            name: m.competition_name.clone(),
            logo_url: m.competition_logo_url.clone(),
        })
        .collect()
}

/// Everything the schedule page renders for one evaluation instant.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleView {
    pub competitions: Vec<CompetitionSummary>,
    pub filter: Option<String>,
    pub buckets: Buckets,
}

impl ScheduleView {
    /// Filter by competition name, then bucket against `now`.
    ///
    /// The competition list always covers the unfiltered matches.
    #[instrument(skip(source))]
    pub fn build<S: MatchSource + ?Sized>(
        source: &S,
        filter: Option<&str>,
        now: DateTime<Utc>,
    ) -> Self {
        let matches = source.all_matches();
        let competitions = competitions(&matches);
        let selected = matches
            .into_iter()
            .filter(|m| filter.is_none_or(|name| m.competition_name == name));
        Self {
            competitions,
            filter: filter.map(str::to_owned),
            buckets: bucket(selected, now),
        }
    }

    /// The filter bar is only worth showing with more than one competition.
    pub fn show_filter(&self) -> bool {
        self.competitions.len() > 1
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn empty_message(&self) -> String {
        match &self.filter {
            Some(name) => format!("No matches found for {name}"),
            None => "No matches scheduled".to_owned(),
        }
    }
}
