use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{logo_or_placeholder, Theme};
use super::stream_source::StreamSource;
use super::team::Team;
use crate::error::{MatchdayError, Result};

/// A scheduled fixture as supplied by the match data source.
///
/// Records are immutable; lifecycle status is derived from
/// [`MatchRecord::kickoff_time`] on every evaluation and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub team1: Team,
    pub team2: Team,
    pub competition_name: String,
    pub competition_logo_url: String,
    pub competition_logo_url_dark: String,
    /// Raw kickoff timestamp, RFC 3339 with an explicit offset.
    pub kickoff_time: String,
    pub streams: Vec<StreamSource>,
}

impl MatchRecord {
    /// Parse the kickoff timestamp.
    ///
    /// Timestamps without an offset are rejected rather than interpreted in
    /// the local time zone.
    pub fn kickoff(&self) -> Result<DateTime<Utc>> {
        parse_kickoff(&self.kickoff_time)
    }

    /// Competition logo for the given theme, falling back to the light logo
    /// and then to the placeholder.
    pub fn competition_logo(&self, theme: Theme) -> &str {
        let dark = self.competition_logo_url_dark.trim();
        if theme.is_dark() && !dark.is_empty() {
            dark
        } else {
            logo_or_placeholder(&self.competition_logo_url)
        }
    }
}

/// Parse an RFC 3339 kickoff timestamp into UTC.
pub fn parse_kickoff(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| MatchdayError::InvalidKickoff {
            raw: raw.to_owned(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_parse_kickoff_with_offset() {
        let kickoff = parse_kickoff("2025-12-27T02:00:00+01:00").unwrap();
        assert_eq!(kickoff, Utc.with_ymd_and_hms(2025, 12, 27, 1, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_kickoff_rejects_missing_offset() {
        let err = parse_kickoff("2025-12-27T01:00:00").unwrap_err();
        assert!(matches!(err, MatchdayError::InvalidKickoff { .. }));
    }

    #[test]
    fn test_competition_logo_follows_theme() {
        let record = MatchRecord {
            team1: Team::new("Zambia", ""),
            team2: Team::new("Comores", ""),
            competition_name: "AFCON 2025".to_owned(),
            competition_logo_url: "https://img.test/light.png".to_owned(),
            competition_logo_url_dark: String::new(),
            kickoff_time: "2025-12-27T01:00:00Z".to_owned(),
            streams: vec![],
        };
        assert_eq!(record.competition_logo(Theme::Dark), "https://img.test/light.png");

        let record = MatchRecord {
            competition_logo_url_dark: "https://img.test/dark.png".to_owned(),
            ..record
        };
        assert_eq!(record.competition_logo(Theme::Dark), "https://img.test/dark.png");
        assert_eq!(record.competition_logo(Theme::Light), "https://img.test/light.png");
    }
}
