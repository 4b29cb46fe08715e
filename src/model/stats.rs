use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

const ATHLETE_IMAGE_BASE: &str = "https://imagecache.365scores.com/image/upload/f_png,w_100,h_100,c_limit,q_auto:eco,d_Athletes:default.png/v5/Athletes";
const TEAM_LOGO_BASE: &str = "https://imagecache.365scores.com/image/upload/f_png,w_40,h_40,c_limit,q_auto:eco,d_Competitors:default1.png/v5/Competitors";

/// Raw payload of the player statistics endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub stats: StatsBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsBody {
    #[serde(default)]
    pub athletes_stats: Vec<AthleteStatCategory>,
}

/// A ranked list of players for one statistic, e.g. goals.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AthleteStatCategory {
    pub id: Option<u32>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rows: Vec<AthleteStatRow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AthleteStatRow {
    #[serde(default)]
    pub entity: Athlete,
    #[serde(default)]
    pub stats: Vec<StatItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Athlete {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub competitor_id: Option<u64>,
    pub position_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatItem {
    #[serde(default)]
    pub type_id: i64,
    #[serde(default)]
    pub value: Option<StatValue>,
}

/// Statistic values arrive either as numbers or as preformatted strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Display for StatValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatValue::Int(v) => write!(f, "{v}"),
            StatValue::Float(v) => write!(f, "{v}"),
            StatValue::Text(v) => write!(f, "{v}"),
        }
    }
}

/// One line of a player leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub athlete: Athlete,
    pub value: String,
    pub image_url: String,
    pub team_logo_url: Option<String>,
}

/// Player leaderboards of a competition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerLeaderboards {
    pub goals: Vec<LeaderboardEntry>,
    pub assists: Vec<LeaderboardEntry>,
    pub expected_goals: Vec<LeaderboardEntry>,
    pub expected_assists: Vec<LeaderboardEntry>,
}

/// Portrait of an athlete; id `0` yields the default silhouette.
pub fn athlete_image_url(athlete_id: u64) -> String {
    format!("{ATHLETE_IMAGE_BASE}/{athlete_id}")
}

pub fn team_logo_url(competitor_id: u64) -> String {
    format!("{TEAM_LOGO_BASE}/{competitor_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_value_accepts_numbers_and_strings() {
        let items: Vec<StatItem> = serde_json::from_str(
            r#"[{"typeId":1,"value":5},{"typeId":2,"value":"0.43"},{"typeId":3,"value":1.5}]"#,
        )
        .unwrap();
        let values: Vec<String> = items
            .iter()
            .filter_map(|i| i.value.as_ref())
            .map(ToString::to_string)
            .collect();
        assert_eq!(values, vec!["5", "0.43", "1.5"]);
    }

    #[test]
    fn test_null_or_missing_stat_value() {
        let items: Vec<StatItem> =
            serde_json::from_str(r#"[{"typeId":1,"value":null},{"typeId":2}]"#).unwrap();
        assert!(items.iter().all(|i| i.value.is_none()));
    }
}
