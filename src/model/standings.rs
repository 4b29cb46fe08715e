use serde::{Deserialize, Serialize};

use super::common::PLACEHOLDER_LOGO_URL;

const COMPETITOR_LOGO_BASE: &str = "https://imagecache.365scores.com/image/upload/f_png,w_48,h_48,c_limit,q_auto:eco,dpr_2,d_Competitors:default1.png";

/// Raw payload of the standings endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StandingsResponse {
    #[serde(default)]
    pub standings: Vec<StandingBlock>,
}

/// One standings table as returned by the API; a group in group stages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingBlock {
    pub display_name: Option<String>,
    pub group_name: Option<String>,
    #[serde(default)]
    pub rows: Vec<StandingRow>,
}

impl StandingBlock {
    /// Label of the block, falling back to `"Group"`.
    pub fn label(&self) -> &str {
        [self.display_name.as_deref(), self.group_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|name| !name.is_empty())
            .unwrap_or("Group")
    }
}

/// A team's line in a standings table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingRow {
    #[serde(default)]
    pub competitor: Competitor,
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub points: f64,
    #[serde(default)]
    pub game_played: u32,
    #[serde(default)]
    pub games_won: u32,
    #[serde(default)]
    pub games_even: Option<u32>,
    #[serde(default)]
    pub games_lost: Option<u32>,
    #[serde(default)]
    pub ratio: Option<f64>,
}

/// Team reference inside a standings row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    pub image_version: Option<u32>,
}

impl Competitor {
    /// Team crest from the 365scores image cache, or the placeholder when
    /// the competitor has no id.
    pub fn logo_url(&self) -> String {
        match self.id {
            Some(id) => format!(
                "{COMPETITOR_LOGO_BASE}/v{}/Competitors/{id}",
                self.image_version.unwrap_or(1)
            ),
            None => PLACEHOLDER_LOGO_URL.to_owned(),
        }
    }
}

/// A named group of standings rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingGroup {
    pub name: String,
    pub rows: Vec<StandingRow>,
}

/// Standings reshaped for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum StandingsTable {
    /// A single league table.
    Flat(Vec<StandingRow>),
    /// Group tables in API order.
    Grouped(Vec<StandingGroup>),
}

impl StandingsTable {
    pub fn has_groups(&self) -> bool {
        matches!(self, StandingsTable::Grouped(_))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            StandingsTable::Flat(rows) => rows.is_empty(),
            StandingsTable::Grouped(groups) => groups.iter().all(|g| g.rows.is_empty()),
        }
    }

    pub fn team_count(&self) -> usize {
        match self {
            StandingsTable::Flat(rows) => rows.len(),
            StandingsTable::Grouped(groups) => groups.iter().map(|g| g.rows.len()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competitor_logo_url() {
        let competitor = Competitor {
            id: Some(2387),
            name: "Cameroon".to_owned(),
            image_version: None,
        };
        assert!(competitor.logo_url().ends_with("/v1/Competitors/2387"));
        assert_eq!(Competitor::default().logo_url(), PLACEHOLDER_LOGO_URL);
    }

    #[test]
    fn test_block_label_fallbacks() {
        let block = StandingBlock {
            display_name: Some(" ".to_owned()),
            group_name: None,
            rows: vec![],
        };
        assert_eq!(block.label(), "Group");

        let block = StandingBlock {
            display_name: None,
            group_name: Some("Group C".to_owned()),
            rows: vec![],
        };
        assert_eq!(block.label(), "Group C");
    }
}
