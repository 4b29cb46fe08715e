use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::feed;
use crate::model::{
    athlete_image_url, team_logo_url, AthleteStatCategory, Competition, LeaderboardEntry,
    PlayerLeaderboards, StatsResponse,
};

/// Players shown per leaderboard.
pub const LEADERBOARD_SIZE: usize = 20;

const GOALS: &[&str] = &["Goals", "Goal", "Goals Scored"];
const ASSISTS: &[&str] = &["Assists", "Assist"];
const EXPECTED_GOALS: &[&str] = &["Expected Goals", "xG"];
const EXPECTED_ASSISTS: &[&str] = &["Expected Assists", "xA"];

#[instrument(skip(client, config), fields(competition = %competition))]
pub(crate) async fn get_player_stats(
    client: &reqwest::Client,
    config: &ClientConfig,
    competition: Competition,
) -> Result<PlayerLeaderboards> {
    let url = stats_url(config, competition);
    let response: StatsResponse = feed::get_json(client, config, &url).await?;
    let boards = leaderboards(&response);
    debug!(
        categories = response.stats.athletes_stats.len(),
        goals = boards.goals.len(),
        "parsed player stats"
    );
    Ok(boards)
}

pub(crate) fn stats_url(config: &ClientConfig, competition: Competition) -> String {
    format!(
        "{}/web/stats/?appTypeId=5&langId={}&competitions={}&competitors=&withSeasons=true",
        config.base_url,
        competition.stats_lang_id(),
        competition.api_id()
    )
}

/// Pick the goal, assist and expected-value categories out of the payload.
pub fn leaderboards(response: &StatsResponse) -> PlayerLeaderboards {
    let categories = &response.stats.athletes_stats;
    let board = |names: &[&str]| {
        find_category(categories, names)
            .map(leaderboard)
            .unwrap_or_default()
    };
    PlayerLeaderboards {
        goals: board(GOALS),
        assists: board(ASSISTS),
        expected_goals: board(EXPECTED_GOALS),
        expected_assists: board(EXPECTED_ASSISTS),
    }
}

fn find_category<'a>(
    categories: &'a [AthleteStatCategory],
    names: &[&str],
) -> Option<&'a AthleteStatCategory> {
    categories.iter().find(|category| {
        names
            .iter()
            .any(|name| name.eq_ignore_ascii_case(category.name.trim()))
    })
}

fn leaderboard(category: &AthleteStatCategory) -> Vec<LeaderboardEntry> {
    category
        .rows
        .iter()
        .take(LEADERBOARD_SIZE)
        .enumerate()
        .map(|(i, row)| LeaderboardEntry {
            rank: i + 1,
            athlete: row.entity.clone(),
            value: row
                .stats
                .first()
                .and_then(|s| s.value.as_ref())
                .map(ToString::to_string)
                .unwrap_or_else(|| "0".to_owned()),
            image_url: athlete_image_url(row.entity.id),
            team_logo_url: row.entity.competitor_id.map(team_logo_url),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::decode;

    const STATS_JSON: &str = r#"{
        "stats": {
            "athletesStats": [
                {"id": 1, "name": "goals", "rows": [
                    {"entity": {"id": 65760, "name": "Mohamed Salah", "competitorId": 108, "positionName": "Forward"},
                     "stats": [{"typeId": 1, "value": "6"}]},
                    {"entity": {"id": 12, "name": "Nobody"}, "stats": []}
                ]},
                {"id": 2, "name": "Expected Goals", "rows": [
                    {"entity": {"id": 65760, "name": "Mohamed Salah"}, "stats": [{"typeId": 9, "value": 4.75}]}
                ]}
            ]
        }
    }"#;

    #[test]
    fn test_leaderboards_match_categories_case_insensitively() {
        let response: StatsResponse = decode("test", STATS_JSON).unwrap();
        let boards = leaderboards(&response);

        assert_eq!(boards.goals.len(), 2);
        let top = &boards.goals[0];
        assert_eq!(top.rank, 1);
        assert_eq!(top.athlete.name, "Mohamed Salah");
        assert_eq!(top.value, "6");
        assert!(top.image_url.ends_with("/Athletes/65760"));
        assert!(top.team_logo_url.as_deref().unwrap().ends_with("/Competitors/108"));

        assert_eq!(boards.goals[1].value, "0");
        assert!(boards.goals[1].team_logo_url.is_none());

        assert_eq!(boards.expected_goals[0].value, "4.75");
        assert!(boards.assists.is_empty());
        assert!(boards.expected_assists.is_empty());
    }

    #[test]
    fn test_leaderboard_is_truncated() {
        let rows: Vec<String> = (0..30)
            .map(|i| format!(r#"{{"entity": {{"id": {i}, "name": "P{i}"}}, "stats": [{{"typeId": 1, "value": {i}}}]}}"#))
            .collect();
        let body = format!(
            r#"{{"stats": {{"athletesStats": [{{"name": "Assists", "rows": [{}]}}]}}}}"#,
            rows.join(",")
        );
        let response: StatsResponse = decode("test", &body).unwrap();
        let boards = leaderboards(&response);
        assert_eq!(boards.assists.len(), LEADERBOARD_SIZE);
        assert_eq!(boards.assists.last().unwrap().rank, LEADERBOARD_SIZE);
    }

    #[test]
    fn test_null_stat_value_reads_as_zero() {
        let response: StatsResponse = decode(
            "test",
            r#"{"stats": {"athletesStats": [{"name": "Goals", "rows": [
                {"entity": {"id": 1, "name": "Osimhen"}, "stats": [{"typeId": 1, "value": 5}]},
                {"entity": {"id": 2, "name": "Lookman"}, "stats": [{"typeId": 1, "value": null}]},
                {"entity": {"id": 3, "name": "Salah"}, "stats": [{"typeId": 1}]}
            ]}]}}"#,
        )
        .unwrap();
        let values: Vec<_> = leaderboards(&response)
            .goals
            .into_iter()
            .map(|e| e.value)
            .collect();
        assert_eq!(values, vec!["5", "0", "0"]);
    }

    #[test]
    fn test_missing_stats_body() {
        let response: StatsResponse = decode("test", "{}").unwrap();
        assert_eq!(leaderboards(&response), PlayerLeaderboards::default());
    }

    #[test]
    fn test_stats_url() {
        let config = ClientConfig::default();
        assert_eq!(
            stats_url(&config, Competition::Afcon),
            "https://webws.365scores.com/web/stats/?appTypeId=5&langId=10&competitions=167&competitors=&withSeasons=true"
        );
        assert_eq!(
            stats_url(&config, Competition::PremierLeague),
            "https://webws.365scores.com/web/stats/?appTypeId=5&langId=1&competitions=7&competitors=&withSeasons=true"
        );
    }
}
