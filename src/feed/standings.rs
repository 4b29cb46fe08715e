use itertools::Itertools;
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::feed;
use crate::model::{Competition, StandingGroup, StandingRow, StandingsResponse, StandingsTable};

const AFCON_GROUPS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];
const AFCON_GROUP_SIZE: usize = 4;

#[instrument(skip(client, config), fields(competition = %competition))]
pub(crate) async fn get_standings(
    client: &reqwest::Client,
    config: &ClientConfig,
    competition: Competition,
) -> Result<StandingsTable> {
    let url = standings_url(config, competition);
    let response: StandingsResponse = feed::get_json(client, config, &url).await?;
    let table = reshape_standings(response, competition.has_groups());
    let table = match competition {
        Competition::Afcon => normalize_afcon_groups(table),
        _ => table,
    };
    debug!(teams = table.team_count(), grouped = table.has_groups(), "parsed standings");
    Ok(table)
}

pub(crate) fn standings_url(config: &ClientConfig, competition: Competition) -> String {
    format!(
        "{}/web/standings/?langId={}&competitions={}",
        config.base_url,
        competition.lang_id(),
        competition.api_id()
    )
}

/// Turn the raw payload into a flat or grouped table.
///
/// Competitions flagged as having groups, and any payload with more than one
/// block, produce group tables in API order.
pub fn reshape_standings(response: StandingsResponse, has_groups: bool) -> StandingsTable {
    let mut blocks = response.standings;
    if blocks.is_empty() {
        return StandingsTable::Flat(vec![]);
    }
    if has_groups || blocks.len() > 1 {
        let groups = blocks
            .into_iter()
            .map(|block| StandingGroup {
                name: block.label().to_owned(),
                rows: block.rows,
            })
            .collect();
        return StandingsTable::Grouped(groups);
    }
    StandingsTable::Flat(blocks.swap_remove(0).rows)
}

/// Rebuild AFCON group tables as groups A to F of at most four teams.
///
/// The feed labels groups differently from the official draw, so letters are
/// remapped; rows that cannot be placed go to the first group with room.
pub fn normalize_afcon_groups(table: StandingsTable) -> StandingsTable {
    let groups = match table {
        StandingsTable::Grouped(groups) => groups,
        flat => return flat,
    };

    let mut slots: Vec<Vec<StandingRow>> = vec![Vec::new(); AFCON_GROUPS.len()];
    for group in groups {
        let target = group_letter(&group.name)
            .map(remap_afcon_letter)
            .and_then(|letter| AFCON_GROUPS.iter().position(|&l| l == letter));
        for row in group.rows {
            let slot = target
                .filter(|&i| slots[i].len() < AFCON_GROUP_SIZE)
                .or_else(|| slots.iter().position(|s| s.len() < AFCON_GROUP_SIZE));
            match slot {
                Some(i) => slots[i].push(row),
                None => debug!(team = %row.competitor.name, "no room left for team"),
            }
        }
    }

    let groups = AFCON_GROUPS
        .iter()
        .zip(slots)
        .filter(|(_, rows)| !rows.is_empty())
        .map(|(letter, rows)| StandingGroup {
            name: format!("Group {letter}"),
            rows,
        })
        .collect_vec();
    StandingsTable::Grouped(groups)
}

/// Extract the group letter from labels like `"Group A"` or `"Groupe c"`.
///
/// A standalone letter token wins over letters inside words, so `"Groupe c"`
/// is group C, not the `e` of `Groupe`.
fn group_letter(label: &str) -> Option<char> {
    let is_group_letter = |c: char| AFCON_GROUPS.contains(&c.to_ascii_uppercase());
    label
        .split_whitespace()
        .rev()
        .filter_map(|token| token.chars().exactly_one().ok())
        .find(|&c| is_group_letter(c))
        .or_else(|| label.chars().find(|&c| is_group_letter(c)))
        .map(|c| c.to_ascii_uppercase())
}

fn remap_afcon_letter(letter: char) -> char {
    match letter {
        'A' => 'B',
        'B' => 'C',
        'C' => 'A',
        'E' => 'F',
        'F' => 'E',
        other => other,
    }
}
