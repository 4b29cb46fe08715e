use serde::{Deserialize, Serialize};

const COMPETITION_LOGO_BASE: &str = "https://imagecache.365scores.com/image/upload/f_png,w_68,h_68,c_limit,q_auto:eco,dpr_2";

/// Competitions the app shows standings and player statistics for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Competition {
    Afcon,
    Ligue1Mobilis,
    PremierLeague,
    SerieA,
    LaLiga,
    Bundesliga,
    Ligue1,
    Eredivisie,
    ChampionsLeague,
    EuropaLeague,
    ConferenceLeague,
    EgyptianPremierLeague,
    BotolaPro,
    TunisiaLigue1,
    SaudiLeague,
}

impl Competition {
    /// 365scores competition id.
    pub fn api_id(self) -> u32 {
        match self {
            Competition::Afcon => 167,
            Competition::Ligue1Mobilis => 560,
            Competition::PremierLeague => 7,
            Competition::SerieA => 17,
            Competition::LaLiga => 11,
            Competition::Bundesliga => 25,
            Competition::Ligue1 => 35,
            Competition::Eredivisie => 57,
            Competition::ChampionsLeague => 572,
            Competition::EuropaLeague => 573,
            Competition::ConferenceLeague => 7685,
            Competition::EgyptianPremierLeague => 552,
            Competition::BotolaPro => 557,
            Competition::TunisiaLigue1 => 554,
            Competition::SaudiLeague => 649,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Competition::Afcon => "AFCON 2025",
            Competition::Ligue1Mobilis => "Ligue 1 Mobilis",
            Competition::PremierLeague => "Premier League",
            Competition::SerieA => "Serie A",
            Competition::LaLiga => "La Liga",
            Competition::Bundesliga => "Bundesliga",
            Competition::Ligue1 => "Ligue 1",
            Competition::Eredivisie => "Eredivisie",
            Competition::ChampionsLeague => "Champions League",
            Competition::EuropaLeague => "Europa League",
            Competition::ConferenceLeague => "Conference League",
            Competition::EgyptianPremierLeague => "Egyptian Premier League",
            Competition::BotolaPro => "Botola Pro",
            Competition::TunisiaLigue1 => "Tunisia Ligue 1",
            Competition::SaudiLeague => "Saudi League",
        }
    }

    /// Language id the standings feed is requested in.
    pub fn lang_id(self) -> u8 {
        match self {
            Competition::Afcon
            | Competition::Ligue1Mobilis
            | Competition::PremierLeague
            | Competition::LaLiga
            | Competition::Bundesliga => 15,
            _ => 1,
        }
    }

    /// Language id the player statistics feed is requested in.
    pub fn stats_lang_id(self) -> u8 {
        match self {
            Competition::Afcon | Competition::Ligue1Mobilis | Competition::LaLiga => 10,
            _ => 1,
        }
    }

    /// Whether standings are published as group tables.
    pub fn has_groups(self) -> bool {
        matches!(self, Competition::Afcon)
    }

    pub fn logo_url(self) -> String {
        match self {
            Competition::Ligue1Mobilis => {
                "https://images.fotmob.com/image_resources/logo/leaguelogo/516.png".to_owned()
            }
            other => format!(
                "{COMPETITION_LOGO_BASE}/v5/Competitions/light/{}",
                other.api_id()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<u32> = Competition::iter().map(Competition::api_id).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_string_round_trip() {
        assert_eq!(Competition::ChampionsLeague.to_string(), "champions-league");
        assert_eq!(
            Competition::from_str("tunisia-ligue1").unwrap(),
            Competition::TunisiaLigue1
        );
    }

    #[test]
    fn test_feed_language_ids() {
        assert_eq!(Competition::PremierLeague.lang_id(), 15);
        assert_eq!(Competition::PremierLeague.stats_lang_id(), 1);
        assert_eq!(Competition::LaLiga.stats_lang_id(), 10);
        assert_eq!(Competition::SerieA.lang_id(), 1);
    }

    #[test]
    fn test_only_afcon_has_groups() {
        let grouped: Vec<_> = Competition::iter().filter(|c| c.has_groups()).collect();
        assert_eq!(grouped, vec![Competition::Afcon]);
    }
}
