use chrono::{Duration, Utc};

use matchday::{
    Competition, FeedKind, MatchRecord, ScheduleView, SportsClient, StaticMatchSource,
    StreamSelector, StreamSource, Team,
};

fn fixture(home: &str, away: &str, kickoff_in: Duration) -> MatchRecord {
    MatchRecord {
        team1: Team::new(home, ""),
        team2: Team::new(away, ""),
        competition_name: Competition::Afcon.display_name().to_owned(),
        competition_logo_url: Competition::Afcon.logo_url(),
        competition_logo_url_dark: String::new(),
        kickoff_time: (Utc::now() + kickoff_in).to_rfc3339(),
        streams: StreamSource::from_slots(
            Some("https://example.com/live/video.m3u8"),
            None,
            Some("https://example.com/embed/1"),
            None,
        ),
    }
}

#[tokio::main]
async fn main() {
    let source = StaticMatchSource::new(vec![
        fixture("Morocco", "Comoros", Duration::minutes(-40)),
        fixture("Mali", "Zambia", Duration::minutes(20)),
        fixture("Egypt", "Zimbabwe", Duration::hours(5)),
        fixture("Senegal", "Botswana", Duration::hours(-4)),
    ]);

    let now = Utc::now();
    let view = ScheduleView::build(&source, None, now);
    println!("Live now: {}", view.buckets.live.len());
    for m in &view.buckets.ongoing_or_upcoming {
        let state = matchday::evaluate(m.kickoff, now);
        let countdown = state.countdown.map(|c| c.to_string()).unwrap_or_default();
        println!(
            "{} vs {}: {} {countdown}",
            m.record.team1.display_name(),
            m.record.team2.display_name(),
            state.status
        );
        if state.can_watch() {
            if let Some(selector) = StreamSelector::new(m.record.streams.clone()) {
                println!("  watch: {:?}", selector.playback());
            }
        }
    }
    println!("Ended: {}", view.buckets.ended.len());

    match SportsClient::new().get_standings(Competition::Afcon).await {
        Ok(table) => println!("AFCON standings: {} teams", table.team_count()),
        Err(e) => println!("{} ({e})", FeedKind::Standings.failure_message()),
    }
}
