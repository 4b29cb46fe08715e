//! Time-window classification of matches.
//!
//! Everything here is a pure function of a kickoff instant and an injected
//! `now`; nothing is remembered between evaluations.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::model::MatchRecord;

/// Matches become "starting soon" this long before kickoff.
pub const STARTING_SOON_WINDOW: Duration = Duration::minutes(30);
/// Matches are shown as live from this long before kickoff.
pub const LIVE_LEAD: Duration = Duration::minutes(5);
/// Matches are considered over this long after kickoff.
pub const MATCH_LENGTH: Duration = Duration::minutes(120);
/// Span of the countdown ring.
pub const COUNTDOWN_RING_SECS: i64 = 3 * 3600;

/// Lifecycle state of a match at one evaluation instant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, strum_macros::Display,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum MatchStatus {
    Upcoming,
    StartingSoon,
    Live,
    Ended,
}

impl MatchStatus {
    /// Whether the "watch" affordance is offered.
    pub fn can_watch(self) -> bool {
        matches!(self, MatchStatus::StartingSoon | MatchStatus::Live)
    }
}

/// Classify a match by the elapsed time since kickoff.
pub fn classify(kickoff: DateTime<Utc>, now: DateTime<Utc>) -> MatchStatus {
    let elapsed = now - kickoff;
    if elapsed >= MATCH_LENGTH {
        MatchStatus::Ended
    } else if elapsed >= -LIVE_LEAD {
        MatchStatus::Live
    } else if elapsed >= -STARTING_SOON_WINDOW {
        MatchStatus::StartingSoon
    } else {
        MatchStatus::Upcoming
    }
}

/// Time left until kickoff, decomposed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    /// Decompose the remaining time, clamping anything past kickoff to zero.
    pub fn until(kickoff: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let remaining_ms = (kickoff - now).num_milliseconds().max(0);
        Self {
            hours: remaining_ms / 3_600_000,
            minutes: remaining_ms % 3_600_000 / 60_000,
            seconds: remaining_ms % 60_000 / 1000,
        }
    }

    pub fn total_seconds(&self) -> i64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }

    /// Share of the three-hour ring still to elapse, in percent.
    pub fn progress_percent(&self) -> f64 {
        let fraction = self.total_seconds() as f64 / COUNTDOWN_RING_SECS as f64;
        fraction.clamp(0.0, 1.0) * 100.0
    }
}

impl Display for Countdown {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// What a match card shows at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardState {
    pub status: MatchStatus,
    /// Only present while the match is upcoming.
    pub countdown: Option<Countdown>,
}

impl CardState {
    pub fn can_watch(&self) -> bool {
        self.status.can_watch()
    }
}

pub fn evaluate(kickoff: DateTime<Utc>, now: DateTime<Utc>) -> CardState {
    let status = classify(kickoff, now);
    let countdown = (status == MatchStatus::Upcoming).then(|| Countdown::until(kickoff, now));
    CardState { status, countdown }
}

/// A record whose kickoff parsed successfully.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledMatch {
    pub kickoff: DateTime<Utc>,
    pub record: MatchRecord,
}

impl ScheduledMatch {
    pub fn status(&self, now: DateTime<Utc>) -> MatchStatus {
        classify(self.kickoff, now)
    }
}

/// A record left out of every bucket because its kickoff did not parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedMatch {
    pub record: MatchRecord,
    pub reason: String,
}

/// Match list partitioned for the schedule page and the live ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Buckets {
    /// Not yet finished, soonest kickoff first.
    pub ongoing_or_upcoming: Vec<ScheduledMatch>,
    /// Finished, most recent kickoff first.
    pub ended: Vec<ScheduledMatch>,
    /// The part of `ongoing_or_upcoming` already inside the live lead.
    pub live: Vec<ScheduledMatch>,
    pub rejected: Vec<RejectedMatch>,
}

impl Buckets {
    pub fn is_empty(&self) -> bool {
        self.ongoing_or_upcoming.is_empty() && self.ended.is_empty()
    }
}

/// Partition and sort `matches` relative to `now`.
pub fn bucket<I>(matches: I, now: DateTime<Utc>) -> Buckets
where
    I: IntoIterator<Item = MatchRecord>,
{
    let mut buckets = Buckets::default();

    for record in matches {
        match record.kickoff() {
            Ok(kickoff) => {
                let scheduled = ScheduledMatch { kickoff, record };
                if now - kickoff >= MATCH_LENGTH {
                    buckets.ended.push(scheduled);
                } else {
                    buckets.ongoing_or_upcoming.push(scheduled);
                }
            }
            Err(e) => {
                warn!(error = %e, "dropping match with invalid kickoff");
                buckets.rejected.push(RejectedMatch {
                    record,
                    reason: e.to_string(),
                });
            }
        }
    }

    buckets.ongoing_or_upcoming.sort_by_key(|m| m.kickoff);
    buckets.ended.sort_by(|a, b| b.kickoff.cmp(&a.kickoff));
    buckets.live = buckets
        .ongoing_or_upcoming
        .iter()
        .filter(|m| now - m.kickoff >= -LIVE_LEAD)
        .cloned()
        .collect();

    debug!(
        ongoing = buckets.ongoing_or_upcoming.len(),
        ended = buckets.ended.len(),
        live = buckets.live.len(),
        rejected = buckets.rejected.len(),
        "bucketed matches"
    );
    buckets
}
