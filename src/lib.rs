//! Match lifecycle classification, stream selection and 365scores standings
//! for a live football companion app.

mod client;
mod config;
mod error;
pub mod feed;
pub mod lifecycle;
pub mod model;
pub mod preferences;
pub mod refresh;
pub mod schedule;
pub mod stream;
pub mod ticker;

pub use client::SportsClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{MatchdayError, Result};
pub use feed::standings::{normalize_afcon_groups, reshape_standings};
pub use feed::stats::{leaderboards, LEADERBOARD_SIZE};
pub use feed::FeedKind;
pub use lifecycle::{bucket, classify, evaluate, Buckets, CardState, Countdown, MatchStatus};
pub use model::*;
pub use preferences::{DarkModePreference, JsonFileStore, KeyValueStore, MemoryStore};
pub use refresh::{RefreshGate, RefreshOutcome};
pub use schedule::{MatchSource, ScheduleView, StaticMatchSource};
pub use stream::{MediaKind, Playback, SelectOutcome, StreamSelector};
pub use ticker::{Clock, ManualClock, StatusTicker, SystemClock};
