mod common;
mod league;
mod match_record;
mod standings;
mod stats;
mod stream_source;
mod team;

pub use common::*;
pub use league::*;
pub use match_record::*;
pub use standings::*;
pub use stats::*;
pub use stream_source::*;
pub use team::*;
