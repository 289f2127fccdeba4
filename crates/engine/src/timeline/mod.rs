//! Timeline Normalizer: day/clock anchors extracted from claims, rebased to
//! an article-relative day index, and checked for chronology signals.
//!
//! Nothing here reconstructs calendar dates.

mod clock;
mod consistency;
mod extract;

pub use clock::{find_clock_token, parse_clock_to_minutes, ClockReading};
pub use consistency::analyze_consistency;
pub use extract::{
    build_timeline_summary, extract_timeline_events, sort_events, sort_key, STRAY_DAY_BASE,
};
