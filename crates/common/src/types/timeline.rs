use serde::{Deserialize, Serialize};

use crate::ids::ClaimId;
use crate::types::{ModuleStatus, Sufficiency};

/// A claim that carries a day or clock anchor.
///
/// `day_index` is article-relative (0 = the most frequently referenced
/// day), never an absolute calendar date. Values at or above the stray
/// base (10000) mark earlier, out-of-cluster day mentions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub claim_ref: ClaimId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_name: Option<String>,
    pub day_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_anchor: Option<String>,
    pub time_minutes: Option<u32>,
    /// True when the clock had no am/pm marker; the minutes are then only
    /// meaningful for relative ordering.
    #[serde(default)]
    pub time_ambiguous: bool,
    pub text: String,
    /// Extraction order; the final sort tiebreaker.
    #[serde(default)]
    pub original_index: usize,
}

/// Compact view of an event list so consumers never rescan raw events.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSummary {
    pub total_events: usize,
    pub anchored_days: usize,
    pub time_events: usize,
    pub first_day: Option<i64>,
    pub last_day: Option<i64>,
}

/// Counts derived from the sorted event list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineStats {
    pub total_events: usize,
    pub anchored_days: usize,
    pub events_with_time: usize,
    pub events_without_time: usize,
    /// Events whose clock had no am/pm. Counted, but kept out of every
    /// gap, compression, duplicate and dense-window comparison.
    #[serde(default)]
    pub ambiguous_time_events: usize,
    pub max_gap_minutes: Option<u32>,
    pub large_gap_count: usize,
    pub compressed_pair_count: usize,
    pub dense_window_count: usize,
    pub duplicate_timestamp_count: usize,
    pub day_span: Option<i64>,
    /// Day indices absent inside the anchored span. `None` when the check
    /// was skipped or there were no anchored days.
    pub missing_day_indices: Option<Vec<i64>>,
    pub stray_day_events: usize,
}

/// Boolean signals derived purely from [`TimelineStats`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineFlag {
    LargeTimeGapsPresent,
    CompressedTimeSequencesPresent,
    DuplicateTimestampsPresent,
    MissingDaysInSpan,
    MissingDayCheckSkippedSpanTooLarge,
    ManyEventsLackTimeMinutes,
    StrayDayMentionsPresent,
}

/// Chronology-consistency report. Never asserts what "really" happened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineConsistency {
    pub status: ModuleStatus,
    pub sufficiency: Sufficiency,
    pub stats: TimelineStats,
    pub flags: Vec<TimelineFlag>,
    pub notes: Vec<String>,
}

impl TimelineConsistency {
    pub fn has_flag(&self, flag: TimelineFlag) -> bool {
        self.flags.contains(&flag)
    }
}
