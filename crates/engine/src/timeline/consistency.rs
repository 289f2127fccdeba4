use std::collections::{BTreeMap, BTreeSet};

use biaslens_common::config::TimelineConfig;
use biaslens_common::types::{
    ModuleStatus, Sufficiency, TimelineConsistency, TimelineEvent, TimelineFlag, TimelineStats,
};

use super::extract::STRAY_DAY_BASE;

/// Per-day time statistics accumulated across all anchored days.
#[derive(Default)]
struct GapCounts {
    max_gap: Option<u32>,
    large: usize,
    compressed: usize,
    dense: usize,
    duplicates: usize,
}

/// Chronology-consistency signals for a sorted event list.
///
/// Pure function of the extracted anchors: it reports gaps, compression,
/// duplicates and holes in the day span, never what "really" happened.
pub fn analyze_consistency(events: &[TimelineEvent], config: &TimelineConfig) -> TimelineConsistency {
    if events.is_empty() {
        return TimelineConsistency {
            status: ModuleStatus::Run,
            sufficiency: Sufficiency::InsufficientData,
            stats: TimelineStats::default(),
            flags: Vec::new(),
            notes: vec!["No timeline events extracted; consistency not assessed.".to_string()],
        };
    }

    let mut times_by_day: BTreeMap<i64, Vec<u32>> = BTreeMap::new();
    let mut days: BTreeSet<i64> = BTreeSet::new();
    for event in events {
        let Some(day) = event.day_index.filter(|d| *d < STRAY_DAY_BASE) else {
            continue;
        };
        days.insert(day);
        // A clock without am/pm only orders events; it is never absolute.
        if let Some(t) = event.time_minutes.filter(|_| !event.time_ambiguous) {
            times_by_day.entry(day).or_default().push(t);
        }
    }

    let mut gaps = GapCounts::default();
    for times in times_by_day.values_mut() {
        times.sort_unstable();
        count_day(times, config, &mut gaps);
    }

    let events_with_time = events.iter().filter(|e| e.time_minutes.is_some()).count();
    let ambiguous_time_events = events
        .iter()
        .filter(|e| e.time_minutes.is_some() && e.time_ambiguous)
        .count();
    let stray_day_events = events
        .iter()
        .filter(|e| e.day_index.is_some_and(|d| d >= STRAY_DAY_BASE))
        .count();

    let day_span = match (days.first(), days.last()) {
        (Some(first), Some(last)) => Some(last - first),
        _ => None,
    };
    let mut span_check_skipped = false;
    let missing_day_indices = match (days.first(), day_span) {
        (Some(&first), Some(span)) if span <= config.missing_day_max_span => Some(
            (first..=first + span)
                .filter(|d| !days.contains(d))
                .collect::<Vec<i64>>(),
        ),
        (Some(_), Some(_)) => {
            span_check_skipped = true;
            None
        }
        _ => None,
    };

    let stats = TimelineStats {
        total_events: events.len(),
        anchored_days: days.len(),
        events_with_time,
        events_without_time: events.len() - events_with_time,
        ambiguous_time_events,
        max_gap_minutes: gaps.max_gap,
        large_gap_count: gaps.large,
        compressed_pair_count: gaps.compressed,
        dense_window_count: gaps.dense,
        duplicate_timestamp_count: gaps.duplicates,
        day_span,
        missing_day_indices,
        stray_day_events,
    };

    let flags = derive_flags(&stats, span_check_skipped, config);
    tracing::info!(
        events = stats.total_events,
        anchored_days = stats.anchored_days,
        flags = flags.len(),
        "Timeline consistency analyzed"
    );

    let notes = vec![
        "Derived from extracted day/time anchors only; no external facts or inferred events.".to_string(),
        format!(
            "thresholds: large_gap>={}m compressed<={}m dense>={} events/{}m missing_day_span<={}",
            config.large_gap_minutes,
            config.compression_max_delta_minutes,
            config.cluster_min_events,
            config.cluster_window_minutes,
            config.missing_day_max_span
        ),
    ];

    TimelineConsistency {
        status: ModuleStatus::Run,
        sufficiency: Sufficiency::Sufficient,
        stats,
        flags,
        notes,
    }
}

fn count_day(times: &[u32], config: &TimelineConfig, gaps: &mut GapCounts) {
    for pair in times.windows(2) {
        let delta = pair[1] - pair[0];
        gaps.max_gap = Some(gaps.max_gap.map_or(delta, |m| m.max(delta)));
        if delta >= config.large_gap_minutes {
            gaps.large += 1;
        }
        if delta <= config.compression_max_delta_minutes {
            gaps.compressed += 1;
        }
        if delta == 0 {
            gaps.duplicates += 1;
        }
    }
    gaps.dense += count_dense_windows(times, config.cluster_window_minutes, config.cluster_min_events);
}

/// Two-pointer sweep over sorted times. Each detected window advances the
/// left edge once so one dense run is not counted at every step.
fn count_dense_windows(times: &[u32], window: u32, min_events: usize) -> usize {
    let mut count = 0;
    let mut left = 0;
    for right in 0..times.len() {
        while left < right && times[right] - times[left] > window {
            left += 1;
        }
        if left <= right && right - left + 1 >= min_events {
            count += 1;
            left += 1;
        }
    }
    count
}

fn derive_flags(stats: &TimelineStats, span_check_skipped: bool, config: &TimelineConfig) -> Vec<TimelineFlag> {
    let mut flags = Vec::new();
    if stats.large_gap_count > 0 {
        flags.push(TimelineFlag::LargeTimeGapsPresent);
    }
    if stats.compressed_pair_count > 0 || stats.dense_window_count > 0 {
        flags.push(TimelineFlag::CompressedTimeSequencesPresent);
    }
    if stats.duplicate_timestamp_count > 0 {
        flags.push(TimelineFlag::DuplicateTimestampsPresent);
    }
    if stats
        .missing_day_indices
        .as_ref()
        .is_some_and(|missing| !missing.is_empty())
    {
        flags.push(TimelineFlag::MissingDaysInSpan);
    }
    if span_check_skipped {
        flags.push(TimelineFlag::MissingDayCheckSkippedSpanTooLarge);
    }
    if stats.total_events >= config.sparse_time_min_events
        && stats.events_without_time as f64 / stats.total_events as f64 >= config.sparse_time_ratio
    {
        flags.push(TimelineFlag::ManyEventsLackTimeMinutes);
    }
    if stats.stray_day_events > 0 {
        flags.push(TimelineFlag::StrayDayMentionsPresent);
    }
    flags
}
