use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;

use biaslens_common::config::TimelineConfig;
use biaslens_common::types::{Claim, TimelineEvent, TimelineSummary};

use super::clock::{find_clock_token, parse_clock_to_minutes};

/// Day indices at or above this mark stray, earlier-than-cluster mentions.
pub const STRAY_DAY_BASE: i64 = 10_000;

static WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b((?:mon|tues|wednes|thurs|fri|satur|sun)day)\b").unwrap()
});

/// Month names, matched case-sensitively. Unlike the weekday pattern this
/// carries no `(?i)`: lower-case "may" and "march" are usually verbs, so
/// only a capitalized month counts as a date mention.
static MONTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\b",
    )
    .unwrap()
});

fn weekday_number(day: &str) -> Option<i64> {
    let n = match day {
        "monday" => 0,
        "tuesday" => 1,
        "wednesday" => 2,
        "thursday" => 3,
        "friday" => 4,
        "saturday" => 5,
        "sunday" => 6,
        _ => return None,
    };
    Some(n)
}

/// Extract day/clock-anchored events from claims and put them in a total
/// chronological order.
///
/// Weekdays are resolved to an article-relative day index in one pass over
/// claim order (a weekday falling well behind the last one starts a new
/// week), then rebased so the most frequently referenced day is 0. Days
/// still negative after rebasing are pushed past [`STRAY_DAY_BASE`], and
/// events with a time but no day join the earliest anchored day.
pub fn extract_timeline_events(claims: &[Claim], config: &TimelineConfig) -> Vec<TimelineEvent> {
    let mut events: Vec<TimelineEvent> = claims
        .iter()
        .filter(|c| c.is_usable())
        .filter_map(event_from_claim)
        .enumerate()
        .map(|(i, mut e)| {
            e.original_index = i;
            e
        })
        .collect();

    resolve_day_indices(&mut events, config.week_rollover_tolerance_days);
    attach_time_only_events(&mut events);
    sort_events(&mut events);

    metrics::counter!("timeline.events_extracted").increment(events.len() as u64);
    tracing::info!(
        claims = claims.len(),
        events = events.len(),
        "Timeline extraction complete"
    );

    events
}

fn event_from_claim(claim: &Claim) -> Option<TimelineEvent> {
    let text = claim.text.trim();
    let weekday = WEEKDAY_RE.captures(text).map(|c| c[1].to_lowercase());
    let has_month = MONTH_RE.is_match(text);
    let clock = find_clock_token(text);

    if weekday.is_none() && !has_month && clock.is_none() {
        return None;
    }

    let reading = clock.and_then(parse_clock_to_minutes);
    Some(TimelineEvent {
        claim_ref: claim.id.clone(),
        day_name: weekday,
        day_index: None,
        time_anchor: clock.map(str::to_string),
        time_minutes: reading.map(|r| r.minutes),
        time_ambiguous: reading.is_some_and(|r| r.ambiguous),
        text: text.to_string(),
        original_index: 0,
    })
}

fn resolve_day_indices(events: &mut [TimelineEvent], tolerance: i64) {
    let mut last_abs: Option<i64> = None;
    let mut week_offset = 0;
    let mut known: Vec<i64> = Vec::new();

    for event in events.iter_mut() {
        let Some(base) = event.day_name.as_deref().and_then(weekday_number) else {
            continue;
        };
        let abs_day = match last_abs {
            None => base,
            Some(last) => {
                let mut candidate = base + week_offset;
                if candidate < last - tolerance {
                    week_offset += 7;
                    candidate = base + week_offset;
                }
                candidate
            }
        };
        last_abs = Some(abs_day);
        event.day_index = Some(abs_day);
        known.push(abs_day);
    }

    let Some(mode) = mode_first_encountered(&known) else {
        return;
    };
    for event in events.iter_mut() {
        if let Some(day) = event.day_index {
            let rebased = day - mode;
            event.day_index = Some(if rebased < 0 {
                STRAY_DAY_BASE + rebased.abs()
            } else {
                rebased
            });
        }
    }
}

/// Most frequent value; ties go to whichever appeared first.
fn mode_first_encountered(values: &[i64]) -> Option<i64> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(*v).or_default() += 1;
    }
    let best = counts.values().copied().max()?;
    values.iter().copied().find(|v| counts[v] == best)
}

fn attach_time_only_events(events: &mut [TimelineEvent]) {
    let Some(base_day) = events
        .iter()
        .filter_map(|e| e.day_index)
        .filter(|d| *d < STRAY_DAY_BASE)
        .min()
    else {
        return;
    };
    for event in events.iter_mut() {
        if event.day_index.is_none() && event.time_minutes.is_some() {
            event.day_index = Some(base_day);
        }
    }
}

/// Sort key `(day or STRAY_DAY_BASE, time or -1, original_index)`.
pub fn sort_key(event: &TimelineEvent) -> (i64, i64, usize) {
    (
        event.day_index.unwrap_or(STRAY_DAY_BASE),
        event.time_minutes.map(i64::from).unwrap_or(-1),
        event.original_index,
    )
}

/// Put events in their total order. Idempotent and independent of the
/// incoming permutation.
pub fn sort_events(events: &mut [TimelineEvent]) {
    events.sort_by_key(sort_key);
}

/// Presence counts over an extracted event list. Stray days are excluded
/// from the day figures.
pub fn build_timeline_summary(events: &[TimelineEvent]) -> TimelineSummary {
    let days: BTreeSet<i64> = events
        .iter()
        .filter_map(|e| e.day_index)
        .filter(|d| *d < STRAY_DAY_BASE)
        .collect();

    TimelineSummary {
        total_events: events.len(),
        anchored_days: days.len(),
        time_events: events.iter().filter(|e| e.time_minutes.is_some()).count(),
        first_day: days.first().copied(),
        last_day: days.last().copied(),
    }
}
