use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{RatingTable, Severity};

/// Top-level signal-engine configuration, deserialized from signals.toml.
///
/// Every section defaults independently, so a partial file only overrides
/// what it names.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    pub evidence: EvidenceConfig,
    pub claims: ClaimEvaluatorConfig,
    pub timeline: TimelineConfig,
    pub omissions: OmissionConfig,
    /// Canonical star → label/color table shared by every rating consumer.
    pub rating: RatingTable,
}

/// Evidence segmentation parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceConfig {
    /// Segment the source text into evidence when the caller supplied none.
    pub segment_when_empty: bool,
    /// Max evidence items produced by segmentation.
    pub max_segment_items: usize,
    /// Paragraph quotes are clipped to this many characters (verbatim prefix).
    pub paragraph_clip_chars: usize,
    /// Sentence quotes are clipped to this many characters (verbatim prefix).
    pub sentence_clip_chars: usize,
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            segment_when_empty: true,
            max_segment_items: 40,
            paragraph_clip_chars: 420,
            sentence_clip_chars: 280,
        }
    }
}

/// Claim evaluator switches and scoring weights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimEvaluatorConfig {
    /// Flag bare "causes/caused" as a weak `causal_verb_phrase` signal.
    /// Off by default: it over-triggers on unremarkable prose.
    pub flag_causal_verb_phrase: bool,
    pub severity_weights: SeverityWeights,
    /// Extra deduction points per issue type name, on top of severity.
    pub issue_weights: BTreeMap<String, u32>,
    /// Normalization factor growth per additional claim.
    pub damping_per_claim: f64,
    /// Cap on normalization growth (factor never exceeds 1 + this).
    pub max_damping: f64,
}

impl Default for ClaimEvaluatorConfig {
    fn default() -> Self {
        Self {
            flag_causal_verb_phrase: false,
            severity_weights: SeverityWeights::default(),
            issue_weights: BTreeMap::new(),
            damping_per_claim: 0.1,
            max_damping: 0.7,
        }
    }
}

/// Deduction points per issue severity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityWeights {
    pub low: u32,
    pub moderate: u32,
    pub elevated: u32,
    pub high: u32,
}

impl SeverityWeights {
    pub fn weight(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Low => self.low,
            Severity::Moderate => self.moderate,
            Severity::Elevated => self.elevated,
            Severity::High => self.high,
        }
    }
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            low: 4,
            moderate: 10,
            elevated: 18,
            high: 28,
        }
    }
}

/// Chronology heuristics. The defaults have no documented derivation and
/// are kept overridable rather than tuned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// A weekday this many days (or more) behind the last anchor starts a new week.
    pub week_rollover_tolerance_days: i64,
    /// Same-day gaps at or above this are "large".
    pub large_gap_minutes: u32,
    /// Adjacent same-day deltas at or below this are "compressed".
    pub compression_max_delta_minutes: u32,
    /// Rolling window width for dense-cluster detection.
    pub cluster_window_minutes: u32,
    /// Events needed inside one window to count as a dense cluster.
    pub cluster_min_events: usize,
    /// Missing-day detection only runs when the anchored span is at most this.
    pub missing_day_max_span: i64,
    /// Minimum total events before the lacking-time ratio is judged.
    pub sparse_time_min_events: usize,
    /// Share of events without a time that raises `many_events_lack_time_minutes`.
    pub sparse_time_ratio: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            week_rollover_tolerance_days: 3,
            large_gap_minutes: 180,
            compression_max_delta_minutes: 3,
            cluster_window_minutes: 10,
            cluster_min_events: 3,
            missing_day_max_span: 14,
            sparse_time_min_events: 5,
            sparse_time_ratio: 0.6,
        }
    }
}

/// Omission detector parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OmissionConfig {
    /// Characters on each side of a trigger searched for expected context.
    pub window_chars: usize,
    /// Findings per detector per run.
    pub max_findings_per_detector: usize,
    /// Detector ids (e.g. "OMIT_004") to skip.
    pub disabled_detectors: Vec<String>,
}

impl Default for OmissionConfig {
    fn default() -> Self {
        Self {
            window_chars: 250,
            max_findings_per_detector: 2,
            disabled_detectors: Vec::new(),
        }
    }
}
