use biaslens_common::config::SignalConfig;

use super::loader::ConfigError;
use crate::omissions::STRUCTURAL_DETECTOR_IDS;

/// Validate the complete signal configuration.
///
/// Collects every range problem before failing so one edit fixes them all.
pub fn validate(config: &SignalConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_evidence(config, &mut errors);
    validate_claims(config, &mut errors);
    validate_timeline(config, &mut errors);
    validate_omissions(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.join("; ")))
    }
}

fn validate_evidence(config: &SignalConfig, errors: &mut Vec<String>) {
    let e = &config.evidence;

    if e.max_segment_items == 0 {
        errors.push("evidence.max_segment_items must be > 0".into());
    }
    if e.paragraph_clip_chars == 0 {
        errors.push("evidence.paragraph_clip_chars must be > 0".into());
    }
    if e.sentence_clip_chars == 0 {
        errors.push("evidence.sentence_clip_chars must be > 0".into());
    }
}

fn validate_claims(config: &SignalConfig, errors: &mut Vec<String>) {
    let c = &config.claims;
    let w = &c.severity_weights;

    if !(w.low <= w.moderate && w.moderate <= w.elevated && w.elevated <= w.high) {
        errors.push(
            "claims.severity_weights must be non-decreasing from low to high".into(),
        );
    }
    if !(0.0..=1.0).contains(&c.damping_per_claim) {
        errors.push("claims.damping_per_claim must be between 0.0 and 1.0".into());
    }
    if !(0.0..=5.0).contains(&c.max_damping) {
        errors.push("claims.max_damping must be between 0.0 and 5.0".into());
    }
}

fn validate_timeline(config: &SignalConfig, errors: &mut Vec<String>) {
    let t = &config.timeline;

    if !(0..7).contains(&t.week_rollover_tolerance_days) {
        errors.push("timeline.week_rollover_tolerance_days must be between 0 and 6".into());
    }
    if t.large_gap_minutes == 0 || t.large_gap_minutes > 24 * 60 {
        errors.push("timeline.large_gap_minutes must be between 1 and 1440".into());
    }
    if t.cluster_window_minutes == 0 {
        errors.push("timeline.cluster_window_minutes must be > 0".into());
    }
    if t.cluster_min_events < 2 {
        errors.push("timeline.cluster_min_events must be >= 2".into());
    }
    if t.missing_day_max_span < 0 {
        errors.push("timeline.missing_day_max_span must be >= 0".into());
    }
    if t.sparse_time_min_events == 0 {
        errors.push("timeline.sparse_time_min_events must be > 0".into());
    }
    if !(0.0..=1.0).contains(&t.sparse_time_ratio) {
        errors.push("timeline.sparse_time_ratio must be between 0.0 and 1.0".into());
    }
}

fn validate_omissions(config: &SignalConfig, errors: &mut Vec<String>) {
    let o = &config.omissions;

    if o.window_chars == 0 {
        errors.push("omissions.window_chars must be > 0".into());
    }
    if o.max_findings_per_detector == 0 {
        errors.push("omissions.max_findings_per_detector must be > 0".into());
    }
    for id in &o.disabled_detectors {
        if !STRUCTURAL_DETECTOR_IDS.contains(&id.as_str()) {
            errors.push(format!(
                "omissions.disabled_detectors contains unknown detector {}",
                id
            ));
        }
    }
}
