use std::collections::BTreeMap;

use biaslens_common::config::ClaimEvaluatorConfig;
use biaslens_common::types::ClaimIssue;

use crate::rating::score_to_stars;

/// Deterministic breakdown of a claim-evaluation score.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreBreakdown {
    pub score_0_100: u8,
    pub raw_deduction: u32,
    pub normalization_factor: f64,
    pub scaled_deduction: i64,
    pub notes: Vec<String>,
}

/// Damping factor `1 + min(max_damping, damping_per_claim * (n - 1))`.
/// Grows with the claim count so longer articles are not punished merely
/// for offering more claims, but never past the cap.
pub fn normalization_factor(claim_count: usize, config: &ClaimEvaluatorConfig) -> f64 {
    let n = claim_count.max(1) as f64;
    1.0 + config.max_damping.min(config.damping_per_claim * (n - 1.0))
}

/// Score issues as `clamp(100 - round(Σ weight / factor), 0, 100)`.
///
/// Fully reproducible from `(items, claim_count)`. Rounding is
/// half-to-even so x.5 deductions land on the same integer every time.
pub fn score_items(
    items: &[ClaimIssue],
    claim_count: usize,
    config: &ClaimEvaluatorConfig,
) -> ScoreBreakdown {
    let mut raw_deduction: u32 = 0;
    let mut severity_counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut issue_counts: BTreeMap<&'static str, usize> = BTreeMap::new();

    for item in items {
        let issue = item.issue_type.as_str();
        *severity_counts.entry(item.severity.as_str()).or_default() += 1;
        *issue_counts.entry(issue).or_default() += 1;

        let weight = config.severity_weights.weight(item.severity)
            + config.issue_weights.get(issue).copied().unwrap_or(0);
        raw_deduction = raw_deduction.saturating_add(weight);
    }

    let factor = normalization_factor(claim_count, config);
    let scaled_deduction = (f64::from(raw_deduction) / factor).round_ties_even() as i64;
    let score = (100 - scaled_deduction).clamp(0, 100) as u8;

    let mut notes = vec![
        "Score is deterministic: 100 minus severity-weighted deductions (gently normalized by claim count).".to_string(),
        format!(
            "claims={} items={} raw_deduction={} norm_factor={:.2} scaled_deduction={}",
            claim_count,
            items.len(),
            raw_deduction,
            factor,
            scaled_deduction
        ),
    ];
    if !severity_counts.is_empty() {
        let summary: Vec<String> = severity_counts
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        notes.push(format!("severity_counts: {}", summary.join(", ")));
    }
    if !issue_counts.is_empty() {
        let mut top: Vec<(&str, usize)> = issue_counts.into_iter().collect();
        top.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        let summary: Vec<String> = top
            .iter()
            .take(8)
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        notes.push(format!("top_issue_types: {}", summary.join(", ")));
    }
    notes.push(format!("score_band_stars={}", score_to_stars(i64::from(score)).get()));

    ScoreBreakdown {
        score_0_100: score,
        raw_deduction,
        normalization_factor: factor,
        scaled_deduction,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biaslens_common::types::{IssueType, Severity, SupportClass};
    use biaslens_common::ClaimId;

    fn issue(claim: &str, issue_type: IssueType, severity: Severity) -> ClaimIssue {
        ClaimIssue {
            claim_ref: ClaimId::from(claim),
            issue_type,
            severity,
            support_class: SupportClass::TextSignalOnly,
            explanation: String::new(),
            evidence_refs: Vec::new(),
        }
    }

    #[test]
    fn test_no_items_scores_100() {
        let b = score_items(&[], 3, &ClaimEvaluatorConfig::default());
        assert_eq!(b.score_0_100, 100);
        assert_eq!(b.raw_deduction, 0);
    }

    #[test]
    fn test_single_claim_no_damping() {
        let items = vec![
            issue("C1", IssueType::AbsoluteLanguage, Severity::Moderate),
            issue("C1", IssueType::IntentInferenceLanguage, Severity::Elevated),
        ];
        let b = score_items(&items, 1, &ClaimEvaluatorConfig::default());
        assert_eq!(b.raw_deduction, 28);
        assert_eq!(b.normalization_factor, 1.0);
        assert_eq!(b.score_0_100, 72);
    }

    #[test]
    fn test_damping_is_capped() {
        let config = ClaimEvaluatorConfig::default();
        assert!((normalization_factor(2, &config) - 1.1).abs() < 1e-9);
        assert!((normalization_factor(8, &config) - 1.7).abs() < 1e-9);
        assert!((normalization_factor(50, &config) - 1.7).abs() < 1e-9);
        assert_eq!(normalization_factor(0, &config), 1.0);
    }

    #[test]
    fn test_rounding_half_to_even() {
        // 5 points over a factor of 2.0 is 2.5, which rounds to 2.
        let mut config = ClaimEvaluatorConfig::default();
        config.severity_weights.low = 5;
        config.max_damping = 1.0;
        config.damping_per_claim = 1.0;
        let items = vec![issue("C1", IssueType::AmbiguousReferent, Severity::Low)];
        let b = score_items(&items, 2, &config);
        assert_eq!(b.scaled_deduction, 2);
        assert_eq!(b.score_0_100, 98);
    }

    #[test]
    fn test_score_clamps_at_zero() {
        let items: Vec<ClaimIssue> = (0..10)
            .map(|_| issue("C1", IssueType::IntentInferenceLanguage, Severity::High))
            .collect();
        let b = score_items(&items, 1, &ClaimEvaluatorConfig::default());
        assert_eq!(b.score_0_100, 0);
    }

    #[test]
    fn test_issue_weights_add_on_top() {
        let mut config = ClaimEvaluatorConfig::default();
        config
            .issue_weights
            .insert("intent_inference_language".into(), 4);
        let items = vec![issue("C1", IssueType::IntentInferenceLanguage, Severity::Elevated)];
        let b = score_items(&items, 1, &config);
        assert_eq!(b.raw_deduction, 22);
    }

    #[test]
    fn test_notes_are_reproducible() {
        let items = vec![
            issue("C2", IssueType::CausalAssertion, Severity::Moderate),
            issue("C1", IssueType::AmbiguousReferent, Severity::Low),
        ];
        let config = ClaimEvaluatorConfig::default();
        assert_eq!(score_items(&items, 2, &config), score_items(&items, 2, &config));
    }
}
