//! Claim Evaluator: pattern-based structural signals over claim text, and
//! the severity-weighted score they feed.
//!
//! Signals describe wording only. Intent language is flagged as present,
//! never read as a conclusion about motive.

mod rules;
mod scoring;

pub use rules::{RuleDef, RuleGate, RULES, RULESET_VERSION};
pub use scoring::{normalization_factor, score_items, ScoreBreakdown};

use biaslens_common::config::ClaimEvaluatorConfig;
use biaslens_common::types::{
    Claim, ClaimEvaluation, ClaimIssue, IssueType, ModuleStatus, SupportClass, Sufficiency,
};

use crate::text::sentence_spans;
use rules::{has_nameish_token, CompiledRule, COMPILED_RULES};

/// Evaluate every usable claim and score the resulting issues.
///
/// Claims with blank text are skipped. With no usable claim the result is
/// explicitly `insufficient_data` with no score.
pub fn evaluate_claims(claims: &[Claim], config: &ClaimEvaluatorConfig) -> ClaimEvaluation {
    let usable: Vec<&Claim> = claims.iter().filter(|c| c.is_usable()).collect();
    let skipped = claims.len() - usable.len();
    if skipped > 0 {
        tracing::debug!(skipped, "Skipped claims without usable text");
    }

    let header = format!(
        "Claim Evaluation Engine ({}): deterministic text signals.",
        RULESET_VERSION
    );

    if usable.is_empty() {
        return ClaimEvaluation {
            status: ModuleStatus::Run,
            sufficiency: Sufficiency::InsufficientData,
            items: Vec::new(),
            score_0_100: None,
            claim_count: 0,
            notes: vec![
                header,
                "No usable claims; no score computed.".to_string(),
            ],
        };
    }

    let mut items: Vec<ClaimIssue> = usable
        .iter()
        .flat_map(|claim| detect_claim_issues(claim, config))
        .collect();
    sort_issues(&mut items);

    let breakdown = score_items(&items, usable.len(), config);

    for item in &items {
        metrics::counter!("claims.issues", "issue_type" => item.issue_type.as_str())
            .increment(1);
    }
    tracing::info!(
        claims = usable.len(),
        issues = items.len(),
        score = breakdown.score_0_100,
        "Claim evaluation complete"
    );

    let mut notes = vec![header];
    notes.extend(breakdown.notes);

    ClaimEvaluation {
        status: ModuleStatus::Run,
        sufficiency: Sufficiency::Sufficient,
        items,
        score_0_100: Some(breakdown.score_0_100),
        claim_count: usable.len(),
        notes,
    }
}

/// Run the rule table, in order, against one claim.
pub fn detect_claim_issues(claim: &Claim, config: &ClaimEvaluatorConfig) -> Vec<ClaimIssue> {
    let text = claim.text.trim();
    let mut items: Vec<ClaimIssue> = Vec::new();
    if text.is_empty() {
        return items;
    }

    for rule in COMPILED_RULES.iter() {
        if rule_fires(rule, text, &items, config) {
            items.push(ClaimIssue {
                claim_ref: claim.id.clone(),
                issue_type: rule.def.issue_type,
                severity: rule.def.severity,
                support_class: SupportClass::TextSignalOnly,
                explanation: rule.def.explanation.to_string(),
                evidence_refs: claim.evidence_refs.clone(),
            });
        }
    }
    items
}

fn rule_fires(
    rule: &CompiledRule,
    text: &str,
    raised: &[ClaimIssue],
    config: &ClaimEvaluatorConfig,
) -> bool {
    match rule.def.gate {
        RuleGate::Always => rule.regex.is_match(text),
        RuleGate::WeakCausal => {
            config.flag_causal_verb_phrase
                && !raised
                    .iter()
                    .any(|i| i.issue_type == IssueType::CausalAssertion)
                && rule.regex.is_match(text)
        }
        RuleGate::NoNameInSentence => sentence_spans(text).into_iter().any(|(s, e)| {
            let sentence = &text[s..e];
            rule.regex.is_match(sentence) && !has_nameish_token(sentence)
        }),
    }
}

/// Order by `(claim_ref, issue_type, severity)` wire strings so output is
/// diff-stable regardless of claim order.
pub fn sort_issues(items: &mut [ClaimIssue]) {
    items.sort_by(|a, b| {
        (
            a.claim_ref.as_str(),
            a.issue_type.as_str(),
            a.severity.as_str(),
        )
            .cmp(&(
                b.claim_ref.as_str(),
                b.issue_type.as_str(),
                b.severity.as_str(),
            ))
    });
}
