//! One analysis run: fresh evidence store, independent analyzers, report.

use biaslens_common::config::SignalConfig;
use biaslens_common::types::{AnalysisInput, AnalysisReport, Claim, RunMetadata, SourceDescriptor};
use biaslens_common::RunId;

use crate::claims::{evaluate_claims, RULESET_VERSION};
use crate::evidence::{segment_source, EvidenceStore};
use crate::omissions::{merge_candidates, InferentialDetector, OmissionScanner};
use crate::rating::claim_grounding;
use crate::timeline::{analyze_consistency, build_timeline_summary, extract_timeline_events};

/// Run every structural analyzer over one input.
///
/// The caller's evidence list is copied, never mutated; the report carries
/// the new list. Each call owns its own store, so runs can proceed in
/// parallel without sharing state.
pub fn analyze(input: &AnalysisInput, config: &SignalConfig) -> AnalysisReport {
    analyze_with_inferential(input, config, &[])
}

/// [`analyze`], then merge candidates from external inferential detectors.
/// A failing detector is logged and skipped.
pub fn analyze_with_inferential(
    input: &AnalysisInput,
    config: &SignalConfig,
    inferential: &[&dyn InferentialDetector],
) -> AnalysisReport {
    let run_id = RunId::new();
    let span = tracing::info_span!("analysis_run", run_id = %run_id);
    let _enter = span.enter();

    let text = input.source_text.as_str();
    let mut store = EvidenceStore::from_items(&input.evidence);
    let mut notes = vec!["Deterministic structural signals only; no model calls.".to_string()];

    if store.is_empty() && config.evidence.segment_when_empty {
        let ids = segment_source(&mut store, text, &input.source, &config.evidence);
        notes.push(format!("Segmented source text into {} evidence item(s).", ids.len()));
    }

    let claims = anchor_claims(&input.claims, text, &input.source, &mut store);

    let claim_evaluation = evaluate_claims(&claims, &config.claims);
    let claim_grounding = claim_grounding(&claim_evaluation, &config.rating);

    let timeline_events = extract_timeline_events(&claims, &config.timeline);
    let timeline_summary = build_timeline_summary(&timeline_events);
    let timeline_consistency = analyze_consistency(&timeline_events, &config.timeline);

    let mut omissions = OmissionScanner::new(&config.omissions).scan(text, &mut store, &input.source);
    if !inferential.is_empty() {
        let merged = merge_candidates(text, &mut store, &input.source, inferential, &mut omissions);
        notes.push(format!("Merged {} inferential omission candidate(s).", merged));
    }

    tracing::info!(
        claims = claims.len(),
        issues = claim_evaluation.items.len(),
        timeline_events = timeline_events.len(),
        omissions = omissions.len(),
        evidence = store.len(),
        "Analysis run complete"
    );

    AnalysisReport {
        run: RunMetadata {
            run_id,
            analyzed_at: chrono::Utc::now(),
            ruleset_version: RULESET_VERSION.to_string(),
            notes,
        },
        evidence: store.into_items(),
        claim_evaluation,
        claim_grounding,
        timeline_events,
        timeline_summary,
        timeline_consistency,
        omissions,
    }
}

/// Copy the claims, dropping evidence refs the store does not hold and
/// anchoring claims with no refs by locating their text verbatim.
fn anchor_claims(
    claims: &[Claim],
    text: &str,
    source: &SourceDescriptor,
    store: &mut EvidenceStore,
) -> Vec<Claim> {
    claims
        .iter()
        .map(|claim| {
            let mut claim = claim.clone();
            let before = claim.evidence_refs.len();
            claim.evidence_refs.retain(|eid| store.contains(eid));
            if claim.evidence_refs.len() < before {
                tracing::debug!(
                    claim = %claim.id,
                    dropped = before - claim.evidence_refs.len(),
                    "Dropped evidence refs missing from the store"
                );
            }
            if claim.evidence_refs.is_empty() && claim.is_usable() {
                if let Some(eid) = store.anchor_quote(
                    text,
                    claim.text.trim(),
                    source,
                    "Claim text located verbatim in source.",
                ) {
                    claim.evidence_refs.push(eid);
                }
            }
            claim
        })
        .collect()
}
