use biaslens_common::types::{
    DetectorLayer, MissingParameter, OmissionFinding, OmissionType, Severity, SourceDescriptor,
};
use biaslens_common::{FindingId, Result};

use crate::evidence::EvidenceStore;

/// Cap on proposals accepted from one inferential detector per run.
pub const MAX_INFERENTIAL_CANDIDATES: usize = 20;

/// A proposal from an inferential (non-reproducible) source. Nothing here
/// is trusted until its trigger is found verbatim in the source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InferentialCandidate {
    pub omission_type: OmissionType,
    pub trigger_text: String,
    pub expected_context: String,
    pub absence_signal: String,
    pub impact: String,
    pub severity: Severity,
    pub missing_parameters: Vec<MissingParameter>,
}

/// External candidate source, e.g. a model-backed harvester. May fail or
/// time out; a failure degrades the run, never aborts it.
pub trait InferentialDetector: Send + Sync {
    fn id(&self) -> &str;
    fn propose(&self, text: &str) -> Result<Vec<InferentialCandidate>>;
}

/// Merge candidates from every inferential detector into `findings`.
///
/// Each candidate's trigger must occur verbatim in `text` and anchor through
/// `store`, or it is dropped. Merged findings are tagged
/// [`DetectorLayer::Inferential`]. Returns the number merged.
pub fn merge_candidates(
    text: &str,
    store: &mut EvidenceStore,
    source: &SourceDescriptor,
    detectors: &[&dyn InferentialDetector],
    findings: &mut Vec<OmissionFinding>,
) -> usize {
    let mut merged = 0;

    for detector in detectors {
        let candidates = match detector.propose(text) {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(
                    detector = detector.id(),
                    external = e.is_external(),
                    error = %e,
                    "Inferential detector failed; continuing with structural findings"
                );
                metrics::counter!("omissions.inferential_failures").increment(1);
                continue;
            }
        };

        let mut accepted = 0;
        for candidate in candidates.into_iter().take(MAX_INFERENTIAL_CANDIDATES) {
            let trigger = candidate.trigger_text.trim();
            let why = format!("{} trigger", detector.id());
            let Some(eid) = store.anchor_quote(text, trigger, source, &why) else {
                tracing::debug!(detector = detector.id(), "Inferential trigger not found verbatim; dropped");
                continue;
            };

            accepted += 1;
            findings.push(OmissionFinding {
                id: FindingId::from(format!("OMF_INFER_{}_{:03}", detector.id(), accepted)),
                omission_type: candidate.omission_type,
                detector_id: detector.id().to_string(),
                layer: DetectorLayer::Inferential,
                trigger_text: trigger.to_string(),
                expected_context: candidate.expected_context,
                absence_signal: candidate.absence_signal,
                impact: candidate.impact,
                severity: candidate.severity,
                evidence_refs: vec![eid],
                missing_parameters: candidate.missing_parameters,
            });
        }
        merged += accepted;
    }

    if merged > 0 {
        metrics::counter!("omissions.inferential_merged").increment(merged as u64);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use biaslens_common::BiasLensError;

    struct Fixed(Vec<InferentialCandidate>);

    impl InferentialDetector for Fixed {
        fn id(&self) -> &str {
            "OMIT_LLM_001"
        }
        fn propose(&self, _text: &str) -> Result<Vec<InferentialCandidate>> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    impl InferentialDetector for Failing {
        fn id(&self) -> &str {
            "OMIT_LLM_002"
        }
        fn propose(&self, _text: &str) -> Result<Vec<InferentialCandidate>> {
            Err(BiasLensError::Timeout("harvester took too long".into()))
        }
    }

    fn candidate(trigger: &str) -> InferentialCandidate {
        InferentialCandidate {
            omission_type: OmissionType::CausalBridgeMissing,
            trigger_text: trigger.to_string(),
            expected_context: "How the policy produced the outcome.".into(),
            absence_signal: "No mechanism stated.".into(),
            impact: "The link reads as asserted.".into(),
            severity: Severity::Moderate,
            missing_parameters: vec![MissingParameter::Mechanism],
        }
    }

    const TEXT: &str = "The new policy fixed the problem. Nobody disputes that.";

    #[test]
    fn test_verbatim_candidates_merge_with_provenance() {
        let detector = Fixed(vec![
            candidate("The new policy fixed the problem."),
            candidate("The policy solved everything."),
        ]);
        let detectors: [&dyn InferentialDetector; 1] = [&detector];
        let mut store = EvidenceStore::new();
        let mut findings = Vec::new();
        let merged = merge_candidates(
            TEXT,
            &mut store,
            &SourceDescriptor::text("t"),
            &detectors,
            &mut findings,
        );

        assert_eq!(merged, 1);
        assert_eq!(findings[0].layer, DetectorLayer::Inferential);
        assert_eq!(findings[0].id.as_str(), "OMF_INFER_OMIT_LLM_001_001");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_failing_detector_degrades() {
        let good = Fixed(vec![candidate("Nobody disputes that.")]);
        let detectors: [&dyn InferentialDetector; 2] = [&Failing, &good];
        let mut store = EvidenceStore::new();
        let mut findings = Vec::new();
        let merged = merge_candidates(
            TEXT,
            &mut store,
            &SourceDescriptor::text("t"),
            &detectors,
            &mut findings,
        );
        assert_eq!(merged, 1);
        assert_eq!(findings[0].detector_id, "OMIT_LLM_001");
    }
}
