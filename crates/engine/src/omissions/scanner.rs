use std::collections::BTreeSet;

use biaslens_common::config::OmissionConfig;
use biaslens_common::types::{DetectorLayer, OmissionFinding, SourceDescriptor};
use biaslens_common::FindingId;

use super::detectors::{builtin_detectors, StructuralDetector};
use crate::evidence::EvidenceStore;
use crate::text::{char_window, sentence_containing};

/// Runs the structural detectors over one source text.
pub struct OmissionScanner<'a> {
    config: &'a OmissionConfig,
    detectors: Vec<Box<dyn StructuralDetector>>,
}

impl<'a> OmissionScanner<'a> {
    /// Scanner over the built-in detectors, minus any the config disables.
    pub fn new(config: &'a OmissionConfig) -> Self {
        let detectors = builtin_detectors()
            .into_iter()
            .filter(|d| !config.disabled_detectors.iter().any(|id| id == d.id()))
            .collect();
        Self { config, detectors }
    }

    /// Scan `text` and anchor each trigger sentence through `store`.
    ///
    /// For every trigger, the expected context is searched for in a window
    /// of `window_chars` characters on either side. Each detector emits at
    /// most `max_findings_per_detector` findings and at most one per
    /// sentence. A trigger sentence that cannot be anchored is dropped.
    pub fn scan(
        &self,
        text: &str,
        store: &mut EvidenceStore,
        source: &SourceDescriptor,
    ) -> Vec<OmissionFinding> {
        let mut findings = Vec::new();
        if text.trim().is_empty() {
            tracing::debug!("Empty source text; omission scan skipped");
            return findings;
        }

        for detector in &self.detectors {
            let emitted = self.scan_detector(detector.as_ref(), text, store, source, &mut findings);
            if emitted > 0 {
                metrics::counter!(
                    "omissions.findings",
                    "type" => detector.omission_type().as_str()
                )
                .increment(emitted as u64);
            }
        }

        tracing::info!(
            detectors = self.detectors.len(),
            findings = findings.len(),
            "Structural omission scan complete"
        );
        findings
    }

    fn scan_detector(
        &self,
        detector: &dyn StructuralDetector,
        text: &str,
        store: &mut EvidenceStore,
        source: &SourceDescriptor,
        findings: &mut Vec<OmissionFinding>,
    ) -> usize {
        let mut emitted = 0;
        let mut seen_sentences: BTreeSet<(usize, usize)> = BTreeSet::new();

        for trigger in detector.triggers(text) {
            if emitted >= self.config.max_findings_per_detector {
                break;
            }
            let (lo, hi) = char_window(text, trigger.start, trigger.end, self.config.window_chars);
            if detector.context_present(&text[lo..hi]) {
                continue;
            }
            let Some((start, end)) = sentence_containing(text, trigger.start) else {
                continue;
            };
            if !seen_sentences.insert((start, end)) {
                continue;
            }
            let why = format!("{} trigger", detector.id());
            let Some(eid) = store.add_span(text, start, end, source, &why) else {
                tracing::debug!(detector = detector.id(), "Trigger sentence not anchorable; dropped");
                continue;
            };

            emitted += 1;
            findings.push(OmissionFinding {
                id: FindingId::from(format!("OMF_STRUCT_{}_{:03}", detector.id(), emitted)),
                omission_type: detector.omission_type(),
                detector_id: detector.id().to_string(),
                layer: DetectorLayer::Structural,
                trigger_text: text[start..end].to_string(),
                expected_context: detector.expected_context().to_string(),
                absence_signal: detector.absence_signal().to_string(),
                impact: detector.impact().to_string(),
                severity: detector.severity(),
                evidence_refs: vec![eid],
                missing_parameters: detector.missing_parameters().to_vec(),
            });
        }
        emitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biaslens_common::types::{OmissionType, Severity};

    fn scan(text: &str) -> (Vec<OmissionFinding>, EvidenceStore) {
        let config = OmissionConfig::default();
        let mut store = EvidenceStore::new();
        let findings = OmissionScanner::new(&config).scan(text, &mut store, &SourceDescriptor::text("t"));
        (findings, store)
    }

    fn of_type(findings: &[OmissionFinding], t: OmissionType) -> Vec<&OmissionFinding> {
        findings.iter().filter(|f| f.omission_type == t).collect()
    }

    #[test]
    fn test_baseline_present_number_suppresses() {
        let (findings, _) = scan("Crime surged 40% compared to last year.");
        assert!(of_type(&findings, OmissionType::BaselineMissing).is_empty());
    }

    #[test]
    fn test_baseline_missing_emitted_once() {
        let text = "Crime surged across downtown this week.";
        let (findings, store) = scan(text);
        let baseline = of_type(&findings, OmissionType::BaselineMissing);
        assert_eq!(baseline.len(), 1);

        let f = baseline[0];
        assert_eq!(f.id.as_str(), "OMF_STRUCT_OMIT_001_001");
        assert_eq!(f.detector_id, "OMIT_001");
        assert_eq!(f.layer, DetectorLayer::Structural);
        assert_eq!(f.severity, Severity::Moderate);
        assert_eq!(f.trigger_text, text);

        let item = store.get(&f.evidence_refs[0]).unwrap();
        assert_eq!(&text[item.start_offset..item.end_offset], item.quote);
    }

    #[test]
    fn test_findings_capped_per_detector() {
        let text = "Thefts surged. Burglaries spiked. Arrests soared. Fines plunged.";
        let (findings, _) = scan(text);
        let baseline = of_type(&findings, OmissionType::BaselineMissing);
        assert_eq!(baseline.len(), 2);
        assert_eq!(baseline[1].id.as_str(), "OMF_STRUCT_OMIT_001_002");
    }

    #[test]
    fn test_one_finding_per_sentence() {
        let (findings, _) = scan("Thefts surged and arrests soared downtown.");
        assert_eq!(of_type(&findings, OmissionType::BaselineMissing).len(), 1);
    }

    #[test]
    fn test_window_is_local() {
        let filler = "The council met and talked about parks. ".repeat(10);
        let text = format!("Thefts surged downtown. {}There were 12 meetings.", filler);
        let (findings, _) = scan(&text);
        assert_eq!(of_type(&findings, OmissionType::BaselineMissing).len(), 1);
    }

    #[test]
    fn test_disabled_detector_skipped() {
        let config = OmissionConfig {
            disabled_detectors: vec!["OMIT_001".into()],
            ..OmissionConfig::default()
        };
        let mut store = EvidenceStore::new();
        let findings = OmissionScanner::new(&config).scan(
            "Crime surged across downtown this week.",
            &mut store,
            &SourceDescriptor::text("t"),
        );
        assert!(of_type(&findings, OmissionType::BaselineMissing).is_empty());
    }

    #[test]
    fn test_findings_never_mention_intent() {
        let text = "All residents oppose it because officials always lie. Turnout was comparatively low. Thefts are increasing.";
        let (findings, _) = scan(text);
        assert!(!findings.is_empty());
        for f in &findings {
            for s in [&f.expected_context, &f.absence_signal, &f.impact] {
                let lower = s.to_lowercase();
                assert!(!lower.contains("intent"));
                assert!(!lower.contains("motive"));
                assert!(!lower.contains("deliberate"));
            }
        }
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        let (findings, store) = scan("   ");
        assert!(findings.is_empty());
        assert!(store.is_empty());
    }
}
