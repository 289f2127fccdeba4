use serde::{Deserialize, Serialize};

use crate::ids::{EvidenceId, FindingId};
use crate::types::Severity;

/// Kind of expected context found absent near a trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OmissionType {
    BaselineMissing,
    TimeWindowMissing,
    ScopeBoundaryMissing,
    ComparisonClassMissing,
    CausalBridgeMissing,
}

impl OmissionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BaselineMissing => "baseline_missing",
            Self::TimeWindowMissing => "time_window_missing",
            Self::ScopeBoundaryMissing => "scope_boundary_missing",
            Self::ComparisonClassMissing => "comparison_class_missing",
            Self::CausalBridgeMissing => "causal_bridge_missing",
        }
    }
}

/// Provenance of a finding: the deterministic structural stage or an
/// external, non-reproducible inferential source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorLayer {
    Structural,
    Inferential,
}

/// Parameters a reader would need to evaluate the trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingParameter {
    Baseline,
    Denominator,
    ComparatorClass,
    AbsoluteValue,
    TimeWindow,
    PopulationScope,
    Mechanism,
    EvidenceType,
}

/// Absence of expected context near a trigger phrase.
///
/// Framed strictly as missing context; never as motive or wrongdoing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OmissionFinding {
    pub id: FindingId,
    #[serde(rename = "type")]
    pub omission_type: OmissionType,
    pub detector_id: String,
    pub layer: DetectorLayer,
    pub trigger_text: String,
    pub expected_context: String,
    pub absence_signal: String,
    pub impact: String,
    pub severity: Severity,
    /// Always non-empty: unanchorable triggers never become findings.
    pub evidence_refs: Vec<EvidenceId>,
    #[serde(default)]
    pub missing_parameters: Vec<MissingParameter>,
}
