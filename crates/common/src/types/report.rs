use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::RunId;
use crate::types::{
    Claim, ClaimEvaluation, EvidenceItem, OmissionFinding, RatingObject, SourceDescriptor,
    TimelineConsistency, TimelineEvent, TimelineSummary,
};

/// Everything one analysis run reads. Never mutated by the engine.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub source_text: String,
    #[serde(default)]
    pub source: SourceDescriptor,
    #[serde(default)]
    pub claims: Vec<Claim>,
    /// Pre-existing evidence list, e.g. from an upstream extraction pass.
    #[serde(default)]
    pub evidence: Vec<EvidenceItem>,
}

/// Bookkeeping for one run. Never feeds any score or ordering.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunMetadata {
    pub run_id: RunId,
    pub analyzed_at: DateTime<Utc>,
    pub ruleset_version: String,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// Deterministic structural-signal output for the report assembler.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub run: RunMetadata,
    /// The caller's evidence followed by every span anchored during the run.
    pub evidence: Vec<EvidenceItem>,
    pub claim_evaluation: ClaimEvaluation,
    /// `None` when the claim evaluation had insufficient data.
    pub claim_grounding: Option<RatingObject>,
    pub timeline_events: Vec<TimelineEvent>,
    pub timeline_summary: TimelineSummary,
    pub timeline_consistency: TimelineConsistency,
    pub omissions: Vec<OmissionFinding>,
}
