use serde::{Deserialize, Serialize};

use crate::ids::{ClaimId, EvidenceId};
use crate::types::{ModuleStatus, Severity, Sufficiency};

/// Structural text signal detected in a claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    AbsoluteLanguage,
    CausalAssertion,
    CausalVerbPhrase,
    IntentInferenceLanguage,
    AmbiguousReferent,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AbsoluteLanguage => "absolute_language",
            Self::CausalAssertion => "causal_assertion",
            Self::CausalVerbPhrase => "causal_verb_phrase",
            Self::IntentInferenceLanguage => "intent_inference_language",
            Self::AmbiguousReferent => "ambiguous_referent",
        }
    }
}

/// What backs an issue. The engine only ever sees text, never facts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportClass {
    #[default]
    TextSignalOnly,
}

/// One issue raised against one claim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimIssue {
    pub claim_ref: ClaimId,
    pub issue_type: IssueType,
    pub severity: Severity,
    pub support_class: SupportClass,
    pub explanation: String,
    #[serde(default)]
    pub evidence_refs: Vec<EvidenceId>,
}

/// Output of the claim evaluator for one analysis run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClaimEvaluation {
    pub status: ModuleStatus,
    pub sufficiency: Sufficiency,
    pub items: Vec<ClaimIssue>,
    /// Severity-weighted structural score. `None` when no claim was usable.
    pub score_0_100: Option<u8>,
    /// Number of usable claims the score was normalized over.
    pub claim_count: usize,
    pub notes: Vec<String>,
}
