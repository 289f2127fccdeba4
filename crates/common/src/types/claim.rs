use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::{ClaimId, EvidenceId};
use crate::types::Stakes;

/// A claim extracted upstream. Read-only input to every analyzer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub text: String,
    #[serde(default)]
    pub stakes: Stakes,
    /// Evidence spans backing this claim.
    #[serde(default)]
    pub evidence_refs: Vec<EvidenceId>,
}

impl Claim {
    pub fn new(id: impl Into<ClaimId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            stakes: Stakes::default(),
            evidence_refs: Vec::new(),
        }
    }

    pub fn with_evidence(mut self, refs: impl IntoIterator<Item = EvidenceId>) -> Self {
        self.evidence_refs = refs.into_iter().collect();
        self
    }

    /// A claim is usable when it carries non-blank text.
    pub fn is_usable(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Decode a JSON array of claim records, silently skipping malformed entries
/// (non-objects, missing or blank `id`/`text`, wrong field types).
///
/// Blank evidence references are dropped from otherwise valid records.
pub fn claims_from_json(value: &Value) -> Vec<Claim> {
    let Some(records) = value.as_array() else {
        return Vec::new();
    };

    records
        .iter()
        .filter(|record| record.is_object())
        .filter_map(|record| serde_json::from_value::<Claim>(record.clone()).ok())
        .filter(|claim| claim.is_usable() && !claim.id.as_str().trim().is_empty())
        .map(|mut claim| {
            claim
                .evidence_refs
                .retain(|eid| !eid.as_str().trim().is_empty());
            claim
        })
        .collect()
}
