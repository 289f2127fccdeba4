//! The versioned claim rule table.
//!
//! Every claim detector is one row here; detector variants never carry
//! their own pattern copies.

use std::sync::LazyLock;

use regex::Regex;

use biaslens_common::types::{IssueType, Severity};

/// Bumped whenever a pattern, severity, or gate changes.
pub const RULESET_VERSION: &str = "claims-0.4";

/// Extra condition a rule needs beyond its pattern matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleGate {
    /// Pattern match alone raises the issue.
    Always,
    /// Only when `flag_causal_verb_phrase` is on and no earlier
    /// `causal_assertion` was raised for the claim.
    WeakCausal,
    /// Only when some sentence holding the pattern has no proper-noun-like token.
    NoNameInSentence,
}

/// One row of the rule table.
#[derive(Clone, Copy, Debug)]
pub struct RuleDef {
    pub issue_type: IssueType,
    pub severity: Severity,
    pub pattern: &'static str,
    pub explanation: &'static str,
    pub gate: RuleGate,
}

/// Rules in evaluation order.
pub const RULES: &[RuleDef] = &[
    RuleDef {
        issue_type: IssueType::AbsoluteLanguage,
        severity: Severity::Moderate,
        pattern: r"(?i)\b(always|never|everyone|no\s*one|all|none)\b",
        explanation: "Uses absolute terms requiring strong evidence or qualifiers.",
        gate: RuleGate::Always,
    },
    RuleDef {
        issue_type: IssueType::CausalAssertion,
        severity: Severity::Moderate,
        pattern: r"(?i)\b(because|therefore|thus|hence|due\s+to|as\s+a\s+result|result(?:s|ed)?\s+in|lead(?:s|ing)?\s+to)\b",
        explanation: "Uses explicit causal connector language.",
        gate: RuleGate::Always,
    },
    RuleDef {
        issue_type: IssueType::CausalVerbPhrase,
        severity: Severity::Low,
        pattern: r"(?i)\b(causes?|caused|causing)\b",
        explanation: "Uses causal verb phrasing without explicit connector; mechanism/support may be needed.",
        gate: RuleGate::WeakCausal,
    },
    RuleDef {
        issue_type: IssueType::IntentInferenceLanguage,
        severity: Severity::Elevated,
        pattern: r"(?i)\b(wanted\s+to|intended\s+to|trying\s+to|planned\s+to|aimed\s+to|in\s+order\s+to|they\s+wanted\s+\w+)\b",
        explanation: "Contains intent/motive language; requires strong evidence (flagged, not inferred).",
        gate: RuleGate::Always,
    },
    RuleDef {
        issue_type: IssueType::AmbiguousReferent,
        severity: Severity::Low,
        pattern: r"(?i)\b(they|them|their|it|this|that|these|those)\b",
        explanation: "Contains ambiguous referent (they/it/this) that may require disambiguation.",
        gate: RuleGate::NoNameInSentence,
    },
];

/// A rule with its pattern compiled.
pub struct CompiledRule {
    pub def: &'static RuleDef,
    pub regex: Regex,
}

/// All rules, compiled once per process.
pub static COMPILED_RULES: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|def| CompiledRule {
            def,
            regex: Regex::new(def.pattern).expect("claim rule patterns are static and valid"),
        })
        .collect()
});

/// Capitalized token of three or more letters: a rough proper-noun signal.
pub static NAMEISH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]{2,}\b").unwrap());

/// Whether `sentence` holds a proper-noun-like token. Capitalized pronouns
/// ("They", "This") do not count.
pub fn has_nameish_token(sentence: &str) -> bool {
    const PRONOUNS: [&str; 8] = ["they", "them", "their", "it", "this", "that", "these", "those"];
    NAMEISH_RE
        .find_iter(sentence)
        .any(|m| !PRONOUNS.contains(&m.as_str().to_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rules_compile() {
        assert_eq!(COMPILED_RULES.len(), RULES.len());
    }

    #[test]
    fn test_nameish_ignores_capitalized_pronouns() {
        assert!(!has_nameish_token("They said it was fine."));
        assert!(has_nameish_token("They told Smith it was fine."));
        assert!(!has_nameish_token("it was Ok."));
    }
}
