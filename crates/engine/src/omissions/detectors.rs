use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use biaslens_common::types::{MissingParameter, OmissionType, Severity};

use crate::text::sentence_containing;

/// A deterministic, synchronous omission detector.
///
/// A detector proposes trigger matches and judges whether the expected
/// context is present in the local window around each one. It never reads
/// beyond the text it is handed.
pub trait StructuralDetector: Send + Sync {
    /// Stable id, e.g. `OMIT_001`.
    fn id(&self) -> &'static str;
    fn omission_type(&self) -> OmissionType;
    fn severity(&self) -> Severity;
    fn expected_context(&self) -> &'static str;
    fn absence_signal(&self) -> &'static str;
    fn impact(&self) -> &'static str;
    fn missing_parameters(&self) -> &'static [MissingParameter];

    /// Byte ranges of trigger matches in `text`, in text order.
    fn triggers(&self, text: &str) -> Vec<Range<usize>>;

    /// Whether the expected context appears in `window`.
    fn context_present(&self, window: &str) -> bool;
}

// --- Trigger patterns ---

static MAGNITUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(surg(?:e|es|ed|ing)|spik(?:e|es|ed|ing)|soar(?:s|ed|ing)?|skyrocket(?:s|ed|ing)?|record|sharp(?:ly)?|dramatic(?:ally)?|plung(?:e|es|ed|ing)|plummet(?:s|ed|ing)?|explod(?:e|es|ed|ing))\b",
    )
    .unwrap()
});

static TREND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(increas(?:e|es|ed|ing)|decreas(?:e|es|ed|ing)|ris(?:e|es|en|ing)|rose|fall(?:s|en|ing)|fell|climb(?:s|ed|ing)?|declin(?:e|es|ed|ing)|trend(?:s|ed|ing)?)\b",
    )
    .unwrap()
});

static UNIVERSAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(all|every|everyone|everybody|no\s+one|nobody|none|always|never|entire)\b")
        .unwrap()
});

static GROUP_NOUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(people|residents|citizens|voters|immigrants|migrants|officials|police|officers|students|teachers|workers|employees|women|men|children|families|parents|politicians|lawmakers|experts|scientists|doctors|businesses|companies|communities|neighborhoods|members|users|customers|community|groups?)\b",
    )
    .unwrap()
});

static COMPARISON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(compared\s+(?:to|with)|relative\s+to|by\s+comparison|in\s+comparison|comparatively|relatively|disproportionately|outpac(?:e|es|ed|ing)|outperform(?:s|ed|ing)?|higher|lower|greater|fewer|larger|smaller|better|worse|faster|slower)\b",
    )
    .unwrap()
});

static CAUSAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(because|due\s+to|as\s+a\s+result\s+of|result(?:s|ed)?\s+in|leads?\s+to|led\s+to|caus(?:e|es|ed|ing)|therefore|thus|hence|driven\s+by|attributed\s+to)\b",
    )
    .unwrap()
});

// --- Context patterns ---

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+(?:[.,]\d+)?%?").unwrap());

static TIME_HINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(today|yesterday|tomorrow|tonight|(?:this|last|next|past)\s+(?:week|month|year|quarter|decade|spring|summer|fall|winter)|over\s+the\s+(?:past|last)|in\s+the\s+(?:past|last)|since|(?:\d+|several|few)\s+(?:days|weeks|months|years)|(?:mon|tues|wednes|thurs|fri|satur|sun)day)\b",
    )
    .unwrap()
});

/// Years and month names. Month matching is case-sensitive, unlike the
/// `(?i)` time hints above: lower-case "may" and "march" do not count as
/// date context.
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:(?:19|20)\d{2}s?|Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\b",
    )
    .unwrap()
});

static QUALIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(some|many|most|several|few|often|sometimes|usually|typically|generally|largely|mostly|certain|majority|minority|percent)\b|\d+%",
    )
    .unwrap()
});

static COMPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bthan\s+\w+|\bfrom\s+[\w$.,%]+\s+to\s+[\w$]+|\bcompared\s+(?:to|with)\s+\w+|\brelative\s+to\s+\w+",
    )
    .unwrap()
});

static MECHANISM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(according\s+to|stud(?:y|ies)|data|analysis|survey|research|records|statistics|evidence|found|showed|shows|measured|mechanism|through|via|by\s+(?:increasing|reducing|raising|lowering|cutting|making|allowing|preventing|blocking)|which\s+(?:meant|means|allowed|forced))\b",
    )
    .unwrap()
});

fn find_all(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.range()).collect()
}

/// OMIT_001: magnitude language with no number nearby.
pub struct BaselineDetector;

impl StructuralDetector for BaselineDetector {
    fn id(&self) -> &'static str {
        "OMIT_001"
    }
    fn omission_type(&self) -> OmissionType {
        OmissionType::BaselineMissing
    }
    fn severity(&self) -> Severity {
        Severity::Moderate
    }
    fn expected_context(&self) -> &'static str {
        "A baseline or denominator (prior value, comparison point, or absolute magnitude) for the described change."
    }
    fn absence_signal(&self) -> &'static str {
        "Magnitude language appears with no number in the surrounding text."
    }
    fn impact(&self) -> &'static str {
        "Without a baseline, readers cannot judge how large or unusual the change is."
    }
    fn missing_parameters(&self) -> &'static [MissingParameter] {
        &[
            MissingParameter::Baseline,
            MissingParameter::Denominator,
            MissingParameter::ComparatorClass,
            MissingParameter::AbsoluteValue,
        ]
    }
    fn triggers(&self, text: &str) -> Vec<Range<usize>> {
        find_all(&MAGNITUDE_RE, text)
    }
    fn context_present(&self, window: &str) -> bool {
        NUMBER_RE.is_match(window)
    }
}

/// OMIT_002: trend language with no date or relative-time hint nearby.
pub struct TimeWindowDetector;

impl StructuralDetector for TimeWindowDetector {
    fn id(&self) -> &'static str {
        "OMIT_002"
    }
    fn omission_type(&self) -> OmissionType {
        OmissionType::TimeWindowMissing
    }
    fn severity(&self) -> Severity {
        Severity::Moderate
    }
    fn expected_context(&self) -> &'static str {
        "A time window (dates or range) for the described trend."
    }
    fn absence_signal(&self) -> &'static str {
        "Trend language appears with no date or time-window anchor in the surrounding text."
    }
    fn impact(&self) -> &'static str {
        "Without a time window, a short-term blip and a long-term shift read the same."
    }
    fn missing_parameters(&self) -> &'static [MissingParameter] {
        &[MissingParameter::TimeWindow]
    }
    fn triggers(&self, text: &str) -> Vec<Range<usize>> {
        find_all(&TREND_RE, text)
    }
    fn context_present(&self, window: &str) -> bool {
        TIME_HINT_RE.is_match(window) || DATE_RE.is_match(window)
    }
}

/// OMIT_003: a universal quantifier about a group with no qualifier nearby.
pub struct ScopeBoundaryDetector;

impl StructuralDetector for ScopeBoundaryDetector {
    fn id(&self) -> &'static str {
        "OMIT_003"
    }
    fn omission_type(&self) -> OmissionType {
        OmissionType::ScopeBoundaryMissing
    }
    fn severity(&self) -> Severity {
        Severity::Moderate
    }
    fn expected_context(&self) -> &'static str {
        "The population or scope the generalization covers (who, where, how many)."
    }
    fn absence_signal(&self) -> &'static str {
        "A universal statement about a group appears with no qualifying or scoping words nearby."
    }
    fn impact(&self) -> &'static str {
        "Unscoped generalizations can read as covering a whole group when the support may be narrower."
    }
    fn missing_parameters(&self) -> &'static [MissingParameter] {
        &[MissingParameter::PopulationScope]
    }
    /// Quantifiers count only when a group noun shares their sentence.
    fn triggers(&self, text: &str) -> Vec<Range<usize>> {
        UNIVERSAL_RE
            .find_iter(text)
            .filter(|m| {
                sentence_containing(text, m.start())
                    .is_some_and(|(s, e)| GROUP_NOUN_RE.is_match(&text[s..e]))
            })
            .map(|m| m.range())
            .collect()
    }
    fn context_present(&self, window: &str) -> bool {
        QUALIFIER_RE.is_match(window)
    }
}

/// OMIT_004: a comparison cue with no explicit comparator structure nearby.
pub struct ComparisonClassDetector;

impl StructuralDetector for ComparisonClassDetector {
    fn id(&self) -> &'static str {
        "OMIT_004"
    }
    fn omission_type(&self) -> OmissionType {
        OmissionType::ComparisonClassMissing
    }
    fn severity(&self) -> Severity {
        Severity::Low
    }
    fn expected_context(&self) -> &'static str {
        "The comparison class (what this is being compared against)."
    }
    fn absence_signal(&self) -> &'static str {
        "Comparative language appears with no explicit \"than\", \"compared to\", or \"from X to Y\" structure nearby."
    }
    fn impact(&self) -> &'static str {
        "Without a stated comparator, readers cannot tell what the comparison is relative to."
    }
    fn missing_parameters(&self) -> &'static [MissingParameter] {
        &[MissingParameter::ComparatorClass, MissingParameter::Baseline]
    }
    fn triggers(&self, text: &str) -> Vec<Range<usize>> {
        find_all(&COMPARISON_RE, text)
    }
    fn context_present(&self, window: &str) -> bool {
        COMPARATOR_RE.is_match(window)
    }
}

/// OMIT_005: a causal connector with no mechanism or evidence marker nearby.
pub struct CausalBridgeDetector;

impl StructuralDetector for CausalBridgeDetector {
    fn id(&self) -> &'static str {
        "OMIT_005"
    }
    fn omission_type(&self) -> OmissionType {
        OmissionType::CausalBridgeMissing
    }
    fn severity(&self) -> Severity {
        Severity::Moderate
    }
    fn expected_context(&self) -> &'static str {
        "A mechanism or evidence type linking the stated cause to the effect."
    }
    fn absence_signal(&self) -> &'static str {
        "Causal language appears with no mechanism or evidence marker in the surrounding text."
    }
    fn impact(&self) -> &'static str {
        "Without a stated mechanism or evidence, the causal link is asserted rather than shown."
    }
    fn missing_parameters(&self) -> &'static [MissingParameter] {
        &[MissingParameter::Mechanism, MissingParameter::EvidenceType]
    }
    fn triggers(&self, text: &str) -> Vec<Range<usize>> {
        find_all(&CAUSAL_RE, text)
    }
    fn context_present(&self, window: &str) -> bool {
        MECHANISM_RE.is_match(window)
    }
}

/// The five structural detectors in id order.
pub fn builtin_detectors() -> Vec<Box<dyn StructuralDetector>> {
    vec![
        Box::new(BaselineDetector),
        Box::new(TimeWindowDetector),
        Box::new(ScopeBoundaryDetector),
        Box::new(ComparisonClassDetector),
        Box::new(CausalBridgeDetector),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_are_ordered_and_unique() {
        let ids: Vec<&str> = builtin_detectors().iter().map(|d| d.id()).collect();
        assert_eq!(ids, vec!["OMIT_001", "OMIT_002", "OMIT_003", "OMIT_004", "OMIT_005"]);
    }

    #[test]
    fn test_magnitude_inflections() {
        let d = BaselineDetector;
        assert_eq!(d.triggers("Crime surged downtown.").len(), 1);
        assert_eq!(d.triggers("Prices plummeted, then soared.").len(), 2);
        assert!(d.triggers("Sales held steady.").is_empty());
    }

    #[test]
    fn test_time_window_context() {
        let d = TimeWindowDetector;
        assert!(d.context_present("Thefts are increasing since 2021."));
        assert!(d.context_present("Rents rose over the past decade."));
        assert!(d.context_present("Rents rose in March."));
        assert!(!d.context_present("Rents are rising and may march higher."));
    }

    #[test]
    fn test_scope_requires_group_noun() {
        let d = ScopeBoundaryDetector;
        assert_eq!(d.triggers("All residents oppose the plan.").len(), 1);
        assert!(d.triggers("All of it was gone.").is_empty());
        assert!(d.context_present("Most residents oppose the plan."));
    }

    #[test]
    fn test_comparator_structure() {
        let d = ComparisonClassDetector;
        assert!(d.context_present("Turnout was higher than in 2020."));
        assert!(d.context_present("Costs went from $4 to $9."));
        assert!(d.context_present("Rates fell relative to inflation."));
        assert!(!d.context_present("Turnout was comparatively high."));
    }

    #[test]
    fn test_causal_mechanism_markers() {
        let d = CausalBridgeDetector;
        assert_eq!(d.triggers("The plant closed because of the tariff.").len(), 1);
        assert!(d.context_present("according to county data"));
        assert!(!d.context_present("The plant closed because of the tariff."));
    }
}
