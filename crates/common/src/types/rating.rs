use serde::{Deserialize, Serialize};

use crate::error::{BiasLensError, Result};

/// A 1–5 star rating. Construction outside that range is impossible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StarRating(u8);

impl StarRating {
    pub const MIN: StarRating = StarRating(1);
    pub const MAX: StarRating = StarRating(5);

    pub fn new(stars: u8) -> Option<Self> {
        (1..=5).contains(&stars).then_some(Self(stars))
    }

    /// Clamp any integer into the 1–5 range.
    pub fn clamped(stars: i64) -> Self {
        Self(stars.clamp(1, 5) as u8)
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for StarRating {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("stars must be 1-5, got {}", value))
    }
}

impl From<StarRating> for u8 {
    fn from(stars: StarRating) -> Self {
        stars.0
    }
}

/// Confidence attached to a rating object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// One row of the canonical star table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRow {
    pub stars: StarRating,
    pub label: String,
    pub color: String,
}

/// The single source of truth for star → (label, color).
///
/// Every rating object takes its label and color from an instance of this
/// table passed by reference; no consumer holds its own copy of the strings.
/// Always holds exactly one row per star value, ordered 1..=5.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RatingRow>", into = "Vec<RatingRow>")]
pub struct RatingTable {
    rows: Vec<RatingRow>,
}

impl RatingTable {
    /// Build a table from rows in any order. Fails unless every star value
    /// 1..=5 appears exactly once with a non-blank label and color.
    pub fn new(mut rows: Vec<RatingRow>) -> Result<Self> {
        rows.sort_by_key(|r| r.stars);
        let stars: Vec<u8> = rows.iter().map(|r| r.stars.get()).collect();
        if stars != [1, 2, 3, 4, 5] {
            return Err(BiasLensError::Validation(format!(
                "rating table must have exactly one row per star 1-5, got {:?}",
                stars
            )));
        }
        if let Some(row) = rows
            .iter()
            .find(|r| r.label.trim().is_empty() || r.color.trim().is_empty())
        {
            return Err(BiasLensError::Validation(format!(
                "rating table row for {} stars has a blank label or color",
                row.stars.get()
            )));
        }
        Ok(Self { rows })
    }

    pub fn row(&self, stars: StarRating) -> &RatingRow {
        // Invariant from `new`: rows[i] has stars == i + 1.
        &self.rows[usize::from(stars.get() - 1)]
    }

    pub fn label(&self, stars: StarRating) -> &str {
        &self.row(stars).label
    }

    pub fn color(&self, stars: StarRating) -> &str {
        &self.row(stars).color
    }

    pub fn rows(&self) -> &[RatingRow] {
        &self.rows
    }

    /// The only way to build a [`RatingObject`].
    ///
    /// Label and color come from this table. Requires a non-empty rationale;
    /// ratings of 4 stars or fewer require improvement suggestions, and a
    /// 5-star rating requires improvement suggestions or maintenance notes.
    pub fn rate(&self, draft: RatingDraft) -> Result<RatingObject> {
        if draft.rationale.iter().all(|r| r.trim().is_empty()) {
            return Err(BiasLensError::Rating("rationale must be non-empty".into()));
        }

        let has_improvements = draft
            .improvement_suggestions
            .iter()
            .any(|s| !s.trim().is_empty());
        let has_maintenance = draft.maintenance_notes.iter().any(|s| !s.trim().is_empty());

        if draft.stars.get() <= 4 && !has_improvements {
            return Err(BiasLensError::Rating(format!(
                "improvement suggestions are required for {} stars",
                draft.stars.get()
            )));
        }
        if draft.stars.get() == 5 && !has_improvements && !has_maintenance {
            return Err(BiasLensError::Rating(
                "5 stars requires improvement suggestions or maintenance notes".into(),
            ));
        }
        if let Some(score) = draft.score_0_100 {
            if score > 100 {
                return Err(BiasLensError::Rating(format!(
                    "score_0_100 must be within 0-100, got {}",
                    score
                )));
            }
        }

        let row = self.row(draft.stars);
        Ok(RatingObject {
            stars: draft.stars,
            label: row.label.clone(),
            color: row.color.clone(),
            confidence: draft.confidence,
            score_0_100: draft.score_0_100,
            rationale: draft.rationale,
            improvement_suggestions: draft.improvement_suggestions,
            maintenance_notes: draft.maintenance_notes,
        })
    }
}

impl Default for RatingTable {
    fn default() -> Self {
        let row = |stars: u8, label: &str, color: &str| RatingRow {
            stars: StarRating(stars),
            label: label.to_string(),
            color: color.to_string(),
        };
        Self {
            rows: vec![
                row(1, "Severe Integrity Failures", "red"),
                row(2, "Major Integrity Problems", "orange"),
                row(3, "Mixed / Variable Integrity", "yellow"),
                row(4, "Strong Information Integrity", "green"),
                row(5, "Exceptional Information Integrity", "blue"),
            ],
        }
    }
}

impl TryFrom<Vec<RatingRow>> for RatingTable {
    type Error = BiasLensError;

    fn try_from(rows: Vec<RatingRow>) -> Result<Self> {
        Self::new(rows)
    }
}

impl From<RatingTable> for Vec<RatingRow> {
    fn from(table: RatingTable) -> Self {
        table.rows
    }
}

/// Inputs to [`RatingTable::rate`]; everything except label and color.
#[derive(Clone, Debug)]
pub struct RatingDraft {
    pub stars: StarRating,
    pub confidence: Confidence,
    pub score_0_100: Option<u8>,
    pub rationale: Vec<String>,
    pub improvement_suggestions: Vec<String>,
    pub maintenance_notes: Vec<String>,
}

impl RatingDraft {
    pub fn new(stars: StarRating, confidence: Confidence) -> Self {
        Self {
            stars,
            confidence,
            score_0_100: None,
            rationale: Vec::new(),
            improvement_suggestions: Vec::new(),
            maintenance_notes: Vec::new(),
        }
    }
}

/// Canonical rating object consumed by the report assembler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingObject {
    pub stars: StarRating,
    pub label: String,
    pub color: String,
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_0_100: Option<u8>,
    pub rationale: Vec<String>,
    #[serde(default)]
    pub improvement_suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maintenance_notes: Vec<String>,
}
