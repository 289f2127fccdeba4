//! Rating Aggregator: the fixed score ↔ star bands and rating objects built
//! from the injected canonical table.

use biaslens_common::types::{
    ClaimEvaluation, Confidence, RatingDraft, RatingObject, RatingTable, StarRating,
};

/// Fixed bands: [0,20)→1, [20,40)→2, [40,60)→3, [60,80)→4, [80,100]→5.
/// Scores outside 0..=100 are clamped first.
pub fn score_to_stars(score: i64) -> StarRating {
    let s = score.clamp(0, 100);
    StarRating::clamped(s / 20 + 1)
}

/// Stable midpoint of a star band; `score_to_stars` of it returns the band.
pub fn stars_to_score_midpoint(stars: StarRating) -> u8 {
    match stars.get() {
        1 => 10,
        2 => 30,
        3 => 50,
        4 => 70,
        _ => 90,
    }
}

/// Inclusive score range of a star band.
pub fn stars_to_score_range(stars: StarRating) -> (u8, u8) {
    match stars.get() {
        1 => (0, 19),
        2 => (20, 39),
        3 => (40, 59),
        4 => (60, 79),
        _ => (80, 100),
    }
}

/// Fill a missing score with the midpoint of the object's star band.
pub fn ensure_score_midpoint(rating: &mut RatingObject) {
    if rating.score_0_100.is_none() {
        rating.score_0_100 = Some(stars_to_score_midpoint(rating.stars));
    }
}

/// Claim-grounding rating derived from a claim evaluation.
///
/// Structural-risk scoring from text signals only, never truth
/// verification, so confidence is always low. `None` when the evaluation
/// had insufficient data: no score means no rating.
pub fn claim_grounding(evaluation: &ClaimEvaluation, table: &RatingTable) -> Option<RatingObject> {
    if !evaluation.sufficiency.is_sufficient() {
        return None;
    }
    let score = evaluation.score_0_100?;
    let stars = score_to_stars(i64::from(score));

    let mut draft = RatingDraft::new(stars, Confidence::Low);
    draft.score_0_100 = Some(score);
    draft.rationale = vec![
        "Claim grounding is computed from deterministic structural text signals, not truth verification.".to_string(),
        format!(
            "Claim evaluation emitted {} issue item(s) across {} claim(s); the score summarizes severity-weighted structural risk.",
            evaluation.items.len(),
            evaluation.claim_count
        ),
    ];
    if stars.get() <= 4 {
        draft.improvement_suggestions = vec![
            "Add disambiguating nouns or names when using pronouns (they/it/this).".to_string(),
            "Avoid absolute terms (always/never) unless strong evidence and scope limits are given.".to_string(),
            "When asserting causality, include mechanism and evidence and consider alternative explanations.".to_string(),
            "Treat motive or intent language as a hypothesis; add direct support or rephrase as uncertainty.".to_string(),
        ];
    } else {
        draft.maintenance_notes =
            vec!["Maintain: keep claims specific, qualified, and evidence-tethered.".to_string()];
    }

    match table.rate(draft) {
        Ok(rating) => Some(rating),
        Err(e) => {
            tracing::warn!(error = %e, "Claim grounding rating rejected");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biaslens_common::types::{ModuleStatus, Sufficiency};

    fn stars(n: u8) -> StarRating {
        StarRating::new(n).unwrap()
    }

    fn evaluation(score: Option<u8>) -> ClaimEvaluation {
        ClaimEvaluation {
            status: ModuleStatus::Run,
            sufficiency: if score.is_some() {
                Sufficiency::Sufficient
            } else {
                Sufficiency::InsufficientData
            },
            items: Vec::new(),
            score_0_100: score,
            claim_count: usize::from(score.is_some()),
            notes: Vec::new(),
        }
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(score_to_stars(0), stars(1));
        assert_eq!(score_to_stars(19), stars(1));
        assert_eq!(score_to_stars(20), stars(2));
        assert_eq!(score_to_stars(59), stars(3));
        assert_eq!(score_to_stars(60), stars(4));
        assert_eq!(score_to_stars(79), stars(4));
        assert_eq!(score_to_stars(80), stars(5));
        assert_eq!(score_to_stars(100), stars(5));
        assert_eq!(score_to_stars(-5), stars(1));
        assert_eq!(score_to_stars(250), stars(5));
    }

    #[test]
    fn test_midpoint_inside_range() {
        for n in 1..=5 {
            let (lo, hi) = stars_to_score_range(stars(n));
            let mid = stars_to_score_midpoint(stars(n));
            assert!(lo <= mid && mid <= hi);
            assert_eq!(score_to_stars(i64::from(lo)), stars(n));
            assert_eq!(score_to_stars(i64::from(hi)), stars(n));
        }
    }

    #[test]
    fn test_claim_grounding_improvements_below_five() {
        let table = RatingTable::default();
        let rating = claim_grounding(&evaluation(Some(53)), &table).unwrap();
        assert_eq!(rating.stars, stars(3));
        assert_eq!(rating.label, table.label(stars(3)));
        assert_eq!(rating.color, "yellow");
        assert_eq!(rating.confidence, Confidence::Low);
        assert_eq!(rating.score_0_100, Some(53));
        assert_eq!(rating.improvement_suggestions.len(), 4);
        assert!(rating.maintenance_notes.is_empty());
    }

    #[test]
    fn test_claim_grounding_maintenance_at_five() {
        let rating = claim_grounding(&evaluation(Some(100)), &RatingTable::default()).unwrap();
        assert_eq!(rating.stars, stars(5));
        assert!(rating.improvement_suggestions.is_empty());
        assert_eq!(rating.maintenance_notes.len(), 1);
    }

    #[test]
    fn test_claim_grounding_none_without_score() {
        assert!(claim_grounding(&evaluation(None), &RatingTable::default()).is_none());
    }

    #[test]
    fn test_claim_grounding_none_when_insufficient() {
        let mut eval = evaluation(Some(80));
        eval.sufficiency = Sufficiency::InsufficientData;
        assert!(claim_grounding(&eval, &RatingTable::default()).is_none());
    }

    #[test]
    fn test_ensure_score_midpoint() {
        let mut rating = claim_grounding(&evaluation(Some(35)), &RatingTable::default()).unwrap();
        ensure_score_midpoint(&mut rating);
        assert_eq!(rating.score_0_100, Some(35));

        rating.score_0_100 = None;
        ensure_score_midpoint(&mut rating);
        assert_eq!(rating.score_0_100, Some(30));
    }
}
