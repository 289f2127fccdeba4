use proptest::prelude::*;

use biaslens_common::config::{OmissionConfig, TimelineConfig};
use biaslens_common::types::{Claim, EvidenceItem, SourceDescriptor, StarRating};
use biaslens_common::EvidenceId;
use biaslens_engine::evidence::{allocate_id, segment_source, EvidenceStore};
use biaslens_engine::omissions::OmissionScanner;
use biaslens_engine::rating::{score_to_stars, stars_to_score_midpoint};
use biaslens_engine::timeline::{extract_timeline_events, sort_events};

fn item(id: &str) -> EvidenceItem {
    EvidenceItem {
        id: EvidenceId::from(id),
        quote: "q".into(),
        start_offset: 0,
        end_offset: 1,
        why_relevant: String::new(),
        source: SourceDescriptor::default(),
    }
}

fn claim_text() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["", "Monday", "Tuesday", "Friday", "Sunday", "In March"]),
        prop::sample::select(vec!["", "at 5:32 p.m.", "at 9:00 am", "at 12:15", "at 4:10pm"]),
    )
        .prop_map(|(day, time)| format!("{} {} something happened.", day, time))
}

proptest! {
    #[test]
    fn anchored_quotes_are_verbatim(
        text in "\\PC{0,120}",
        a in 0usize..140,
        b in 0usize..140,
    ) {
        let mut store = EvidenceStore::new();
        if let Some(id) = store.add_span(&text, a, b, &SourceDescriptor::default(), "p") {
            let item = store.get(&id).unwrap();
            prop_assert_eq!(&text[item.start_offset..item.end_offset], item.quote.as_str());
            prop_assert!(!item.quote.trim().is_empty());
        } else {
            prop_assert!(store.is_empty());
        }
    }

    #[test]
    fn segmentation_and_omission_anchors_are_verbatim(text in "[A-Za-z0-9 ,.%\n]{0,400}") {
        let source = SourceDescriptor::default();
        let mut store = EvidenceStore::new();
        segment_source(&mut store, &text, &source, &Default::default());
        let config = OmissionConfig::default();
        let findings = OmissionScanner::new(&config).scan(&text, &mut store, &source);
        for item in store.items() {
            prop_assert_eq!(&text[item.start_offset..item.end_offset], item.quote.as_str());
        }
        for finding in &findings {
            prop_assert!(!finding.evidence_refs.is_empty());
            for eid in &finding.evidence_refs {
                prop_assert!(store.contains(eid));
            }
        }
    }

    #[test]
    fn allocate_id_is_max_plus_one(suffixes in prop::collection::vec(0u64..10_000, 0..20)) {
        let mut items: Vec<EvidenceItem> =
            suffixes.iter().map(|n| item(&format!("E{}", n))).collect();
        items.push(item("X99999"));
        let id = allocate_id(&items).unwrap();

        let expected = suffixes.iter().max().map_or(1, |m| m + 1);
        prop_assert_eq!(id.numeric_suffix(), Some(expected));
        prop_assert!(items.iter().all(|i| i.id != id));
    }

    #[test]
    fn score_stars_round_trip(score in 0i64..=100) {
        let stars = score_to_stars(score);
        let mid = stars_to_score_midpoint(stars);
        prop_assert_eq!(score_to_stars(i64::from(mid)), stars);
        prop_assert!(stars >= StarRating::MIN && stars <= StarRating::MAX);
    }

    #[test]
    fn timeline_order_is_total(
        texts in prop::collection::vec(claim_text(), 0..12),
        seed in any::<u64>(),
    ) {
        let claims: Vec<Claim> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| Claim::new(format!("C{}", i), t.as_str()))
            .collect();
        let events = extract_timeline_events(&claims, &TimelineConfig::default());

        let mut shuffled = events.clone();
        if !shuffled.is_empty() {
            let k = (seed % shuffled.len() as u64) as usize;
            shuffled.rotate_left(k);
            shuffled.reverse();
        }
        sort_events(&mut shuffled);
        prop_assert_eq!(&shuffled, &events);

        sort_events(&mut shuffled);
        prop_assert_eq!(shuffled, events);
    }
}
