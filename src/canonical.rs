use std::cmp::Ordering;

use crate::domain::candidate::PriceCandidate;
use crate::domain::outcome::AcquisitionResult;
use crate::domain::strategy::StrategyKind;

/// Sort candidates cheapest first and drop near-duplicate amounts.
///
/// Two candidates closer than `tolerance` in the same currency are treated
/// as the same physical room observed twice (listing card plus embedded
/// blob, say); the cheaper observation wins. Idempotent: running it on its
/// own output changes nothing.
pub fn dedup_candidates(mut candidates: Vec<PriceCandidate>, tolerance: f64) -> Vec<PriceCandidate> {
    candidates.sort_by(|a, b| a.amount.partial_cmp(&b.amount).unwrap_or(Ordering::Equal));

    let mut kept: Vec<PriceCandidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let duplicate = kept.last().is_some_and(|prev| {
            prev.currency == candidate.currency && (candidate.amount - prev.amount).abs() < tolerance
        });
        if !duplicate {
            kept.push(candidate);
        }
    }
    kept
}

/// Final shaping of a successful strategy's candidate pool into the
/// published result. Bounds validation already happened at extraction time,
/// so the only remaining work is ordering and tolerance dedup.
pub fn canonicalize(
    candidates: Vec<PriceCandidate>,
    strategy: StrategyKind,
    tolerance: f64,
) -> AcquisitionResult {
    AcquisitionResult::success(strategy, dedup_candidates(candidates, tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn candidate(amount: f64, label: &str) -> PriceCandidate {
        PriceCandidate::new(amount, "ILS", label, StrategyKind::DirectFetch)
    }

    #[test]
    fn near_duplicates_merge_keeping_cheaper() {
        let pool = vec![candidate(308.0, "Standard Room"), candidate(300.0, "Standard Room")];
        let kept = dedup_candidates(pool, 10.0);
        assert_eq!(kept.len(), 1);
        assert!((kept[0].amount - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn distinct_amounts_survive() {
        let pool = vec![candidate(620.0, "Deluxe Room"), candidate(450.0, "Standard Room")];
        let kept = dedup_candidates(pool, 10.0);
        assert_eq!(kept.len(), 2);
        assert!((kept[0].amount - 450.0).abs() < f64::EPSILON);
        assert!((kept[1].amount - 620.0).abs() < f64::EPSILON);
    }

    #[test]
    fn different_currencies_never_merge() {
        let mut pool = vec![candidate(300.0, "Standard Room")];
        let mut eur = candidate(305.0, "Standard Room");
        eur.currency = "EUR".to_string();
        pool.push(eur);
        assert_eq!(dedup_candidates(pool, 10.0).len(), 2);
    }

    #[test]
    fn chain_of_near_duplicates_collapses_pairwise() {
        // 300 vs 308 merge; 308 vs 316 never compared because 308 is gone,
        // but 316 is within tolerance of the kept 300+? No: 316-300=16 >= 10.
        let pool = vec![
            candidate(300.0, "A"),
            candidate(308.0, "B"),
            candidate(316.0, "C"),
        ];
        let kept = dedup_candidates(pool, 10.0);
        assert_eq!(kept.len(), 2);
        assert!((kept[0].amount - 300.0).abs() < f64::EPSILON);
        assert!((kept[1].amount - 316.0).abs() < f64::EPSILON);
    }

    #[test]
    fn canonicalize_sorts_cheapest_first() {
        let pool = vec![candidate(620.0, "Deluxe Room"), candidate(450.0, "Standard Room")];
        let result = canonicalize(pool, StrategyKind::DirectFetch, 10.0);
        assert!(result.success);
        assert_eq!(result.strategy, Some(StrategyKind::DirectFetch));
        assert!((result.best().unwrap().amount - 450.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parsing_twice_and_concatenating_dedups_to_one_parse() {
        use crate::domain::content::RawContent;
        use crate::parser::amount::Bounds;
        use crate::parser::extract::extract_candidates;

        let content = RawContent::markdown(
            StrategyKind::AiSearch,
            "Standard Room ₪450 and Deluxe Room ₪620",
        );
        let bounds = Bounds::new(50.0, 50_000.0);
        let once = dedup_candidates(extract_candidates(&content, bounds), 10.0);
        let mut twice = extract_candidates(&content, bounds);
        twice.extend(extract_candidates(&content, bounds));
        let twice = dedup_candidates(twice, 10.0);

        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert!((a.amount - b.amount).abs() < f64::EPSILON);
        }
    }

    proptest! {
        #[test]
        fn dedup_is_idempotent(amounts in proptest::collection::vec(50.0f64..50_000.0, 1..20)) {
            let pool: Vec<PriceCandidate> =
                amounts.iter().map(|&a| candidate(a, "Room")).collect();
            let once = dedup_candidates(pool, 10.0);
            let twice = dedup_candidates(once.clone(), 10.0);
            prop_assert_eq!(once.len(), twice.len());
            for (a, b) in once.iter().zip(twice.iter()) {
                prop_assert!((a.amount - b.amount).abs() < f64::EPSILON);
            }
        }

        #[test]
        fn dedup_output_is_sorted_and_spaced(amounts in proptest::collection::vec(50.0f64..50_000.0, 1..20)) {
            let pool: Vec<PriceCandidate> =
                amounts.iter().map(|&a| candidate(a, "Room")).collect();
            let kept = dedup_candidates(pool, 10.0);
            prop_assert!(!kept.is_empty());
            for pair in kept.windows(2) {
                prop_assert!(pair[1].amount - pair[0].amount >= 10.0);
            }
        }
    }
}
