//! Randomized bounds checks for the aggregation primitives

use cohort_audit::algorithm::aggregate::{completeness, percentages, sum_counts};
use cohort_audit::models::CountMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_counts(rng: &mut StdRng) -> CountMap {
    let keys = ["white", "black", "asian", "hispanic", "other", "unknown"];
    let len = rng.random_range(1..=keys.len());
    keys[..len]
        .iter()
        .map(|k| {
            let count = if rng.random_bool(0.1) {
                None
            } else {
                Some(rng.random_range(0..1000u64))
            };
            (*k, count)
        })
        .collect()
}

#[test]
fn test_percentages_and_completeness_stay_in_bounds() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..500 {
        let counts = random_counts(&mut rng);
        let total = counts.total() + rng.random_range(0..500u64);

        for pct in percentages(&counts, total).values() {
            assert!((0.0..=100.0).contains(pct), "percentage {pct} out of bounds");
        }

        for excluded in [&[][..], &["unknown"][..]] {
            let c = completeness(&counts, total, excluded);
            assert!((0.0..=1.0).contains(&c), "completeness {c} out of bounds");
        }
    }
}

#[test]
fn test_zero_total_never_divides() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..50 {
        let counts = random_counts(&mut rng);
        assert!(percentages(&counts, 0).values().all(|v| *v == 0.0));
        assert_eq!(completeness(&counts, 0, &["unknown"]), 0.0);
    }
}

#[test]
fn test_sum_counts_preserves_grand_total() {
    let mut rng = StdRng::seed_from_u64(23);

    for _ in 0..200 {
        let a = random_counts(&mut rng);
        let b = random_counts(&mut rng);
        let c = random_counts(&mut rng);

        let summed = sum_counts([&a, &b, &c]).unwrap();
        assert_eq!(summed.total(), a.total() + b.total() + c.total());
        assert!(a.keys().all(|k| summed.contains_key(k)));
    }
}
