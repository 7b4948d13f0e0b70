//! Cross-checks the closed-form candidate formulas in `candidates.rs`
//! against brute-force tuple enumeration.

use std::collections::BTreeSet;

use kenken_solver::candidates::{difference_candidates, product_candidates, ratio_candidates, sum_candidates};
use proptest::option;
use proptest::prelude::*;

/// Every combination of `missing` values drawn from `1..=n` for which
/// `pred` holds, with the values occupying the "missing" positions
/// collected into a set (the expected candidate set).
fn brute_force_missing<F: Fn(&[u8]) -> bool>(n: u8, missing: usize, pred: F) -> BTreeSet<u8> {
    let mut out = BTreeSet::new();
    let mut tuple = vec![0u8; missing];
    fn rec(
        n: u8,
        idx: usize,
        tuple: &mut [u8],
        pred: &dyn Fn(&[u8]) -> bool,
        out: &mut BTreeSet<u8>,
    ) {
        if idx == tuple.len() {
            if pred(tuple) {
                out.extend(tuple.iter().copied());
            }
            return;
        }
        for v in 1..=n {
            tuple[idx] = v;
            rec(n, idx + 1, tuple, pred, out);
        }
    }
    rec(n, 0, &mut tuple, &pred, &mut out);
    out
}

proptest! {
    #[test]
    fn sum_candidates_match_brute_force(
        n in 2u8..=6,
        missing in 1usize..=3,
        known_sum in 0i64..=10,
        target in 2i64..=30,
    ) {
        let expect = brute_force_missing(n, missing, |t| {
            known_sum + t.iter().map(|&v| v as i64).sum::<i64>() == target
        });
        let got: BTreeSet<u8> = sum_candidates(n, target, known_sum, missing).iter().collect();
        prop_assert_eq!(got, expect);
    }

    #[test]
    fn product_candidates_match_brute_force(
        n in 2u8..=6,
        missing in 1usize..=3,
        known_product in 1i64..=4,
        target in 1i64..=60,
    ) {
        let expect = brute_force_missing(n, missing, |t| {
            known_product * t.iter().map(|&v| v as i64).product::<i64>() == target
        });
        let got: BTreeSet<u8> = product_candidates(n, target, known_product, missing).iter().collect();
        prop_assert_eq!(got, expect);
    }

    #[test]
    fn difference_candidates_match_brute_force(
        n in 3u8..=6,
        known in option::of(1u8..=6),
        target in 0i64..=5,
    ) {
        prop_assume!(known.is_none_or(|k| k <= n));
        let missing = if known.is_some() { 1 } else { 2 };
        let known_slice: Vec<u8> = known.into_iter().collect();
        let expect = brute_force_missing(n, missing, |t| {
            let all: Vec<i64> = known_slice.iter().chain(t.iter()).map(|&v| v as i64).collect();
            let m = *all.iter().max().expect("at least one value");
            let rest_sum: i64 = all.iter().sum::<i64>() - m;
            m - rest_sum == target
        });
        let got: BTreeSet<u8> = difference_candidates(n, target, &known_slice, missing).iter().collect();
        prop_assert_eq!(got, expect);
    }

    #[test]
    fn ratio_candidates_match_brute_force(
        n in 3u8..=6,
        known in option::of(1u8..=6),
        target in 1i64..=5,
    ) {
        prop_assume!(known.is_none_or(|k| k <= n));
        let missing = if known.is_some() { 1 } else { 2 };
        let known_slice: Vec<u8> = known.into_iter().collect();
        let expect = brute_force_missing(n, missing, |t| {
            let all: Vec<i64> = known_slice.iter().chain(t.iter()).map(|&v| v as i64).collect();
            let m = *all.iter().max().expect("at least one value");
            let rest_product: i64 = all.iter().product::<i64>() / m;
            m == target * rest_product
        });
        let got: BTreeSet<u8> = ratio_candidates(n, target, &known_slice, missing).iter().collect();
        prop_assert_eq!(got, expect);
    }
}
