//! Per-cage-type candidate derivation (see `kenken-core`'s `Cage`): given a
//! cage's operator, target, and the values already placed in its filled
//! cells, compute the set of values that could legally occupy *any one* of
//! its remaining empty cells.
//!
//! `Difference` and `Ratio` are asymmetric in their largest member, so both
//! are computed as the union of a "max already known" case and a "max still
//! missing" case, rather than by exhaustive enumeration of every
//! `{1..N}^missing` tuple.

use kenken_core::{Cage, CageOp, ValueSet};

/// The candidate set for any one of a cage's empty cells, given the values
/// already assigned to its filled cells.
pub fn cage_candidates(cage: &Cage, n: u8, known: &[u8]) -> ValueSet {
    let missing = cage.cells.len() - known.len();
    if missing == 0 {
        return ValueSet::EMPTY;
    }
    match cage.op {
        CageOp::Sum => sum_candidates(n, cage.target, sum_i64(known), missing),
        CageOp::Product => product_candidates(n, cage.target, product_i64(known), missing),
        CageOp::Difference => difference_candidates(n, cage.target, known, missing),
        CageOp::Ratio => ratio_candidates(n, cage.target, known, missing),
    }
}

fn sum_i64(vals: &[u8]) -> i64 {
    vals.iter().map(|&v| v as i64).sum()
}

fn product_i64(vals: &[u8]) -> i64 {
    vals.iter().map(|&v| v as i64).product()
}

fn singleton_if_in_range(v: i64, n: u8) -> ValueSet {
    if (1..=n as i64).contains(&v) {
        ValueSet::singleton(v as u8)
    } else {
        ValueSet::EMPTY
    }
}

fn range_value_set(lo: i64, hi: i64, n: u8) -> ValueSet {
    let lo = lo.max(1);
    let hi = hi.min(n as i64);
    if lo > hi {
        return ValueSet::EMPTY;
    }
    ValueSet::range(lo as u8, hi as u8)
}

/// `missing` addends drawn from `{1..N}` (repeats allowed) summing to
/// `target - known_sum`.
pub fn sum_candidates(n: u8, target: i64, known_sum: i64, missing: usize) -> ValueSet {
    let t = target - known_sum;
    if missing == 1 {
        return singleton_if_in_range(t, n);
    }
    let m = (missing - 1) as i64;
    let lo = t - (n as i64) * m;
    let hi = t - m;
    range_value_set(lo, hi, n)
}

/// `missing` factors drawn from `{1..N}` (repeats allowed) whose product is
/// `target / known_product` (empty if not an exact multiple).
pub fn product_candidates(n: u8, target: i64, known_product: i64, missing: usize) -> ValueSet {
    if known_product == 0 || target % known_product != 0 {
        return ValueSet::EMPTY;
    }
    let t = target / known_product;
    if missing == 1 {
        // Conjunction, not disjunction: see the design notes on the source's
        // `n == 1` guard typo.
        return singleton_if_in_range(t, n);
    }
    if t < 1 {
        return ValueSet::EMPTY;
    }
    let mut out = ValueSet::EMPTY;
    let mut i: i64 = 1;
    while i * i <= t {
        if t % i == 0 {
            // `i` and `t/i` are each independently a candidate once in
            // range, not only as a matched pair: with 3+ missing cells a
            // divisor's cofactor can be split further across the other
            // empty cells, so requiring both factors to fit in [1, N]
            // wrongly drops candidates a larger cage can still complete.
            if i <= n as i64 {
                out.insert(i as u8);
            }
            let other = t / i;
            if other <= n as i64 {
                out.insert(other as u8);
            }
        }
        i += 1;
    }
    out
}

/// Union of the "max already known" and "max still missing" cases.
pub fn difference_candidates(n: u8, target: i64, known: &[u8], missing: usize) -> ValueSet {
    let mut out = ValueSet::EMPTY;

    if let Some(&m) = known.iter().max() {
        let m = m as i64;
        let p = sum_i64(known);
        out = out.union(sum_candidates(n, 2 * m - p - target, 0, missing));
    }

    let p = sum_i64(known);
    let addends_missing = missing - 1;
    let lo = (target + p + addends_missing as i64).max(1);
    for cand_max in lo..=n as i64 {
        let addend_target = cand_max - target - p;
        if addends_missing == 0 {
            if addend_target == 0 {
                out.insert(cand_max as u8);
            }
            continue;
        }
        let addend_set = sum_candidates(n, addend_target, 0, addends_missing);
        if !addend_set.is_empty() {
            out = out.union(addend_set);
            out.insert(cand_max as u8);
        }
    }

    out
}

/// Multiplicative analog of [`difference_candidates`].
pub fn ratio_candidates(n: u8, target: i64, known: &[u8], missing: usize) -> ValueSet {
    let mut out = ValueSet::EMPTY;

    if let Some(&m) = known.iter().max() {
        let m = m as i64;
        let p = product_i64(known);
        let denom = p * target;
        if denom != 0 && (m * m) % denom == 0 {
            out = out.union(product_candidates(n, (m * m) / denom, 1, missing));
        }
    }

    let p = product_i64(known);
    let addends_missing = missing - 1;
    let mut i: i64 = 1;
    loop {
        let cand_max = i * p * target;
        if cand_max > n as i64 {
            break;
        }
        if addends_missing == 0 {
            if i == 1 {
                out.insert(cand_max as u8);
            }
        } else {
            let factor_set = product_candidates(n, i, 1, addends_missing);
            if !factor_set.is_empty() {
                out = out.union(factor_set);
                out.insert(cand_max as u8);
            }
        }
        i += 1;
    }

    out
}
