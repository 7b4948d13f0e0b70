use kenken_core::ValueSet;
use proptest::prelude::*;

fn arb_n() -> impl Strategy<Value = u8> {
    1u8..=16
}

proptest! {
    #[test]
    fn union_is_commutative(a in 1u8..=16, b in 1u8..=16) {
        let a = ValueSet::singleton(a);
        let b = ValueSet::singleton(b);
        prop_assert_eq!(a.union(b), b.union(a));
    }

    #[test]
    fn intersect_is_commutative(a in 1u8..=16, b in 1u8..=16) {
        let a = ValueSet::singleton(a);
        let b = ValueSet::singleton(b);
        prop_assert_eq!(a.intersect(b), b.intersect(a));
    }

    #[test]
    fn double_complement_is_identity(n in arb_n(), v in 1u8..=16) {
        prop_assume!(v <= n);
        let s = ValueSet::singleton(v);
        prop_assert_eq!(s.complement(n).complement(n), s);
    }

    #[test]
    fn complement_is_disjoint_and_covers_all(n in arb_n(), v in 1u8..=16) {
        prop_assume!(v <= n);
        let s = ValueSet::singleton(v);
        let c = s.complement(n);
        prop_assert!(s.intersect(c).is_empty());
        prop_assert_eq!(s.union(c), ValueSet::all(n));
    }

    #[test]
    fn range_count_matches_width(lo in 1u8..=16, width in 0u8..=15) {
        let hi = (lo + width).min(16);
        let s = ValueSet::range(lo, hi);
        prop_assert_eq!(s.count(), (hi - lo + 1) as u32);
    }

    #[test]
    fn all_n_has_exactly_n_members(n in arb_n()) {
        let full = ValueSet::all(n);
        prop_assert_eq!(full.count(), n as u32);
        for v in 1..=n {
            prop_assert!(full.contains(v));
        }
        if n < 16 {
            prop_assert!(!full.contains(n + 1));
        }
    }
}
