//! Cross-checks random generation against the invariants it must hold
//! regardless of seed: every fill is a genuine Latin square, and every
//! sequence of cage mutations leaves the puzzle in a state the solver's
//! validator accepts.

use kenken_core::{CellPos, Ruleset};
use kenken_gen::cages::Workspace;
use kenken_gen::{generate_grid, rng_from_u64};
use proptest::prelude::*;
use rand::Rng;

fn assert_is_latin_square(grid: &[u8; kenken_core::GRID_CELLS], n: u8) {
    for y in 0..n {
        let mut row: Vec<u8> = (0..n).map(|x| grid[CellPos::new(x, y).index()]).collect();
        row.sort_unstable();
        assert_eq!(row, (1..=n).collect::<Vec<u8>>());
    }
    for x in 0..n {
        let mut col: Vec<u8> = (0..n).map(|y| grid[CellPos::new(x, y).index()]).collect();
        col.sort_unstable();
        assert_eq!(col, (1..=n).collect::<Vec<u8>>());
    }
}

proptest! {
    #[test]
    fn generate_grid_is_always_a_latin_square(seed in any::<u64>(), n in 1u8..=10) {
        let mut rng = rng_from_u64(seed);
        let grid = generate_grid(n, &mut rng);
        assert_is_latin_square(&grid, n);
    }

    /// A random walk of `join_cells`/`remove_cell` calls over a fresh
    /// workspace never leaves the underlying puzzle invalid: every cell
    /// stays covered exactly once, and every live cage still obeys the
    /// ruleset's size/target constraints.
    #[test]
    fn random_mutation_walk_preserves_validity(
        seed in any::<u64>(),
        n in 2u8..=8,
        steps in 0usize..30,
    ) {
        let mut rng = rng_from_u64(seed);
        let solution = generate_grid(n, &mut rng);
        let mut ws = Workspace::new(solution, n).unwrap();
        let rules = Ruleset::keen_baseline();

        for _ in 0..steps {
            let x = rng.random_range(0..n);
            let y = rng.random_range(0..n);
            let c = CellPos::new(x, y);
            if rng.random_bool(0.5) {
                ws.remove_cell(c, rules, &mut rng);
            } else {
                let nx = (x + 1) % n;
                let neighbor = CellPos::new(nx, y);
                ws.join_cells(c, neighbor, rules, &mut rng);
            }
        }

        prop_assert!(ws.puzzle.validate(rules).is_ok());
    }
}
