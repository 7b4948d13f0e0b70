//! Row/column pruning and the uniqueness-classifying MRV backtracking
//! search, plus the branch-difficulty metric derived from it.

use kenken_core::puzzle::GRID_CELLS;
use kenken_core::{CellPos, Puzzle, Ruleset, ValueSet};
use smallvec::SmallVec;

use crate::candidates::cage_candidates;
use crate::error::SolveError;

#[cfg(feature = "tracing")]
use tracing::trace;

/// A filled grid, valid only for the `0..n x 0..n` region of a puzzle with
/// matching `n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub grid: [u8; GRID_CELLS],
}

impl Solution {
    pub fn get(&self, pos: CellPos) -> u8 {
        self.grid[pos.index()]
    }
}

/// The outcome of a solve: how many solutions exist, and (when exactly one
/// does) the solution itself and its branch-difficulty score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Unsolvable,
    Unique { solution: Solution, difficulty: u64 },
    NotUnique,
}

/// Decide uniqueness (aborting as soon as a second solution is found) and,
/// for a uniquely solvable puzzle, its difficulty score.
pub fn solve(puzzle: &Puzzle, rules: Ruleset) -> Result<SolveOutcome, SolveError> {
    puzzle.validate(rules)?;
    let n = puzzle.n;
    let empty_count = count_empty(puzzle);

    #[cfg(feature = "tracing")]
    trace!(n, empty_count, "starting solve");

    let mut state = Search {
        puzzle,
        n,
        grid: puzzle.givens,
        solutions_found: 0,
        first_solution: None,
        first_difficulty: 0,
    };
    state.step(0);

    Ok(match state.solutions_found {
        0 => SolveOutcome::Unsolvable,
        1 => {
            let m = smallest_pow10_at_least((n as u64) * (n as u64));
            let difficulty = state.first_difficulty * m + empty_count as u64;
            SolveOutcome::Unique {
                solution: Solution {
                    grid: state.first_solution.expect("recorded on first solution"),
                },
                difficulty,
            }
        }
        _ => SolveOutcome::NotUnique,
    })
}

struct Search<'a> {
    puzzle: &'a Puzzle,
    n: u8,
    grid: [u8; GRID_CELLS],
    solutions_found: u32,
    first_solution: Option<[u8; GRID_CELLS]>,
    first_difficulty: u64,
}

impl Search<'_> {
    /// One level of the backtracking search. `running` is the
    /// branch-difficulty accumulated along the path taken to reach this
    /// call.
    fn step(&mut self, running: u64) {
        if self.solutions_found >= 2 {
            return;
        }

        let mut best: Option<(CellPos, ValueSet)> = None;
        for y in 0..self.n {
            for x in 0..self.n {
                let pos = CellPos::new(x, y);
                if self.grid[pos.index()] != 0 {
                    continue;
                }
                let cands = self.candidates_for(pos);
                match &best {
                    Some((_, best_cands)) if best_cands.count() <= cands.count() => {}
                    _ => best = Some((pos, cands)),
                }
            }
        }

        let Some((pos, cands)) = best else {
            // No empty cells left: a complete, Latin-square-and-cage-valid
            // assignment.
            self.solutions_found += 1;
            if self.solutions_found == 1 {
                self.first_solution = Some(self.grid);
                self.first_difficulty = running;
            }
            return;
        };

        if cands.is_empty() {
            return;
        }

        let b = cands.count() as u64;
        let step_cost = (b - 1) * (b - 1);
        for v in cands.iter() {
            self.grid[pos.index()] = v;
            self.step(running + step_cost);
            self.grid[pos.index()] = 0;
            if self.solutions_found >= 2 {
                return;
            }
        }
    }

    fn candidates_for(&self, pos: CellPos) -> ValueSet {
        let rc = row_col_candidates(&self.grid, self.n, pos);
        match self.puzzle.cage_slot_at(pos) {
            None => rc,
            Some(slot) => {
                let cage = &self.puzzle.cages[slot as usize];
                let known: SmallVec<[u8; 8]> = cage
                    .cells
                    .iter()
                    .filter_map(|&c| {
                        let v = self.grid[c.index()];
                        (v != 0).then_some(v)
                    })
                    .collect();
                rc.intersect(cage_candidates(cage, self.n, &known))
            }
        }
    }
}

/// Latin-square elimination: values already present in `pos`'s row or
/// column are never legal for `pos`.
fn row_col_candidates(grid: &[u8; GRID_CELLS], n: u8, pos: CellPos) -> ValueSet {
    let mut used = ValueSet::EMPTY;
    let (x, y) = (pos.x(), pos.y());
    for xi in 0..n {
        let v = grid[CellPos::new(xi, y).index()];
        if v != 0 {
            used.insert(v);
        }
    }
    for yi in 0..n {
        let v = grid[CellPos::new(x, yi).index()];
        if v != 0 {
            used.insert(v);
        }
    }
    ValueSet::all(n).intersect(used.complement(n))
}

fn count_empty(puzzle: &Puzzle) -> usize {
    let mut count = 0;
    for y in 0..puzzle.n {
        for x in 0..puzzle.n {
            if puzzle.given(CellPos::new(x, y)).is_none() {
                count += 1;
            }
        }
    }
    count
}

/// The smallest power of 10 that is `>= x`.
fn smallest_pow10_at_least(x: u64) -> u64 {
    let mut m = 1;
    while m < x {
        m *= 10;
    }
    m
}
