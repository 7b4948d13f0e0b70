//! Bounded random-mutation climb on difficulty score.

use kenken_core::puzzle::GRID_CELLS;
use kenken_core::{CellPos, Ruleset};
use kenken_solver::SolveOutcome;
use rand::Rng;

use crate::GenError;
use crate::cages::Workspace;

#[cfg(feature = "tracing")]
use tracing::trace;

/// Ten random join-cell probes against a working copy of `ws`; any probe
/// that stays uniquely solvable, raises the difficulty score, and respects
/// `limit` (0 = uncapped) is committed back into `ws`.
///
/// Returns the (possibly unchanged) best score seen.
pub fn harden_pass<R: Rng + ?Sized>(
    ws: &mut Workspace,
    rules: Ruleset,
    best_score: u64,
    limit: u64,
    rng: &mut R,
) -> Result<u64, GenError> {
    let mut best = best_score;
    for _ in 0..10 {
        let mut trial = ws.clone();
        let c = random_cell(trial.puzzle.n, rng);
        let Some(neighbor) = random_neighbor(c, trial.puzzle.n, rng) else {
            continue;
        };
        trial.join_cells(c, neighbor, rules, rng);

        match kenken_solver::solve(&trial.puzzle, rules)? {
            SolveOutcome::Unique { difficulty, .. } => {
                if difficulty > best && (limit == 0 || difficulty <= limit) {
                    #[cfg(feature = "tracing")]
                    trace!(difficulty, "hardening accepted");
                    *ws = trial;
                    best = difficulty;
                }
            }
            SolveOutcome::Unsolvable | SolveOutcome::NotUnique => {}
        }
    }
    Ok(best)
}

/// Bound the hardening loop to `max_iterations` passes, stopping early once
/// `diff_target` (0 = no target) is reached. Finishes by normalizing cage
/// labels.
pub fn generate<R: Rng + ?Sized>(
    solution: [u8; GRID_CELLS],
    n: u8,
    rules: Ruleset,
    max_iterations: u32,
    diff_cap: u64,
    diff_target: u64,
    rng: &mut R,
) -> Result<(kenken_core::Puzzle, u64), GenError> {
    let mut ws = Workspace::new(solution, n)?;
    let mut best_score = 0u64;

    for _ in 0..max_iterations {
        if diff_target > 0 && best_score >= diff_target {
            break;
        }
        best_score = harden_pass(&mut ws, rules, best_score, diff_cap, rng)?;
    }

    ws.normalize_labels();
    Ok((ws.puzzle, best_score))
}

fn random_cell<R: Rng + ?Sized>(n: u8, rng: &mut R) -> CellPos {
    let x = rng.random_range(0..n);
    let y = rng.random_range(0..n);
    CellPos::new(x, y)
}

/// Pick a neighbor of `c`, biased away from out-of-bounds directions: try
/// `(x+1, y+1)` first on each axis, falling back to `-1` when `+1` is out
/// of range or (when both are in range) a coin flip says so; then choose
/// between the resulting row- and column-neighbor with another coin flip.
fn random_neighbor<R: Rng + ?Sized>(c: CellPos, n: u8, rng: &mut R) -> Option<CellPos> {
    let cand_x = pick_axis(c.x(), n, rng);
    let cand_y = pick_axis(c.y(), n, rng);
    match (cand_x, cand_y) {
        (Some(cx), Some(cy)) => {
            if rng.random_bool(0.5) {
                Some(CellPos::new(cx, c.y()))
            } else {
                Some(CellPos::new(c.x(), cy))
            }
        }
        (Some(cx), None) => Some(CellPos::new(cx, c.y())),
        (None, Some(cy)) => Some(CellPos::new(c.x(), cy)),
        (None, None) => None,
    }
}

fn pick_axis<R: Rng + ?Sized>(v: u8, n: u8, rng: &mut R) -> Option<u8> {
    let plus_ok = v + 1 < n;
    let minus_ok = v >= 1;
    if !plus_ok {
        return minus_ok.then_some(v - 1);
    }
    if minus_ok && rng.random_bool(0.5) {
        Some(v - 1)
    } else {
        Some(v + 1)
    }
}
