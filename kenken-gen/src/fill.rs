//! Randomized Latin-square fill: row 0 is a random permutation, every
//! subsequent cell tries a random permutation of `{1..N}` in turn,
//! backtracking on failure.

use kenken_core::puzzle::GRID_CELLS;
use kenken_core::{CellPos, ValueSet};
use rand::Rng;
use rand::seq::SliceRandom;

/// A random valid N x N Latin square, returned as a full grid (only the
/// `0..n x 0..n` region is meaningful).
pub fn generate_grid<R: Rng + ?Sized>(n: u8, rng: &mut R) -> [u8; GRID_CELLS] {
    let mut grid = [0u8; GRID_CELLS];
    let mut row_used = vec![ValueSet::EMPTY; n as usize];
    let mut col_used = vec![ValueSet::EMPTY; n as usize];

    let mut row0: Vec<u8> = (1..=n).collect();
    row0.shuffle(rng);
    for (x, &v) in row0.iter().enumerate() {
        grid[CellPos::new(x as u8, 0).index()] = v;
        row_used[0].insert(v);
        col_used[x].insert(v);
    }

    let filled = fill_from(&mut grid, &mut row_used, &mut col_used, n, n as usize, rng);
    debug_assert!(
        filled,
        "Latin-square fill failed at the root; unreachable for a valid first row"
    );
    grid
}

fn fill_from<R: Rng + ?Sized>(
    grid: &mut [u8; GRID_CELLS],
    row_used: &mut [ValueSet],
    col_used: &mut [ValueSet],
    n: u8,
    pos: usize,
    rng: &mut R,
) -> bool {
    let total = n as usize * n as usize;
    if pos == total {
        return true;
    }
    let x = (pos % n as usize) as u8;
    let y = (pos / n as usize) as u8;

    let mut trial: Vec<u8> = (1..=n).collect();
    trial.shuffle(rng);

    for v in trial {
        if row_used[y as usize].contains(v) || col_used[x as usize].contains(v) {
            continue;
        }
        grid[CellPos::new(x, y).index()] = v;
        row_used[y as usize].insert(v);
        col_used[x as usize].insert(v);

        if fill_from(grid, row_used, col_used, n, pos + 1, rng) {
            return true;
        }

        row_used[y as usize].remove(v);
        col_used[x as usize].remove(v);
        grid[CellPos::new(x, y).index()] = 0;
    }

    false
}
