//! Cage primitives (allocate, destroy, add/remove a cell) and the
//! invariant-preserving mutators built on top of them.
//!
//! Every mutator here operates on a [`Workspace`]: a puzzle paired with the
//! reference solution grid it was seeded from, since `destroy`/`remove`
//! restore a cell's given value from that solution, and `update_target`
//! recomputes a cage's target from it.

use kenken_core::puzzle::GRID_CELLS;
use kenken_core::{Cage, CageOp, CellPos, CoreError, Puzzle, Ruleset};
use rand::Rng;
use rand::seq::SliceRandom;
use smallvec::SmallVec;

#[derive(Debug, Clone)]
pub struct Workspace {
    pub puzzle: Puzzle,
    pub solution: [u8; GRID_CELLS],
}

impl Workspace {
    /// A puzzle with no cages at all: every in-bounds cell is a given,
    /// copied from `solution`.
    pub fn new(solution: [u8; GRID_CELLS], n: u8) -> Result<Self, CoreError> {
        let mut puzzle = Puzzle::new(n)?;
        puzzle.givens = solution;
        Ok(Self { puzzle, solution })
    }

    // ---- cage primitives ----------------------------------------------

    /// The first unused cage-table slot, or `None` if the table is full.
    fn allocate_cage(&self) -> Option<u8> {
        self.puzzle
            .cages
            .iter()
            .position(|c| c.is_unused())
            .map(|i| i as u8)
    }

    /// Dissolve a cage entirely: every member reverts to a plain given.
    fn destroy_cage(&mut self, g: u8) {
        let cells: SmallVec<[CellPos; 8]> = self.puzzle.cages[g as usize].cells.clone();
        for c in cells {
            self.puzzle.givens[c.index()] = self.solution[c.index()];
            self.puzzle.cell_cage[c.index()] = None;
        }
        self.puzzle.cages[g as usize] = Cage::empty();
    }

    /// Detach `c` from cage `g`; a no-op if `c` isn't actually a member.
    fn remove_cell_from_cage(&mut self, g: u8, c: CellPos) {
        let cage = &mut self.puzzle.cages[g as usize];
        let Some(idx) = cage.cells.iter().position(|&x| x == c) else {
            return;
        };
        cage.cells.swap_remove(idx);
        self.puzzle.givens[c.index()] = self.solution[c.index()];
        self.puzzle.cell_cage[c.index()] = None;
    }

    /// Add `c` to cage `g`; a no-op if `c` already belongs to a cage or `g`
    /// is already at capacity.
    fn add_cell_to_cage(&mut self, g: u8, c: CellPos) {
        if self.puzzle.cell_cage[c.index()].is_some() {
            return;
        }
        let cage = &mut self.puzzle.cages[g as usize];
        if cage.cells.len() >= kenken_core::MAX_CAGE_CELLS {
            return;
        }
        cage.cells.push(c);
        self.puzzle.givens[c.index()] = 0;
        self.puzzle.cell_cage[c.index()] = Some(g);
    }

    // ---- invariant-preserving mutators ---------------------------------

    /// Flood-fill cage `g` from its first member; any member unreachable
    /// from the anchor is cut loose and restored to a given. Destroys the
    /// cage outright if fewer than 2 members remain connected.
    fn cut_islands(&mut self, g: u8) {
        let n = self.puzzle.n;
        let members: SmallVec<[CellPos; 8]> = self.puzzle.cages[g as usize].cells.clone();
        if members.len() <= 1 {
            return;
        }

        let mut visited = [false; GRID_CELLS];
        let anchor = members[0];
        let mut stack = vec![anchor];
        visited[anchor.index()] = true;
        while let Some(cur) = stack.pop() {
            for neighbor in cur.neighbors(n).into_iter().flatten() {
                if self.puzzle.cell_cage[neighbor.index()] == Some(g) && !visited[neighbor.index()]
                {
                    visited[neighbor.index()] = true;
                    stack.push(neighbor);
                }
            }
        }

        let islands: SmallVec<[CellPos; 8]> = members
            .into_iter()
            .filter(|&c| !visited[c.index()])
            .collect();
        for c in islands {
            self.remove_cell_from_cage(g, c);
        }
        if self.puzzle.cages[g as usize].len() < 2 {
            self.destroy_cage(g);
        }
    }

    /// Recompute `g`'s target from its members' solution values under its
    /// current operator. Fails (leaving the cage unchanged) if the
    /// two-cell-only ruleset is violated, or the derived target would be
    /// non-integer or non-positive where the operator requires otherwise.
    fn update_target(&mut self, g: u8, rules: Ruleset) -> bool {
        let cage = &self.puzzle.cages[g as usize];
        if cage.cells.is_empty() {
            return false;
        }
        if rules.two_cell_only && cage.op.is_two_cell_only() && cage.cells.len() != 2 {
            return false;
        }

        let values: SmallVec<[u8; 8]> = cage
            .cells
            .iter()
            .map(|&c| self.solution[c.index()])
            .collect();
        let target = match cage.op {
            CageOp::Sum => values.iter().map(|&v| v as i64).sum(),
            CageOp::Product => values.iter().map(|&v| v as i64).product(),
            CageOp::Difference => {
                let m = *values.iter().max().expect("non-empty") as i64;
                let s: i64 = values.iter().map(|&v| v as i64).sum();
                2 * m - s
            }
            CageOp::Ratio => {
                let m = *values.iter().max().expect("non-empty") as i64;
                let p: i64 = values.iter().map(|&v| v as i64).product();
                if p == 0 || (m * m) % p != 0 {
                    return false;
                }
                (m * m) / p
            }
        };

        match cage.op {
            CageOp::Sum | CageOp::Difference if target < 0 => return false,
            CageOp::Product | CageOp::Ratio if target <= 0 => return false,
            _ => {}
        }

        self.puzzle.cages[g as usize].target = target;
        true
    }

    /// Try each operator in random order, keeping the first whose target
    /// recomputes successfully. `Sum` always succeeds, so this always
    /// terminates with a change applied.
    fn alter_type<R: Rng + ?Sized>(&mut self, g: u8, rules: Ruleset, rng: &mut R) -> bool {
        let mut ops = [CageOp::Sum, CageOp::Difference, CageOp::Product, CageOp::Ratio];
        ops.shuffle(rng);
        for op in ops {
            self.puzzle.cages[g as usize].op = op;
            if self.update_target(g, rules) {
                return true;
            }
        }
        false
    }

    /// Detach `c` from whatever cage it's in. A 2-cell cage is destroyed
    /// outright; a larger cage loses just `c`, then re-derives its target
    /// (falling back to `alter_type` if that fails).
    pub fn remove_cell<R: Rng + ?Sized>(&mut self, c: CellPos, rules: Ruleset, rng: &mut R) {
        let Some(g) = self.puzzle.cell_cage[c.index()] else {
            return;
        };
        if self.puzzle.cages[g as usize].len() <= 2 {
            self.destroy_cage(g);
            return;
        }
        self.remove_cell_from_cage(g, c);
        self.cut_islands(g);
        if !self.puzzle.cages[g as usize].is_unused() && !self.update_target(g, rules) {
            self.alter_type(g, rules, rng);
        }
    }

    /// Merge `c` into the cage containing `neighbor` (allocating a fresh
    /// cage if `neighbor` has none), detaching `c` from its current cage
    /// first if it has one. A no-op if `c` and `neighbor` already share a
    /// cage, or if the cage table is full and `neighbor` is cageless.
    pub fn join_cells<R: Rng + ?Sized>(
        &mut self,
        c: CellPos,
        neighbor: CellPos,
        rules: Ruleset,
        rng: &mut R,
    ) {
        let c_cage = self.puzzle.cell_cage[c.index()];
        if c_cage.is_some() && c_cage == self.puzzle.cell_cage[neighbor.index()] {
            return;
        }
        if c_cage.is_some() {
            self.remove_cell(c, rules, rng);
        }

        match self.puzzle.cell_cage[neighbor.index()] {
            Some(g) => {
                self.add_cell_to_cage(g, c);
                if !self.update_target(g, rules) {
                    self.alter_type(g, rules, rng);
                }
            }
            None => {
                let Some(g) = self.allocate_cage() else {
                    return;
                };
                self.add_cell_to_cage(g, neighbor);
                self.add_cell_to_cage(g, c);
                self.alter_type(g, rules, rng);
            }
        }
    }

    /// Rotate each cage's member list so its lowest cell position is
    /// listed first, so label assignment is a pure function of the final
    /// geometry.
    pub fn normalize_labels(&mut self) {
        for cage in self.puzzle.cages.iter_mut().filter(|c| !c.is_unused()) {
            if let Some((idx, _)) = cage.cells.iter().enumerate().min_by_key(|&(_, &c)| c) {
                cage.cells.rotate_left(idx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fill::generate_grid;
    use crate::seed::rng_from_u64;

    #[test]
    fn join_then_cells_share_a_cage() {
        let mut rng = rng_from_u64(7);
        let solution = generate_grid(4, &mut rng);
        let mut ws = Workspace::new(solution, 4).unwrap();
        let rules = Ruleset::keen_baseline();
        let a = CellPos::new(0, 0);
        let b = CellPos::new(1, 0);
        ws.join_cells(a, b, rules, &mut rng);
        assert!(ws.puzzle.cell_cage[a.index()].is_some());
        assert_eq!(ws.puzzle.cell_cage[a.index()], ws.puzzle.cell_cage[b.index()]);
        assert!(ws.puzzle.given(a).is_none());
        assert!(ws.puzzle.given(b).is_none());
        assert!(ws.puzzle.validate(rules).is_ok());
    }

    #[test]
    fn remove_cell_restores_given() {
        let mut rng = rng_from_u64(11);
        let solution = generate_grid(4, &mut rng);
        let mut ws = Workspace::new(solution, 4).unwrap();
        let rules = Ruleset::keen_baseline();
        let a = CellPos::new(0, 0);
        let b = CellPos::new(1, 0);
        ws.join_cells(a, b, rules, &mut rng);
        ws.remove_cell(a, rules, &mut rng);
        assert!(ws.puzzle.cell_cage[a.index()].is_none());
        assert_eq!(ws.puzzle.given(a), Some(solution[a.index()]));
        assert!(ws.puzzle.validate(rules).is_ok());
    }

    #[test]
    fn cut_islands_destroys_cage_left_too_small() {
        let mut rng = rng_from_u64(13);
        let solution = generate_grid(4, &mut rng);
        let mut ws = Workspace::new(solution, 4).unwrap();
        let rules = Ruleset::keen_baseline();
        let a = CellPos::new(0, 0);
        let b = CellPos::new(1, 0);
        ws.join_cells(a, b, rules, &mut rng);
        let g = ws.puzzle.cell_cage[a.index()].unwrap();
        ws.cut_islands(g);
        // Still connected (a,b are orthogonal neighbors): nothing changes.
        assert_eq!(ws.puzzle.cages[g as usize].len(), 2);
    }

    #[test]
    fn normalize_labels_puts_lowest_position_first() {
        let mut rng = rng_from_u64(17);
        let solution = generate_grid(4, &mut rng);
        let mut ws = Workspace::new(solution, 4).unwrap();
        let rules = Ruleset::keen_baseline();
        let a = CellPos::new(1, 0);
        let b = CellPos::new(0, 0);
        ws.join_cells(a, b, rules, &mut rng);
        ws.normalize_labels();
        let g = ws.puzzle.cell_cage[a.index()].unwrap();
        assert_eq!(ws.puzzle.cages[g as usize].cells[0], CellPos::new(0, 0));
    }
}
