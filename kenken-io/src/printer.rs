use kenken_core::{CageOp, CellPos, GRID_CELLS, Puzzle};

fn label_char(idx: u8) -> char {
    if idx < 26 {
        (b'A' + idx) as char
    } else {
        (b'a' + (idx - 26)) as char
    }
}

fn op_char(op: CageOp) -> char {
    match op {
        CageOp::Sum => '+',
        CageOp::Difference => '-',
        CageOp::Product => '*',
        CageOp::Ratio => '/',
    }
}

/// Print `puzzle` back into the whitespace-grid text format `parse` reads.
/// The cage's first member (by [`kenken_gen`]'s label-normalization
/// convention, or simply the lowest index if the caller never normalized)
/// carries the operator and target; every other member prints its bare
/// label. A trailing blank line terminates the grid.
pub fn print(puzzle: &Puzzle) -> String {
    let n = puzzle.n;
    let mut out = String::new();
    for y in 0..n {
        let mut row_tokens: Vec<String> = Vec::with_capacity(n as usize);
        for x in 0..n {
            let pos = CellPos::new(x, y);
            if let Some(v) = puzzle.given(pos) {
                row_tokens.push(v.to_string());
                continue;
            }
            let slot = puzzle
                .cage_slot_at(pos)
                .expect("a validated puzzle covers every cell by a given or a cage");
            let cage = &puzzle.cages[slot as usize];
            let label = label_char(slot);
            if cage.cells.first() == Some(&pos) {
                row_tokens.push(format!("{label}{}{}", op_char(cage.op), cage.target));
            } else {
                row_tokens.push(label.to_string());
            }
        }
        out.push_str(&row_tokens.join(" "));
        out.push('\n');
    }
    out.push('\n');
    out
}

/// A puzzle cage's slot if `pos` belongs to one, otherwise a value unique to
/// `pos` itself - so every bare given cell draws as its own walled box.
fn wall_group(puzzle: &Puzzle, pos: CellPos) -> u16 {
    match puzzle.cage_slot_at(pos) {
        Some(slot) => slot as u16,
        None => 1000 + pos.index() as u16,
    }
}

/// Render `puzzle` as a Unicode box-drawing grid, showing `solution` values
/// where given (falling back to the puzzle's own givens when `solution` is
/// `None`), with a wall drawn between any two orthogonally adjacent cells
/// that don't share a cage. Corner glyphs are uniformly `┼`/border corners;
/// this doesn't attempt to pick a T-junction glyph for partial walls.
pub fn render_unicode(puzzle: &Puzzle, solution: Option<&[u8; GRID_CELLS]>) -> String {
    let n = puzzle.n;
    let mut out = String::new();

    for y in 0..=n {
        let mut line = String::new();
        for x in 0..n {
            let corner = if y == 0 && x == 0 {
                '┌'
            } else if y == n && x == 0 {
                '└'
            } else {
                '┼'
            };
            let wall = y == 0
                || y == n
                || wall_group(puzzle, CellPos::new(x, y - 1)) != wall_group(puzzle, CellPos::new(x, y));
            line.push(corner);
            line.push_str(if wall { "───" } else { "   " });
        }
        line.push(if y == 0 {
            '┐'
        } else if y == n {
            '┘'
        } else {
            '┼'
        });
        out.push_str(&line);
        out.push('\n');

        if y < n {
            let mut content = String::new();
            for x in 0..n {
                let pos = CellPos::new(x, y);
                let wall = x == 0 || wall_group(puzzle, CellPos::new(x - 1, y)) != wall_group(puzzle, pos);
                content.push(if wall { '│' } else { ' ' });
                let value = solution.map(|s| s[pos.index()]).or_else(|| puzzle.given(pos));
                match value {
                    Some(v) => content.push_str(&format!("{v:>3}")),
                    None => content.push_str("   "),
                }
            }
            content.push('│');
            out.push_str(&content);
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use kenken_core::Ruleset;

    #[test]
    fn print_then_parse_round_trips() {
        let text = "A+6 A A\n1 2 3\n2 3 1\n";
        let p = parse(text, Ruleset::keen_baseline()).unwrap();
        let printed = print(&p);
        let p2 = parse(&printed, Ruleset::keen_baseline()).unwrap();
        assert_eq!(p2.n, p.n);
        assert_eq!(p2.givens, p.givens);
        for (a, b) in p.cages.iter().zip(p2.cages.iter()) {
            assert_eq!(a.is_unused(), b.is_unused());
            if !a.is_unused() {
                assert_eq!(a.op, b.op);
                assert_eq!(a.target, b.target);
                assert_eq!(a.cells.len(), b.cells.len());
            }
        }
    }
}
