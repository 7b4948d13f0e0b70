use kenken_core::{Cage, CageOp, CellPos, Puzzle, Ruleset};

use crate::error::IoError;

enum Token {
    Given(u8),
    Cage { label: char, clue: Option<(char, CageOp, i64)> },
}

fn label_index(c: char) -> Option<u8> {
    if c.is_ascii_uppercase() {
        Some(c as u8 - b'A')
    } else if c.is_ascii_lowercase() {
        Some(26 + (c as u8 - b'a'))
    } else {
        None
    }
}

fn label_char(idx: u8) -> char {
    if idx < 26 {
        (b'A' + idx) as char
    } else {
        (b'a' + (idx - 26)) as char
    }
}

fn parse_token(tok: &str) -> Result<Token, IoError> {
    let first = tok
        .chars()
        .next()
        .ok_or_else(|| IoError::InvalidToken(tok.to_string()))?;

    if first.is_ascii_digit() {
        let v: u8 = tok
            .parse()
            .map_err(|_| IoError::InvalidToken(tok.to_string()))?;
        return Ok(Token::Given(v));
    }

    if label_index(first).is_some() {
        let rest = &tok[first.len_utf8()..];
        if rest.is_empty() {
            return Ok(Token::Cage { label: first, clue: None });
        }
        let mut chars = rest.chars();
        let opch = chars.next().expect("rest is non-empty");
        let op = match opch {
            '+' => CageOp::Sum,
            '-' => CageOp::Difference,
            '*' => CageOp::Product,
            '/' => CageOp::Ratio,
            other => return Err(IoError::UnknownOperator(other)),
        };
        let digits = chars.as_str();
        let target: i64 = digits
            .parse()
            .map_err(|_| IoError::InvalidTarget { label: first })?;
        return Ok(Token::Cage {
            label: first,
            clue: Some((opch, op, target)),
        });
    }

    Err(IoError::InvalidToken(tok.to_string()))
}

/// Parse the whitespace-grid puzzle text format: each cell is either a
/// decimal given value or an alphabetic cage label (`A`-`Z` = cages 0..25,
/// `a`-`z` = cages 26..51), optionally followed by one of `+ - * /` and a
/// decimal target. Rows are newline-delimited, columns whitespace-delimited;
/// a blank line (or end of input) terminates the grid.
pub fn parse(text: &str, rules: Ruleset) -> Result<Puzzle, IoError> {
    let mut rows: Vec<Vec<&str>> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            break;
        }
        rows.push(line.split_whitespace().collect());
    }
    if rows.is_empty() {
        return Err(IoError::EmptyInput);
    }

    let want = rows[0].len();
    for (i, row) in rows.iter().enumerate() {
        if row.len() != want {
            return Err(IoError::NonRectangular {
                row: i,
                got: row.len(),
                want,
            });
        }
    }
    if rows.len() != want {
        return Err(IoError::NotSquare {
            rows: rows.len(),
            cols: want,
        });
    }

    let n = rows.len() as u8;
    let mut puzzle = Puzzle::new(n)?;
    let mut clues: [Option<(char, char, i64)>; 52] = [None; 52];
    let mut members: [Vec<CellPos>; 52] = core::array::from_fn(|_| Vec::new());

    for (y, row) in rows.iter().enumerate() {
        for (x, &tok) in row.iter().enumerate() {
            let pos = CellPos::new(x as u8, y as u8);
            match parse_token(tok)? {
                Token::Given(v) => puzzle.set_given(pos, Some(v)),
                Token::Cage { label, clue } => {
                    let idx = label_index(label).expect("parse_token only yields alphabetic labels") as usize;
                    members[idx].push(pos);
                    if let Some((opch, op, target)) = clue {
                        match clues[idx] {
                            None => clues[idx] = Some((opch, op, target)),
                            Some((first_ch, first_op, first_target)) => {
                                if first_op != op || first_target != target {
                                    return Err(IoError::cage_conflict(
                                        label,
                                        (first_ch, first_target),
                                        (opch, target),
                                    ));
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    for (idx, cells) in members.into_iter().enumerate() {
        if cells.is_empty() {
            continue;
        }
        let label = label_char(idx as u8);
        let Some((_, op, target)) = clues[idx] else {
            return Err(IoError::CageMissingClue(label));
        };
        puzzle.cages[idx] = Cage {
            op,
            target,
            cells: cells.into_iter().collect(),
        };
    }

    puzzle.rebuild_cell_cage();
    puzzle.validate(rules)?;
    Ok(puzzle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_two_by_two() {
        let text = "A+3 A\nA B\n";
        let err = parse(text, Ruleset::keen_baseline());
        // Row 1 ("A B") leaves B with only one member and no clue.
        assert!(matches!(err, Err(IoError::CageMissingClue('B'))));
    }

    #[test]
    fn parses_and_validates_a_full_grid() {
        let text = "A+6 A A\n1 2 3\n2 3 1\n";
        let p = parse(text, Ruleset::keen_baseline()).unwrap();
        assert_eq!(p.n, 3);
        assert_eq!(p.given(CellPos::new(0, 1)), Some(1));
        let cage = p.cage_at(CellPos::new(0, 0)).unwrap();
        assert_eq!(cage.len(), 3);
        assert_eq!(cage.target, 6);
    }

    #[test]
    fn rejects_non_rectangular_input() {
        let text = "1 2 3\n1 2\n";
        assert!(matches!(
            parse(text, Ruleset::keen_baseline()),
            Err(IoError::NonRectangular { row: 1, .. })
        ));
    }

    #[test]
    fn rejects_conflicting_clue() {
        // Cell (1,1) joins cage A but restates its clue with a different
        // operator and target than (0,0) already gave it.
        let text = "A+6 A A\n1 A-9 3\n2 3 1\n";
        assert!(matches!(
            parse(text, Ruleset::keen_baseline()),
            Err(IoError::CageClueConflict { .. })
        ));
    }

    #[test]
    fn blank_line_terminates_grid_early() {
        let text = "1\n\ntrailing garbage that must be ignored";
        let p = parse(text, Ruleset::keen_baseline()).unwrap();
        assert_eq!(p.n, 1);
    }
}
