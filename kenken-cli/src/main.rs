use kenken_core::{Puzzle, Ruleset};
use kenken_gen::{generate, generate_grid, rng_from_u64};
use kenken_io::{parse, print as print_puzzle, render_unicode};
use kenken_solver::{SolveOutcome, solve};
use std::io::Read;

#[cfg(feature = "telemetry-subscriber")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("kenken_solver=trace,kenken_gen=trace,kenken_io=info,kenken_cli=info")
    });

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(not(feature = "telemetry-subscriber"))]
fn init_tracing() {}

fn usage() -> &'static str {
    "kenken-cli\n\
\n\
USAGE:\n\
  kenken-cli print    -i FILE [-o FILE] [-u]\n\
  kenken-cli solve    -i FILE [-o FILE] [-T]\n\
  kenken-cli examine  -i FILE [-o FILE]\n\
  kenken-cli gen-grid N -s SEED [-o FILE] [-u]\n\
  kenken-cli harden   -i FILE -s SEED [-w ITER] [-m DIFF_CAP] [-t DIFF_TARGET] [-T] [-o FILE] [-u]\n\
  kenken-cli generate N -s SEED [-w ITER] [-m DIFF_CAP] [-t DIFF_TARGET] [-T] [-o FILE] [-u]\n\
\n\
FLAGS:\n\
  -i FILE   read the puzzle/grid text from FILE instead of stdin\n\
  -o FILE   write output to FILE instead of stdout\n\
  -u        render output with Unicode box-drawing instead of the plain text format\n\
  -T        restrict Difference/Ratio cages to exactly two cells\n\
  -s SEED   PRNG seed (required by gen-grid, harden, generate)\n\
  -w ITER   hardening iteration cap (default 20)\n\
  -m DIFF   difficulty cap for an accepted hardening move (default 0 = uncapped)\n\
  -t DIFF   stop hardening once this difficulty is reached (default 0 = run the full iteration cap)\n"
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err}\n\n{}", usage());
        std::process::exit(2);
    }
}

struct Flags {
    input: Option<String>,
    output: Option<String>,
    unicode: bool,
    two_cell_only: bool,
    seed: Option<u64>,
    max_iterations: u32,
    diff_cap: u64,
    diff_target: u64,
}

impl Default for Flags {
    fn default() -> Self {
        Flags {
            input: None,
            output: None,
            unicode: false,
            two_cell_only: false,
            seed: None,
            max_iterations: 20,
            diff_cap: 0,
            diff_target: 0,
        }
    }
}

fn parse_arg_value(args: &[String], i: &mut usize) -> Result<String, String> {
    *i += 1;
    args.get(*i).cloned().ok_or_else(|| "missing value".to_string())
}

fn parse_flags(args: &[String], mut i: usize) -> Result<(Flags, Vec<String>), String> {
    let mut flags = Flags::default();
    let mut positional = Vec::new();
    while i < args.len() {
        match args[i].as_str() {
            "-i" => flags.input = Some(parse_arg_value(args, &mut i)?),
            "-o" => flags.output = Some(parse_arg_value(args, &mut i)?),
            "-u" => flags.unicode = true,
            "-T" => flags.two_cell_only = true,
            "-s" => {
                let v = parse_arg_value(args, &mut i)?;
                flags.seed = Some(v.parse::<u64>().map_err(|_| "invalid -s".to_string())?);
            }
            "-w" => {
                let v = parse_arg_value(args, &mut i)?;
                flags.max_iterations = v.parse::<u32>().map_err(|_| "invalid -w".to_string())?;
            }
            "-m" => {
                let v = parse_arg_value(args, &mut i)?;
                flags.diff_cap = v.parse::<u64>().map_err(|_| "invalid -m".to_string())?;
            }
            "-t" => {
                let v = parse_arg_value(args, &mut i)?;
                flags.diff_target = v.parse::<u64>().map_err(|_| "invalid -t".to_string())?;
            }
            "--help" | "-h" => return Err(String::new()),
            other => positional.push(other.to_string()),
        }
        i += 1;
    }
    Ok((flags, positional))
}

fn read_input(flags: &Flags) -> Result<String, String> {
    match &flags.input {
        Some(path) => std::fs::read_to_string(path).map_err(|e| format!("reading {path}: {e}")),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("reading stdin: {e}"))?;
            Ok(buf)
        }
    }
}

fn write_output(flags: &Flags, content: &str) -> Result<(), String> {
    match &flags.output {
        Some(path) => std::fs::write(path, content).map_err(|e| format!("writing {path}: {e}")),
        None => {
            print!("{content}");
            Ok(())
        }
    }
}

fn rules_from_flags(flags: &Flags) -> Ruleset {
    Ruleset {
        two_cell_only: flags.two_cell_only,
        max_cage_size: Ruleset::keen_baseline().max_cage_size,
    }
}

fn require_seed(flags: &Flags) -> Result<u64, String> {
    flags.seed.ok_or_else(|| "this command requires -s SEED".to_string())
}

fn require_n(positional: &[String]) -> Result<u8, String> {
    let n = positional
        .first()
        .ok_or_else(|| "this command requires a grid-size argument".to_string())?;
    n.parse::<u8>().map_err(|_| format!("invalid grid size {n:?}"))
}

/// A bare all-givens puzzle over `grid`, with no cages - the representation
/// `gen-grid` prints and `harden` reads back in.
fn grid_only_puzzle(grid: [u8; kenken_core::GRID_CELLS], n: u8) -> Result<Puzzle, String> {
    let mut puzzle = Puzzle::new(n).map_err(|e| e.to_string())?;
    puzzle.givens = grid;
    Ok(puzzle)
}

fn run() -> Result<(), String> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        return Err("missing command".to_string());
    }
    let cmd = args[1].clone();
    let (flags, positional) = parse_flags(&args, 2)?;
    let rules = rules_from_flags(&flags);

    match cmd.as_str() {
        "print" => {
            let text = read_input(&flags)?;
            let puzzle = parse(&text, rules).map_err(|e| e.to_string())?;
            let out = if flags.unicode {
                render_unicode(&puzzle, None)
            } else {
                print_puzzle(&puzzle)
            };
            write_output(&flags, &out)
        }
        "solve" => {
            let text = read_input(&flags)?;
            let puzzle = parse(&text, rules).map_err(|e| e.to_string())?;
            let outcome = solve(&puzzle, rules).map_err(|e| e.to_string())?;
            let out = match outcome {
                SolveOutcome::Unsolvable => "unsolvable\n".to_string(),
                SolveOutcome::NotUnique => "not-unique\n".to_string(),
                SolveOutcome::Unique { solution, difficulty } => {
                    let grid = solution.grid;
                    let solved = grid_only_puzzle(grid, puzzle.n)?;
                    let mut out = if flags.unicode {
                        render_unicode(&solved, None)
                    } else {
                        print_puzzle(&solved)
                    };
                    out.push_str(&format!("difficulty={difficulty}\n"));
                    out
                }
            };
            write_output(&flags, &out)
        }
        "examine" => {
            let text = read_input(&flags)?;
            let puzzle = parse(&text, rules).map_err(|e| e.to_string())?;
            let cages: Vec<_> = puzzle.cages.iter().filter(|c| !c.is_unused()).collect();
            let mut out = format!("n={}\ncages={}\n", puzzle.n, cages.len());
            for cage in cages {
                out.push_str(&format!("{:?} target={} size={}\n", cage.op, cage.target, cage.len()));
            }
            write_output(&flags, &out)
        }
        "gen-grid" => {
            let n = require_n(&positional)?;
            let seed = require_seed(&flags)?;
            let mut rng = rng_from_u64(seed);
            let grid = generate_grid(n, &mut rng);
            let puzzle = grid_only_puzzle(grid, n)?;
            let out = if flags.unicode {
                render_unicode(&puzzle, Some(&grid))
            } else {
                print_puzzle(&puzzle)
            };
            write_output(&flags, &out)
        }
        "harden" => {
            let text = read_input(&flags)?;
            let puzzle = parse(&text, rules).map_err(|e| e.to_string())?;
            let seed = require_seed(&flags)?;
            let mut rng = rng_from_u64(seed);
            let solution = puzzle.givens;
            let (hardened, difficulty) = generate(
                solution,
                puzzle.n,
                rules,
                flags.max_iterations,
                flags.diff_cap,
                flags.diff_target,
                &mut rng,
            )
            .map_err(|e| e.to_string())?;
            let mut out = if flags.unicode {
                render_unicode(&hardened, None)
            } else {
                print_puzzle(&hardened)
            };
            out.push_str(&format!("difficulty={difficulty}\n"));
            write_output(&flags, &out)
        }
        "generate" => {
            let n = require_n(&positional)?;
            let seed = require_seed(&flags)?;
            let mut rng = rng_from_u64(seed);
            let grid = generate_grid(n, &mut rng);
            let (puzzle, difficulty) = generate(
                grid,
                n,
                rules,
                flags.max_iterations,
                flags.diff_cap,
                flags.diff_target,
                &mut rng,
            )
            .map_err(|e| e.to_string())?;
            let mut out = if flags.unicode {
                render_unicode(&puzzle, Some(&grid))
            } else {
                print_puzzle(&puzzle)
            };
            out.push_str(&format!("difficulty={difficulty}\n"));
            write_output(&flags, &out)
        }
        "--help" | "-h" => {
            println!("{}", usage());
            Ok(())
        }
        other => Err(format!("unknown command: {other}")),
    }
}
