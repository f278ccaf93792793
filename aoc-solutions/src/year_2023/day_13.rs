//! Point of Incidence

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Grid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 13, tags = ["grid", "bits"])]
pub struct Solver;

/// A pattern as bitmasks of its rock cells, per row and per column
#[derive(Debug, Clone)]
pub struct Pattern {
    rows: Vec<u64>,
    cols: Vec<u64>,
}

/// Line `k` splits `lines` into `..k` and `k..`; find the one whose
/// reflected lines differ in exactly `smudges` cells
fn reflection(lines: &[u64], smudges: u32) -> Option<usize> {
    (1..lines.len()).find(|&k| {
        let (before, after) = lines.split_at(k);
        before
            .iter()
            .rev()
            .zip(after)
            .map(|(a, b)| (a ^ b).count_ones())
            .sum::<u32>()
            == smudges
    })
}

fn summarize(patterns: &[Pattern], smudges: u32) -> Result<usize, SolveError> {
    patterns
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            reflection(&p.cols, smudges)
                .or_else(|| reflection(&p.rows, smudges).map(|r| 100 * r))
                .ok_or_else(|| SolveError::from(anyhow!("pattern {} has no line of reflection", idx + 1)))
        })
        .sum()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Pattern>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .split("\n\n")
            .filter(|block| !block.trim().is_empty())
            .map(|block| {
                let grid = Grid::parse_with(block, |c| match c {
                    '#' => Ok(true),
                    '.' => Ok(false),
                    _ => Err(format!("unexpected character {c:?}")),
                })?;
                if grid.width() > 64 || grid.height() > 64 {
                    return Err(ParseError::InvalidFormat("patterns are at most 64 cells wide".into()));
                }
                let mask = |cells: &mut dyn Iterator<Item = &bool>| {
                    cells.fold(0u64, |acc, &rock| acc << 1 | u64::from(rock))
                };
                Ok(Pattern {
                    rows: grid.rows().map(|row| mask(&mut row.iter())).collect(),
                    cols: (0..grid.width()).map(|c| mask(&mut grid.column(c))).collect(),
                })
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(summarize(shared, 0)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(summarize(shared, 1)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const EXAMPLE: &str = "\
#.##..##.
..#.##.#.
##......#
##......#
..#.##.#.
..##..##.
#.#.##.#.

#...##..#
#....#..#
..##..###
#####.##.
#####.##.
..##..###
#....#..#
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "405");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "400");
    }

    #[test]
    fn test_reflection_lines() {
        let patterns = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(reflection(&patterns[0].cols, 0), Some(5));
        assert_eq!(reflection(&patterns[1].rows, 0), Some(4));
        assert_eq!(reflection(&patterns[0].rows, 1), Some(3));
    }

    #[test]
    fn test_no_reflection() {
        let mut patterns = Solver::parse("#.\n..\n").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut patterns).is_err());
    }
}
