//! Camp Cleanup

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::ops::RangeInclusive;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 4, tags = ["intervals"])]
pub struct Solver;

type Pair = (RangeInclusive<u32>, RangeInclusive<u32>);

fn parse_range(s: &str) -> Option<RangeInclusive<u32>> {
    let (lo, hi) = s.split_once('-')?;
    let (lo, hi) = (lo.trim().parse().ok()?, hi.trim().parse().ok()?);
    (lo <= hi).then_some(lo..=hi)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Pair>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .lines()
            .enumerate()
            .map(|(line_idx, line)| {
                line.split_once(',')
                    .and_then(|(a, b)| Some((parse_range(a)?, parse_range(b)?)))
                    .ok_or_else(|| ParseError::at_line(line_idx, format!("expected `a-b,c-d`, got {line:?}")))
            })
            .collect()
    }
}

fn contains(outer: &RangeInclusive<u32>, inner: &RangeInclusive<u32>) -> bool {
    outer.start() <= inner.start() && inner.end() <= outer.end()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared
            .iter()
            .filter(|(a, b)| contains(a, b) || contains(b, a))
            .count();
        Ok(count.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared
            .iter()
            .filter(|(a, b)| a.start() <= b.end() && b.start() <= a.end())
            .count();
        Ok(count.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const EXAMPLE: &str = "2-4,6-8\n2-3,4-5\n5-7,7-9\n2-8,3-7\n6-6,4-6\n2-6,4-8\n";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "2");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "4");
    }

    #[test]
    fn test_reversed_range_rejected() {
        assert!(Solver::parse("4-2,1-1").is_err());
    }
}
