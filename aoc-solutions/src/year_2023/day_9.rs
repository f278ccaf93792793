//! Mirage Maintenance

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 9, tags = ["sequences"])]
pub struct Solver;

/// Next value of a sequence by repeated differencing.
///
/// The next value is the sum of the last elements of every difference row.
pub fn extrapolate(values: &[i64]) -> i64 {
    let mut row = values.to_vec();
    let mut next = 0;
    while row.iter().any(|&v| v != 0) {
        next += row.last().copied().unwrap_or_default();
        row = row.windows(2).map(|w| w[1] - w[0]).collect();
    }
    next
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<i64>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                line.split_whitespace()
                    .map(str::parse)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| ParseError::at_line(line_idx, e))
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|s| extrapolate(s)).sum::<i64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // Extrapolating backwards is extrapolating the reversed sequence
        let sum: i64 = shared
            .iter()
            .map(|s| {
                let reversed: Vec<_> = s.iter().rev().copied().collect();
                extrapolate(&reversed)
            })
            .sum();
        Ok(sum.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;
    use proptest::prelude::*;

    const EXAMPLE: &str = "\
0 3 6 9 12 15
1 3 6 10 15 21
10 13 16 21 30 45
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "114");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "2");
    }

    proptest! {
        #[test]
        fn prop_quadratic_sequences_extend_exactly(a in -50i64..50, b in -50i64..50, c in -50i64..50, len in 4usize..12) {
            let f = |x: i64| a * x * x + b * x + c;
            let values: Vec<_> = (0..len as i64).map(f).collect();
            prop_assert_eq!(extrapolate(&values), f(len as i64));
        }
    }
}
