//! Calorie Counting

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 1, tags = ["parsing"])]
pub struct Solver;

impl AocParser for Solver {
    /// Calories carried by each elf, largest first
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut totals = vec![0u64];
        for (line_idx, line) in input.trim().lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                totals.push(0);
                continue;
            }
            let calories: u64 = line.parse().map_err(|e| ParseError::at_line(line_idx, e))?;
            if let Some(last) = totals.last_mut() {
                *last += calories;
            }
        }
        totals.sort_unstable_by(|a, b| b.cmp(a));
        Ok(totals)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared[0].to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().take(3).sum::<u64>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const EXAMPLE: &str = "1000\n2000\n3000\n\n4000\n\n5000\n6000\n\n7000\n8000\n9000\n\n10000\n";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "24000");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "45000");
    }

    #[test]
    fn test_bad_line_reports_position() {
        let err = Solver::parse("100\n\nabc\n").unwrap_err();
        assert!(err.to_string().contains("(line 3)"), "{err}");
    }
}
