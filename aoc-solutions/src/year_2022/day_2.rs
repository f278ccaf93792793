//! Rock Paper Scissors

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 2, tags = ["parsing"])]
pub struct Solver;

/// One strategy guide line: opponent's shape and the second column, both `0..3`
#[derive(Debug, Clone, Copy)]
pub struct Round {
    opponent: u8,
    column: u8,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Round>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .lines()
            .enumerate()
            .map(|(line_idx, line)| match line.trim().as_bytes() {
                [o @ b'A'..=b'C', b' ', c @ b'X'..=b'Z'] => Ok(Round {
                    opponent: o - b'A',
                    column: c - b'X',
                }),
                _ => Err(ParseError::at_line(line_idx, format!("expected `A-C X-Z`, got {line:?}"))),
            })
            .collect()
    }
}

/// Shape score (1-3) plus outcome score (0, 3, 6)
fn score(opponent: u8, me: u8) -> u64 {
    let outcome = (me + 4 - opponent) % 3;
    (me + 1 + outcome * 3) as u64
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared.iter().map(|r| score(r.opponent, r.column)).sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // column: 0 lose, 1 draw, 2 win
        let total: u64 = shared
            .iter()
            .map(|r| score(r.opponent, (r.opponent + r.column + 2) % 3))
            .sum();
        Ok(total.to_string())
    }
}
