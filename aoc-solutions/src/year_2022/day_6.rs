//! Tuning Trouble

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 6, tags = ["sliding-window"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = &'a [u8];

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let signal = input.trim();
        if let Some(bad) = signal.chars().find(|c| !c.is_ascii_lowercase()) {
            return Err(ParseError::InvalidFormat(format!("unexpected character {bad:?}")));
        }
        Ok(signal.as_bytes())
    }
}

/// Number of characters processed when the last `len` were all distinct
pub fn marker_end(signal: &[u8], len: usize) -> Option<usize> {
    let mut counts = [0u32; 26];
    let mut distinct = 0;
    for (i, &c) in signal.iter().enumerate() {
        let slot = &mut counts[(c - b'a') as usize];
        *slot += 1;
        if *slot == 1 {
            distinct += 1;
        }
        if i >= len {
            let slot = &mut counts[(signal[i - len] - b'a') as usize];
            *slot -= 1;
            if *slot == 0 {
                distinct -= 1;
            }
        }
        if distinct == len {
            return Some(i + 1);
        }
    }
    None
}

fn solve_for(signal: &[u8], len: usize) -> Result<String, SolveError> {
    marker_end(signal, len)
        .map(|end| end.to_string())
        .ok_or_else(|| anyhow!("no run of {len} distinct characters").into())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_for(shared, 4)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_for(shared, 14)
    }
}
