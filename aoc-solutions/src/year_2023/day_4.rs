//! Scratchcards

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

use crate::utils::dp_cache::{ClosureProblem, DpCache, VecBackend};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 4, tags = ["dp"])]
pub struct Solver;

impl AocParser for Solver {
    /// Winning numbers held on each card
    type SharedData<'a> = Vec<usize>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                let (_, numbers) = line
                    .split_once(':')
                    .ok_or_else(|| ParseError::at_line(line_idx, "missing `:`"))?;
                let (winning, held) = numbers
                    .split_once('|')
                    .ok_or_else(|| ParseError::at_line(line_idx, "missing `|`"))?;
                let parse_set = |s: &str| {
                    s.split_whitespace()
                        .map(str::parse::<u32>)
                        .collect::<Result<HashSet<_>, _>>()
                        .map_err(|e| ParseError::at_line(line_idx, e))
                };
                let winning = parse_set(winning)?;
                Ok(parse_set(held)?.intersection(&winning).count())
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let points: u64 = shared
            .iter()
            .filter(|&&m| m > 0)
            .map(|&m| 1u64 << (m - 1))
            .sum();
        Ok(points.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let matches = &*shared;
        let last = matches.len().saturating_sub(1);
        // Cards held in the end for one instance of card `i`, itself included
        let cascade = DpCache::new(
            VecBackend::with_capacity(matches.len()),
            ClosureProblem::new(
                |&i: &usize| (i + 1..=(i + matches[i]).min(last)).collect(),
                |_: &usize, won: Vec<u64>| 1 + won.iter().sum::<u64>(),
            ),
        );
        let total: u64 = (0..matches.len()).rev().map(|i| cascade.get(&i)).sum();
        Ok(total.to_string())
    }
}
