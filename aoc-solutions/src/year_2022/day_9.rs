//! Rope Bridge

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 9, tags = ["simulation"])]
pub struct Solver;

/// Unit step `(dx, dy)` and how many times to take it
pub type Motion = ((i32, i32), u32);

impl AocParser for Solver {
    type SharedData<'a> = Vec<Motion>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .lines()
            .enumerate()
            .map(|(line_idx, line)| {
                let (dir, steps) = line
                    .trim()
                    .split_once(' ')
                    .ok_or_else(|| ParseError::at_line(line_idx, "expected `<dir> <steps>`"))?;
                let delta = match dir {
                    "R" => (1, 0),
                    "L" => (-1, 0),
                    "U" => (0, 1),
                    "D" => (0, -1),
                    _ => return Err(ParseError::at_line(line_idx, format!("unknown direction {dir:?}"))),
                };
                let steps = steps.parse().map_err(|e| ParseError::at_line(line_idx, e))?;
                Ok((delta, steps))
            })
            .collect()
    }
}

/// Distinct positions visited by the last of `knots` knots
pub fn tail_visits(motions: &[Motion], knots: usize) -> usize {
    let mut rope = vec![(0i32, 0i32); knots.max(1)];
    let mut visited = HashSet::from([(0, 0)]);

    for &((dx, dy), steps) in motions {
        for _ in 0..steps {
            rope[0].0 += dx;
            rope[0].1 += dy;
            for i in 1..rope.len() {
                let (hx, hy) = rope[i - 1];
                let (tx, ty) = &mut rope[i];
                if (hx - *tx).abs() <= 1 && (hy - *ty).abs() <= 1 {
                    break;
                }
                *tx += (hx - *tx).signum();
                *ty += (hy - *ty).signum();
            }
            if let Some(&tail) = rope.last() {
                visited.insert(tail);
            }
        }
    }
    visited.len()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tail_visits(shared, 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tail_visits(shared, 10).to_string())
    }
}
