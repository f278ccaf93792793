//! Cathode-Ray Tube

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 10, tags = ["simulation", "ocr"])]
pub struct Solver;

const SCREEN_WIDTH: usize = 40;
const SCREEN_HEIGHT: usize = 6;

/// Value of the X register during each cycle, starting with cycle 1
pub type Trace = Vec<i64>;

impl AocParser for Solver {
    type SharedData<'a> = Trace;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut x = 1i64;
        let mut trace = Vec::new();
        for (line_idx, line) in input.trim().lines().enumerate() {
            match line.split_whitespace().collect::<Vec<_>>()[..] {
                ["noop"] => trace.push(x),
                ["addx", value] => {
                    let value: i64 = value.parse().map_err(|e| ParseError::at_line(line_idx, e))?;
                    trace.extend([x, x]);
                    x += value;
                }
                _ => return Err(ParseError::at_line(line_idx, format!("unknown instruction {line:?}"))),
            }
        }
        Ok(trace)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let strength = (20..=220)
            .step_by(40)
            .map(|cycle| {
                shared
                    .get(cycle - 1)
                    .map(|&x| cycle as i64 * x)
                    .ok_or_else(|| anyhow!("program ends before cycle {cycle}"))
            })
            .sum::<Result<i64, _>>()?;
        Ok(strength.to_string())
    }
}

/// Draw the CRT: a pixel is lit when the 3-wide sprite at X covers its column
pub fn render(trace: &[i64]) -> String {
    (0..SCREEN_HEIGHT)
        .map(|row| {
            (0..SCREEN_WIDTH)
                .map(|col| match trace.get(row * SCREEN_WIDTH + col) {
                    Some(&x) if (x - col as i64).abs() <= 1 => '#',
                    _ => '.',
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(render(shared))
    }
}
