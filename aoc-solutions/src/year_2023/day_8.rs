//! Haunted Wasteland

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

use crate::utils::math::lcm;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 8, tags = ["graph", "lcm"])]
pub struct Solver;

/// Node names are resolved to indices; `nodes[i]` is `(left, right)`.
#[derive(Debug)]
pub struct Network<'a> {
    turns: Vec<bool>,
    names: Vec<&'a str>,
    nodes: Vec<(usize, usize)>,
}

impl Network<'_> {
    /// Steps from `start` until a node satisfying `is_end` is reached
    fn steps(&self, start: usize, is_end: impl Fn(&str) -> bool) -> Result<u64, SolveError> {
        // Without an end within this bound the walk is a loop
        let limit = self.turns.len() * self.nodes.len() + 1;
        let mut node = start;
        for (steps, &right) in self.turns.iter().cycle().take(limit).enumerate() {
            if is_end(self.names[node]) {
                return Ok(steps as u64);
            }
            node = if right { self.nodes[node].1 } else { self.nodes[node].0 };
        }
        Err(anyhow!("no end node reachable from {}", self.names[start]).into())
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Network<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut lines = input.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());
        let (_, turns) = lines
            .next()
            .ok_or_else(|| ParseError::MissingData("no instructions".into()))?;
        let turns = turns
            .trim()
            .chars()
            .map(|c| match c {
                'L' => Ok(false),
                'R' => Ok(true),
                _ => Err(ParseError::at_line(0, format!("unexpected turn {c:?}"))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let edges = lines
            .map(|(line_idx, line)| {
                let (name, targets) = line
                    .split_once(" = ")
                    .ok_or_else(|| ParseError::at_line(line_idx, "expected `NAME = (LEFT, RIGHT)`"))?;
                let (left, right) = targets
                    .trim()
                    .strip_prefix('(')
                    .and_then(|t| t.strip_suffix(')'))
                    .and_then(|t| t.split_once(", "))
                    .ok_or_else(|| ParseError::at_line(line_idx, "expected `(LEFT, RIGHT)`"))?;
                Ok((name.trim(), left, right, line_idx))
            })
            .collect::<Result<Vec<_>, ParseError>>()?;

        let index: HashMap<&str, usize> = edges.iter().enumerate().map(|(i, e)| (e.0, i)).collect();
        let lookup = |name: &str, line_idx: usize| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| ParseError::at_line(line_idx, format!("unknown node {name}")))
        };
        let nodes = edges
            .iter()
            .map(|&(_, l, r, line_idx)| Ok((lookup(l, line_idx)?, lookup(r, line_idx)?)))
            .collect::<Result<Vec<_>, ParseError>>()?;

        Ok(Network {
            turns,
            names: edges.iter().map(|e| e.0).collect(),
            nodes,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let start = shared
            .names
            .iter()
            .position(|&n| n == "AAA")
            .ok_or_else(|| anyhow!("no node AAA"))?;
        Ok(shared.steps(start, |n| n == "ZZZ")?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // Every ghost's path is a clean cycle through its end node, so the
        // ghosts meet after the least common multiple of the path lengths.
        let mut total = None;
        for (start, name) in shared.names.iter().enumerate() {
            if name.ends_with('A') {
                let steps = shared.steps(start, |n| n.ends_with('Z'))?;
                total = Some(total.map_or(steps, |t| lcm(t, steps)));
            }
        }
        total
            .map(|t| t.to_string())
            .ok_or_else(|| anyhow!("no start nodes ending in A").into())
    }
}
