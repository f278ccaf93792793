//! Hill Climbing Algorithm

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::VecDeque;

use crate::utils::grid::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 12, tags = ["grid", "bfs"])]
pub struct Solver;

pub struct Heightmap {
    heights: Grid<u8>,
    start: Pos,
    /// Steps from every cell to the summit, `None` when unreachable
    to_summit: Grid<Option<u32>>,
}

impl AocParser for Solver {
    type SharedData<'a> = Heightmap;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let raw = Grid::parse_with(input, |c| match c {
            'S' | 'E' | 'a'..='z' => Ok(c as u8),
            _ => Err(format!("unexpected character {c:?}")),
        })?;
        let start = raw
            .find(|&c| c == b'S')
            .ok_or_else(|| ParseError::MissingData("no start marker `S`".into()))?;
        let end = raw
            .find(|&c| c == b'E')
            .ok_or_else(|| ParseError::MissingData("no summit marker `E`".into()))?;

        let heights = raw.map(|&c| match c {
            b'S' => 0,
            b'E' => 25,
            c => c - b'a',
        });
        let to_summit = descend(&heights, end);

        Ok(Heightmap {
            heights,
            start,
            to_summit,
        })
    }
}

/// Breadth-first search walking downhill from the summit.
///
/// An uphill step climbs at most one unit, so walking backwards a step may
/// drop at most one unit.
fn descend(heights: &Grid<u8>, end: Pos) -> Grid<Option<u32>> {
    let mut dist = Grid::new(heights.width(), heights.height(), None);
    dist[end] = Some(0);
    let mut queue = VecDeque::from([end]);

    while let Some(pos) = queue.pop_front() {
        let (h, d) = (heights[pos], dist[pos].unwrap_or_default());
        for next in heights.neighbors4(pos) {
            if dist[next].is_none() && heights[next] + 1 >= h {
                dist[next] = Some(d + 1);
                queue.push_back(next);
            }
        }
    }
    dist
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.to_summit[shared.start]
            .map(|d| d.to_string())
            .ok_or_else(|| anyhow!("summit is unreachable from the start").into())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .heights
            .iter()
            .filter(|&(_, &h)| h == 0)
            .filter_map(|(pos, _)| shared.to_summit[pos])
            .min()
            .map(|d| d.to_string())
            .ok_or_else(|| anyhow!("summit is unreachable from every lowest square").into())
    }
}
