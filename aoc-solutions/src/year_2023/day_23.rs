//! A Long Walk

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

use crate::utils::grid::{Direction, Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 23, tags = ["grid", "graph", "dfs"])]
pub struct Solver;

fn slope(tile: u8) -> Option<Direction> {
    match tile {
        b'^' => Some(Direction::North),
        b'>' => Some(Direction::East),
        b'v' => Some(Direction::South),
        b'<' => Some(Direction::West),
        _ => None,
    }
}

pub struct Trails {
    map: Grid<u8>,
    start: Pos,
    end: Pos,
}

/// Trail junctions and the corridor lengths between them
struct JunctionGraph {
    /// `edges[j]` lists `(other junction, steps)`
    edges: Vec<Vec<(usize, u32)>>,
    start: usize,
    end: usize,
}

impl Trails {
    fn open(&self, pos: Pos) -> bool {
        self.map[pos] != b'#'
    }

    /// Whether stepping from `pos` towards `dir` obeys the slopes
    fn downhill(&self, pos: Pos, next: Pos, dir: Direction) -> bool {
        slope(self.map[pos]).is_none_or(|s| s == dir) && slope(self.map[next]) != Some(dir.opposite())
    }

    fn compress(&self, slippery: bool) -> Result<JunctionGraph, SolveError> {
        let mut junctions: Vec<Pos> = vec![self.start, self.end];
        junctions.extend(
            self.map
                .positions()
                .filter(|&p| self.open(p) && self.map.neighbors4(p).filter(|&n| self.open(n)).count() >= 3),
        );
        if junctions.len() > 64 {
            return Err(anyhow!("{} junctions do not fit the visited set", junctions.len()).into());
        }
        let index: HashMap<Pos, usize> = junctions.iter().enumerate().map(|(i, &p)| (p, i)).collect();

        let mut edges = vec![Vec::new(); junctions.len()];
        for (from, &origin) in junctions.iter().enumerate() {
            for first in Direction::ALL {
                let (mut pos, mut dir, mut steps) = (origin, first, 0);
                // Walk the corridor until the next junction or a dead end
                let reached = loop {
                    let Some(next) = self.map.step(pos, dir).filter(|&n| self.open(n)) else {
                        break None;
                    };
                    if slippery && !self.downhill(pos, next, dir) {
                        break None;
                    }
                    (pos, steps) = (next, steps + 1);
                    if let Some(&to) = index.get(&pos) {
                        break Some(to);
                    }
                    let Some(turn) = [dir, dir.turn_left(), dir.turn_right()]
                        .into_iter()
                        .find(|&d| self.map.step(pos, d).is_some_and(|n| self.open(n)))
                    else {
                        break None;
                    };
                    dir = turn;
                };
                if let Some(to) = reached
                    && to != from
                {
                    edges[from].push((to, steps));
                }
            }
        }

        Ok(JunctionGraph {
            edges,
            start: 0,
            end: 1,
        })
    }
}

impl JunctionGraph {
    /// Longest simple path from start to end, by exhaustive search
    fn longest(&self) -> Option<u32> {
        fn walk(graph: &JunctionGraph, node: usize, visited: u64, length: u32, best: &mut Option<u32>) {
            if node == graph.end {
                *best = (*best).max(Some(length));
                return;
            }
            for &(next, steps) in &graph.edges[node] {
                if visited & (1 << next) == 0 {
                    walk(graph, next, visited | (1 << next), length + steps, best);
                }
            }
        }
        let mut best = None;
        walk(self, self.start, 1 << self.start, 0, &mut best);
        best
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Trails;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let map = Grid::parse_with(input, |c| match c {
            '#' | '.' | '^' | '>' | 'v' | '<' => Ok(c as u8),
            _ => Err(format!("unexpected tile {c:?}")),
        })?;
        let gap = |row: usize| {
            map.row(row)
                .iter()
                .position(|&c| c == b'.')
                .map(|col| Pos::new(row, col))
        };
        let start = gap(0).ok_or_else(|| ParseError::MissingData("no gap in the top row".into()))?;
        let end = gap(map.height() - 1).ok_or_else(|| ParseError::MissingData("no gap in the bottom row".into()))?;
        Ok(Trails { map, start, end })
    }
}

fn hike(trails: &Trails, slippery: bool) -> Result<String, SolveError> {
    trails
        .compress(slippery)?
        .longest()
        .map(|len| len.to_string())
        .ok_or_else(|| anyhow!("no hike reaches the bottom row").into())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        hike(shared, true)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        hike(shared, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const EXAMPLE: &str = "\
#.#####################
#.......#########...###
#######.#########.#.###
###.....#.>.>.###.#.###
###v#####.#v#.###.#.###
###.>...#.#.#.....#...#
###v###.#.#.#########.#
###...#.#.#.......#...#
#####.#.#.#######.#.###
#.....#.#.#.......#...#
#.#####.#.#.#########v#
#.#...#...#...###...>.#
#.#.#v#######v###.###v#
#...#.>.#...>.>.#.###.#
#####v#.#.###v#.#.###.#
#.....#...#...#.#.#...#
#.#########.###.#.#.###
#...###...#...#...#.###
###.###.#.###v#####v###
#...#...#.#.>.>.#.>.###
#.###.###.#.###.#.#v###
#.....###...###...#...#
#####################.#
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "94");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "154");
    }

    #[test]
    fn test_straight_corridor() {
        assert_eq!(solve::<Solver>("#.#\n#.#\n#.#\n", 2), "2");
    }
}
