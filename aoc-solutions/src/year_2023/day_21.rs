//! Step Counter

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashSet, VecDeque};

use crate::utils::grid::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 21, tags = ["grid", "bfs", "quadratic"])]
pub struct Solver;

const STEPS: usize = 64;
const INFINITE_STEPS: usize = 26_501_365;

pub struct Garden {
    rocks: Grid<bool>,
    start: Pos,
}

impl Garden {
    /// Plots reachable in exactly `steps` steps on the map repeated in every
    /// direction. With `tiled` off, the map's edge is a wall.
    pub fn reachable(&self, steps: usize, tiled: bool) -> usize {
        let (h, w) = (self.rocks.height() as i64, self.rocks.width() as i64);
        let is_rock = |(r, c): (i64, i64)| self.rocks[Pos::new(r.rem_euclid(h) as usize, c.rem_euclid(w) as usize)];
        let start = (self.start.row as i64, self.start.col as i64);

        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([(start, 0)]);
        let mut count = 0;
        while let Some(((r, c), dist)) = queue.pop_front() {
            // A plot reached early can be revisited by stepping back and forth
            if dist % 2 == steps % 2 {
                count += 1;
            }
            if dist == steps {
                continue;
            }
            for next in [(r - 1, c), (r + 1, c), (r, c - 1), (r, c + 1)] {
                let inside = (0..h).contains(&next.0) && (0..w).contains(&next.1);
                if (tiled || inside) && !is_rock(next) && seen.insert(next) {
                    queue.push_back((next, dist + 1));
                }
            }
        }
        count
    }
}

/// Value at `x` of the quadratic through `(0, y0)`, `(1, y1)`, `(2, y2)`
pub fn extrapolate_quadratic(y0: i64, y1: i64, y2: i64, x: i64) -> i64 {
    let first = y1 - y0;
    let second = y2 - 2 * y1 + y0;
    y0 + x * first + x * (x - 1) / 2 * second
}

impl AocParser for Solver {
    type SharedData<'a> = Garden;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let raw = Grid::parse_with(input, |c| match c {
            '.' | '#' | 'S' => Ok(c),
            _ => Err(format!("unexpected tile {c:?}")),
        })?;
        let start = raw
            .find(|&c| c == 'S')
            .ok_or_else(|| ParseError::MissingData("no start tile `S`".into()))?;
        Ok(Garden {
            rocks: raw.map(|&c| c == '#'),
            start,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.reachable(STEPS, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    /// The reachable area grows quadratically in whole map widths once the
    /// start sits in the middle of a square map, so three samples one width
    /// apart pin it down.
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let size = shared.rocks.width();
        if shared.rocks.height() != size || shared.start != Pos::new(size / 2, size / 2) {
            return Err(anyhow!("expected a square map with the start in the middle").into());
        }
        let offset = INFINITE_STEPS % size;
        let [y0, y1, y2] = [0, 1, 2].map(|k| shared.reachable(offset + k * size, true) as i64);
        tracing::debug!(y0, y1, y2, "sampled reachable plots");
        let widths = (INFINITE_STEPS / size) as i64;
        Ok(extrapolate_quadratic(y0, y1, y2, widths).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
...........
.....###.#.
.###.##..#.
..#.#...#..
....#.#....
.##..S####.
.##..#...#.
.......##..
.##.#.####.
.##..##.##.
...........
";

    #[test]
    fn test_bounded_example() {
        let garden = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(garden.reachable(6, false), 16);
    }

    #[test]
    fn test_tiled_example() {
        let garden = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(garden.reachable(6, true), 16);
        assert_eq!(garden.reachable(10, true), 50);
        assert_eq!(garden.reachable(50, true), 1594);
        assert_eq!(garden.reachable(100, true), 6536);
    }

    #[test]
    fn test_quadratic_extrapolation() {
        let f = |x: i64| 3 * x * x - 7 * x + 11;
        assert_eq!(extrapolate_quadratic(f(0), f(1), f(2), 202_300), f(202_300));
    }
}
