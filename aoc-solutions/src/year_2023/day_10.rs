//! Pipe Maze

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Pos};
use crate::utils::math::interior_points;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 10, tags = ["grid", "geometry"])]
pub struct Solver;

/// Directions a pipe tile opens towards
fn openings(tile: u8) -> &'static [Direction] {
    use Direction::*;
    match tile {
        b'|' => &[North, South],
        b'-' => &[East, West],
        b'L' => &[North, East],
        b'J' => &[North, West],
        b'7' => &[South, West],
        b'F' => &[South, East],
        _ => &[],
    }
}

pub struct Maze {
    tiles: Grid<u8>,
    start: Pos,
}

impl Maze {
    /// Tiles of the loop through the start, in walking order
    fn trace_loop(&self) -> Result<Vec<Pos>, SolveError> {
        let connects = |pos: Pos, dir: Direction| {
            self.tiles
                .step(pos, dir)
                .filter(|&next| openings(self.tiles[next]).contains(&dir.opposite()))
        };
        let mut dir = Direction::ALL
            .into_iter()
            .find(|&d| connects(self.start, d).is_some())
            .ok_or_else(|| anyhow!("no pipe connects to the start"))?;

        let mut path = vec![self.start];
        let mut pos = self.start;
        loop {
            pos = self
                .tiles
                .step(pos, dir)
                .ok_or_else(|| anyhow!("pipe at {pos:?} leads off the map"))?;
            if pos == self.start {
                return Ok(path);
            }
            let came_from = dir.opposite();
            let exits = openings(self.tiles[pos]);
            if !exits.contains(&came_from) {
                return Err(anyhow!("loop broken at {pos:?}").into());
            }
            dir = exits
                .iter()
                .copied()
                .find(|&d| d != came_from)
                .ok_or_else(|| anyhow!("dead end at {pos:?}"))?;
            path.push(pos);
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Maze;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let tiles = Grid::parse_with(input, |c| match c {
            '|' | '-' | 'L' | 'J' | '7' | 'F' | '.' | 'S' => Ok(c as u8),
            _ => Err(format!("unexpected tile {c:?}")),
        })?;
        let start = tiles
            .find(|&c| c == b'S')
            .ok_or_else(|| ParseError::MissingData("no start tile `S`".into()))?;
        Ok(Maze { tiles, start })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok((shared.trace_loop()?.len() / 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let path = shared.trace_loop()?;
        let vertices: Vec<_> = path.iter().map(|p| (p.col as i64, p.row as i64)).collect();
        Ok(interior_points(&vertices, path.len() as i64).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    #[test]
    fn test_part1_examples() {
        let square = "-L|F7\n7S-7|\nL|7||\n-L-J|\nL|-JF\n";
        let complex = "7-F7-\n.FJ|7\nSJLL7\n|F--J\nLJ.LJ\n";
        assert_eq!(solve::<Solver>(square, 1), "4");
        assert_eq!(solve::<Solver>(complex, 1), "8");
    }

    #[test]
    fn test_part2_examples() {
        let squeezed = "\
...........
.S-------7.
.|F-----7|.
.||.....||.
.||.....||.
.|L-7.F-J|.
.|..|.|..|.
.L--J.L--J.
...........
";
        let larger = "\
.F----7F7F7F7F-7....
.|F--7||||||||FJ....
.||.FJ||||||||L7....
FJL7L7LJLJ||LJ.L-7..
L--J.L7...LJS7F-7L7.
....F-J..F7FJ|L7L7L7
....L7.F7||L7|.L7L7|
.....|FJLJ|FJ|F7|.LJ
....FJL-7.||.||||...
....L---J.LJ.LJLJ...
";
        assert_eq!(solve::<Solver>(squeezed, 2), "4");
        assert_eq!(solve::<Solver>(larger, 2), "8");
    }

    #[test]
    fn test_isolated_start() {
        let mut maze = Solver::parse("...\n.S.\n...\n").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut maze).is_err());
    }
}
