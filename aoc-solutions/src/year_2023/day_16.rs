//! The Floor Will Be Lava

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;

use crate::utils::grid::{Direction, Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 16, tags = ["grid", "parallel"])]
pub struct Solver;

/// Outgoing beam directions for a beam entering `tile` heading `dir`
fn redirect(tile: u8, dir: Direction) -> [Option<Direction>; 2] {
    use Direction::*;
    match (tile, dir) {
        (b'/', East) => [Some(North), None],
        (b'/', North) => [Some(East), None],
        (b'/', West) => [Some(South), None],
        (b'/', South) => [Some(West), None],
        (b'\\', East) => [Some(South), None],
        (b'\\', South) => [Some(East), None],
        (b'\\', West) => [Some(North), None],
        (b'\\', North) => [Some(West), None],
        (b'|', East | West) => [Some(North), Some(South)],
        (b'-', North | South) => [Some(East), Some(West)],
        _ => [Some(dir), None],
    }
}

/// Tiles energized by a beam entering at `start` heading `dir`
pub fn energized(grid: &Grid<u8>, start: Pos, dir: Direction) -> usize {
    // Directions seen per tile, one bit each
    let mut seen: Grid<u8> = Grid::new(grid.width(), grid.height(), 0);
    let mut beams = vec![(start, dir)];

    while let Some((pos, dir)) = beams.pop() {
        let bit = 1 << dir.index();
        if seen[pos] & bit != 0 {
            continue;
        }
        seen[pos] |= bit;
        for out in redirect(grid[pos], dir).into_iter().flatten() {
            if let Some(next) = grid.step(pos, out) {
                beams.push((next, out));
            }
        }
    }
    seen.cells().iter().filter(|&&s| s != 0).count()
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_with(input, |c| match c {
            '.' | '/' | '\\' | '|' | '-' => Ok(c as u8),
            _ => Err(format!("unexpected tile {c:?}")),
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(energized(shared, Pos::new(0, 0), Direction::East).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let grid = &*shared;
        let (w, h) = (grid.width(), grid.height());
        let entries: Vec<(Pos, Direction)> = (0..h)
            .flat_map(|r| [(Pos::new(r, 0), Direction::East), (Pos::new(r, w - 1), Direction::West)])
            .chain((0..w).flat_map(|c| [(Pos::new(0, c), Direction::South), (Pos::new(h - 1, c), Direction::North)]))
            .collect();

        entries
            .into_par_iter()
            .map(|(pos, dir)| energized(grid, pos, dir))
            .max()
            .map(|best| best.to_string())
            .ok_or_else(|| anyhow!("no edge tiles").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const EXAMPLE: &str = r".|...\....
|.-.\.....
.....|-...
........|.
..........
.........\
..../.\\..
.-.-/..|..
.|....-|.\
..//.|....
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "46");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "51");
    }

    #[test]
    fn test_best_entry_is_top_row() {
        let grid = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(energized(&grid, Pos::new(0, 3), Direction::South), 51);
    }

    #[test]
    fn test_splitter_loop_terminates() {
        let grid = Solver::parse("-\\\n\\/\n").unwrap();
        assert_eq!(energized(&grid, Pos::new(0, 0), Direction::East), 4);
    }
}
