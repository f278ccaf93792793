//! Parabolic Reflector Dish

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

use crate::utils::grid::{Direction, Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 14, tags = ["grid", "cycle-detection"])]
pub struct Solver;

const SPIN_CYCLES: usize = 1_000_000_000;
const SPIN_ORDER: [Direction; 4] = [Direction::North, Direction::West, Direction::South, Direction::East];

/// Roll every round rock (`O`) as far as it goes towards `dir`
fn tilt(grid: &mut Grid<u8>, dir: Direction) {
    let vertical = matches!(dir, Direction::North | Direction::South);
    let reversed = matches!(dir, Direction::South | Direction::East);
    let (lines, len) = if vertical {
        (grid.width(), grid.height())
    } else {
        (grid.height(), grid.width())
    };

    for line in 0..lines {
        // `k` counts from the edge the rocks roll towards
        let pos = |k: usize| {
            let k = if reversed { len - 1 - k } else { k };
            if vertical { Pos::new(k, line) } else { Pos::new(line, k) }
        };
        let mut free = 0;
        for k in 0..len {
            match grid[pos(k)] {
                b'#' => free = k + 1,
                b'O' => {
                    grid[pos(k)] = b'.';
                    grid[pos(free)] = b'O';
                    free += 1;
                }
                _ => {}
            }
        }
    }
}

fn north_load(grid: &Grid<u8>) -> usize {
    grid.iter()
        .filter(|&(_, &c)| c == b'O')
        .map(|(pos, _)| grid.height() - pos.row)
        .sum()
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_with(input, |c| match c {
            'O' | '#' | '.' => Ok(c as u8),
            _ => Err(format!("unexpected character {c:?}")),
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut grid = shared.clone();
        tilt(&mut grid, Direction::North);
        Ok(north_load(&grid).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut grid = shared.clone();
        let mut seen: HashMap<Grid<u8>, usize> = HashMap::new();

        let mut done = 0;
        while done < SPIN_CYCLES {
            if let Some(first) = seen.insert(grid.clone(), done) {
                let period = done - first;
                tracing::debug!(first, period, "spin cycle repeats");
                done = SPIN_CYCLES - (SPIN_CYCLES - done) % period;
                seen.clear();
                if done == SPIN_CYCLES {
                    break;
                }
            }
            for dir in SPIN_ORDER {
                tilt(&mut grid, dir);
            }
            done += 1;
        }
        Ok(north_load(&grid).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const EXAMPLE: &str = "\
O....#....
O.OO#....#
.....##...
OO.#O....O
.O.....O#.
O.#..O.#.#
..O..#O..O
.......O..
#....###..
#OO..#....
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "136");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "64");
    }

    #[test]
    fn test_one_spin_cycle() {
        let mut grid = Solver::parse(EXAMPLE).unwrap();
        for dir in SPIN_ORDER {
            tilt(&mut grid, dir);
        }
        let expected = "\
.....#....
....#...O#
...OO##...
.OO#......
.....OOO#.
.O#...O#.#
....O#....
......OOOO
#...O###..
#..OO#....";
        assert_eq!(grid.render(), expected);
    }
}
