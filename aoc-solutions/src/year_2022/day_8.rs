//! Treetop Tree House

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 8, tags = ["grid"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_with(input, |c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .ok_or_else(|| format!("expected a tree height, got {c:?}"))
        })
    }
}

/// Heights seen walking from `pos` (exclusive) to the edge in `dir`
fn line_of_sight(grid: &Grid<u8>, pos: Pos, dir: Direction) -> impl Iterator<Item = u8> + '_ {
    std::iter::successors(grid.step(pos, dir), move |&p| grid.step(p, dir)).map(|p| grid[p])
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let grid = &*shared;
        let visible = grid
            .iter()
            .filter(|&(pos, &height)| {
                Direction::ALL
                    .into_iter()
                    .any(|dir| line_of_sight(grid, pos, dir).all(|h| h < height))
            })
            .count();
        Ok(visible.to_string())
    }
}

fn scenic_score(grid: &Grid<u8>, pos: Pos) -> usize {
    let height = grid[pos];
    Direction::ALL
        .into_iter()
        .map(|dir| {
            let mut seen = 0;
            for h in line_of_sight(grid, pos, dir) {
                seen += 1;
                if h >= height {
                    break;
                }
            }
            seen
        })
        .product()
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let grid = &*shared;
        let best = grid
            .positions()
            .map(|pos| scenic_score(grid, pos))
            .max()
            .unwrap_or_default();
        Ok(best.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const EXAMPLE: &str = "30373\n25512\n65332\n33549\n35390\n";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "21");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "8");
    }

    #[test]
    fn test_scenic_scores() {
        let grid = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(scenic_score(&grid, Pos::new(1, 2)), 4);
        assert_eq!(scenic_score(&grid, Pos::new(3, 2)), 8);
        assert_eq!(scenic_score(&grid, Pos::new(0, 0)), 0);
    }
}
