//! Clumsy Crucible

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::utils::grid::{Direction, Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 17, tags = ["grid", "dijkstra"])]
pub struct Solver;

/// Least heat loss from the top-left to the bottom-right block when every
/// straight run is `min_run..=max_run` blocks long.
///
/// A state is a block plus the axis of the run that reached it; the next run
/// always turns onto the other axis.
pub fn least_heat_loss(grid: &Grid<u8>, min_run: usize, max_run: usize) -> Option<u32> {
    let target = Pos::new(grid.height() - 1, grid.width() - 1);
    // best[axis] per block; axis 0 is vertical, 1 horizontal
    let mut best: [Grid<u32>; 2] = std::array::from_fn(|_| Grid::new(grid.width(), grid.height(), u32::MAX));
    let mut heap = BinaryHeap::new();

    let start = Pos::new(0, 0);
    for axis in 0..2 {
        best[axis][start] = 0;
        heap.push(Reverse((0u32, start, axis)));
    }

    while let Some(Reverse((loss, pos, axis))) = heap.pop() {
        if pos == target {
            return Some(loss);
        }
        if loss > best[axis][pos] {
            continue;
        }
        let next_axis = 1 - axis;
        let turns = if next_axis == 0 {
            [Direction::North, Direction::South]
        } else {
            [Direction::East, Direction::West]
        };
        for dir in turns {
            let (mut cur, mut cost) = (pos, loss);
            for run in 1..=max_run {
                let Some(next) = grid.step(cur, dir) else {
                    break;
                };
                cur = next;
                cost += u32::from(grid[cur]);
                if run >= min_run && cost < best[next_axis][cur] {
                    best[next_axis][cur] = cost;
                    heap.push(Reverse((cost, cur, next_axis)));
                }
            }
        }
    }
    None
}

fn solve_with(grid: &Grid<u8>, min_run: usize, max_run: usize) -> Result<String, SolveError> {
    least_heat_loss(grid, min_run, max_run)
        .map(|loss| loss.to_string())
        .ok_or_else(|| anyhow!("no path to the factory").into())
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_with(input, |c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .ok_or_else(|| format!("expected a digit, found {c:?}"))
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_with(shared, 1, 3)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_with(shared, 4, 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const EXAMPLE: &str = "\
2413432311323
3215453535623
3255245654254
3446585845452
4546657867536
1438598798454
4457876987766
3637877979653
4654967986887
4564679986453
1224686865563
2546548887735
4322674655533
";

    const UNFORTUNATE: &str = "\
111111111111
999999999991
999999999991
999999999991
999999999991
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "102");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "94");
    }

    #[test]
    fn test_ultra_crucible_must_run_four() {
        assert_eq!(solve::<Solver>(UNFORTUNATE, 2), "71");
    }

    #[test]
    fn test_unreachable_with_long_minimum_run() {
        let grid = Solver::parse("12\n34\n").unwrap();
        assert_eq!(least_heat_loss(&grid, 4, 10), None);
    }
}
