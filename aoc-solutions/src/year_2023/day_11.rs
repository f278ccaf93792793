//! Cosmic Expansion

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::grid::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 11, tags = ["grid", "geometry"])]
pub struct Solver;

pub struct Image {
    galaxies: Vec<Pos>,
    /// Empty rows (columns) strictly before each row (column)
    empty_rows_before: Vec<u64>,
    empty_cols_before: Vec<u64>,
}

fn prefix_counts(empty: impl Iterator<Item = bool>) -> Vec<u64> {
    empty
        .scan(0, |seen, is_empty| {
            let before = *seen;
            *seen += u64::from(is_empty);
            Some(before)
        })
        .collect()
}

/// Sum of pairwise galaxy distances when every empty row and column is
/// replaced by `expansion` of them
pub fn distance_sum(image: &Image, expansion: u64) -> u64 {
    let place = |p: &Pos| {
        let row = p.row as u64 + image.empty_rows_before[p.row] * (expansion - 1);
        let col = p.col as u64 + image.empty_cols_before[p.col] * (expansion - 1);
        (row, col)
    };
    image
        .galaxies
        .iter()
        .map(place)
        .tuple_combinations()
        .map(|((r1, c1), (r2, c2))| r1.abs_diff(r2) + c1.abs_diff(c2))
        .sum()
}

impl AocParser for Solver {
    type SharedData<'a> = Image;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse_with(input, |c| match c {
            '#' => Ok(true),
            '.' => Ok(false),
            _ => Err(format!("unexpected character {c:?}")),
        })?;
        Ok(Image {
            galaxies: grid.iter().filter(|&(_, &g)| g).map(|(p, _)| p).collect(),
            empty_rows_before: prefix_counts(grid.rows().map(|row| !row.contains(&true))),
            empty_cols_before: prefix_counts((0..grid.width()).map(|c| !grid.column(c).any(|&g| g))),
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(distance_sum(shared, 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(distance_sum(shared, 1_000_000).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const EXAMPLE: &str = "\
...#......
.......#..
#.........
..........
......#...
.#........
.........#
..........
.......#..
#...#.....
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "374");
    }

    #[test]
    fn test_larger_expansions() {
        let image = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(distance_sum(&image, 10), 1030);
        assert_eq!(distance_sum(&image, 100), 8410);
    }
}
