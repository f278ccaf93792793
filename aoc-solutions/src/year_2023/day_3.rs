//! Gear Ratios

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 3, tags = ["grid"])]
pub struct Solver;

/// A number in the schematic and the columns it spans on its row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartNumber {
    value: u32,
    row: usize,
    first_col: usize,
    last_col: usize,
}

impl PartNumber {
    fn touches(&self, pos: Pos) -> bool {
        pos.row.abs_diff(self.row) <= 1 && pos.col + 1 >= self.first_col && pos.col <= self.last_col + 1
    }
}

pub struct Schematic {
    numbers: Vec<PartNumber>,
    /// Symbol cells, anything but digits and `.`
    symbols: Vec<(Pos, u8)>,
}

impl AocParser for Solver {
    type SharedData<'a> = Schematic;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse_bytes(input)?;
        let mut numbers = Vec::new();

        for (row, cells) in grid.rows().enumerate() {
            let mut current: Option<PartNumber> = None;
            for (col, &c) in cells.iter().enumerate() {
                match (c.is_ascii_digit(), current.as_mut()) {
                    (true, Some(n)) => {
                        n.value = n.value * 10 + u32::from(c - b'0');
                        n.last_col = col;
                    }
                    (true, None) => {
                        current = Some(PartNumber {
                            value: u32::from(c - b'0'),
                            row,
                            first_col: col,
                            last_col: col,
                        })
                    }
                    (false, _) => numbers.extend(current.take()),
                }
            }
            numbers.extend(current);
        }

        let symbols = grid
            .iter()
            .filter(|&(_, &c)| c != b'.' && !c.is_ascii_digit())
            .map(|(pos, &c)| (pos, c))
            .collect();

        Ok(Schematic { numbers, symbols })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u32 = shared
            .numbers
            .iter()
            .filter(|n| shared.symbols.iter().any(|&(pos, _)| n.touches(pos)))
            .map(|n| n.value)
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u64 = shared
            .symbols
            .iter()
            .filter(|&&(_, c)| c == b'*')
            .filter_map(|&(pos, _)| {
                let adjacent: Vec<_> = shared.numbers.iter().filter(|n| n.touches(pos)).collect();
                match adjacent[..] {
                    [a, b] => Some(u64::from(a.value) * u64::from(b.value)),
                    _ => None,
                }
            })
            .sum();
        Ok(sum.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const EXAMPLE: &str = "\
467..114..
...*......
..35..633.
......#...
617*......
.....+.58.
..592.....
......755.
...$.*....
.664.598..
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "4361");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "467835");
    }

    #[test]
    fn test_number_at_row_end() {
        assert_eq!(solve::<Solver>("..#12\n.....\n", 1), "12");
        assert_eq!(solve::<Solver>("...12\n#....\n", 1), "0");
    }
}
