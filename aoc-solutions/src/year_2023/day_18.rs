//! Lavaduct Lagoon

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Direction;
use crate::utils::math::interior_points;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 18, tags = ["geometry"])]
pub struct Solver;

/// One dig step, read both ways: plainly and from its colour code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    plan: (Direction, i64),
    color: (Direction, i64),
}

/// Cubic metres of lava held: the trench itself plus everything inside it
pub fn lagoon_volume(steps: impl Iterator<Item = (Direction, i64)>) -> i64 {
    let (mut row, mut col) = (0i64, 0i64);
    let mut vertices = vec![(0, 0)];
    let mut boundary = 0;
    for (dir, len) in steps {
        let (dr, dc) = dir.delta();
        row += dr as i64 * len;
        col += dc as i64 * len;
        vertices.push((col, row));
        boundary += len;
    }
    interior_points(&vertices, boundary) + boundary
}

fn parse_dir(s: &str) -> Option<Direction> {
    match s {
        "U" | "3" => Some(Direction::North),
        "R" | "0" => Some(Direction::East),
        "D" | "1" => Some(Direction::South),
        "L" | "2" => Some(Direction::West),
        _ => None,
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Step>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                let bad = |what: &str| ParseError::at_line(line_idx, format!("bad {what} in {line:?}"));
                let mut fields = line.split_whitespace();
                let (Some(dir), Some(len), Some(color)) = (fields.next(), fields.next(), fields.next()) else {
                    return Err(bad("step"));
                };
                let hex = color
                    .strip_prefix("(#")
                    .and_then(|c| c.strip_suffix(')'))
                    .filter(|h| h.len() == 6 && h.is_ascii())
                    .ok_or_else(|| bad("colour"))?;
                Ok(Step {
                    plan: (
                        parse_dir(dir).ok_or_else(|| bad("direction"))?,
                        len.parse().map_err(|_| bad("length"))?,
                    ),
                    color: (
                        parse_dir(&hex[5..]).ok_or_else(|| bad("colour direction"))?,
                        i64::from_str_radix(&hex[..5], 16).map_err(|_| bad("colour length"))?,
                    ),
                })
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(lagoon_volume(shared.iter().map(|s| s.plan)).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(lagoon_volume(shared.iter().map(|s| s.color)).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const EXAMPLE: &str = "\
R 6 (#70c710)
D 5 (#0dc571)
L 2 (#5713f0)
D 2 (#d2c081)
R 2 (#59c680)
D 2 (#411b91)
L 5 (#8ceee2)
U 2 (#caa173)
L 1 (#1b58a2)
U 2 (#caa171)
R 2 (#7807d2)
U 3 (#a77fa3)
L 2 (#015232)
U 2 (#7a21e3)
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "62");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "952408144115");
    }

    #[test]
    fn test_colour_decoding() {
        let steps = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(steps[0].color, (Direction::East, 461937));
        assert_eq!(steps[1].color, (Direction::South, 56407));
    }

    #[test]
    fn test_bad_colour_codes() {
        for line in ["R 6 (#7a21é)", "R 6 (#70c71)", "R 6 (#70c714)", "R 6 70c710"] {
            let err = Solver::parse(line).unwrap_err();
            assert!(err.to_string().contains("(line 1) bad colour"), "{line}: {err}");
        }
    }

    #[test]
    fn test_unit_square() {
        let square = [
            (Direction::East, 1),
            (Direction::South, 1),
            (Direction::West, 1),
            (Direction::North, 1),
        ];
        assert_eq!(lagoon_volume(square.into_iter()), 4);
    }
}
