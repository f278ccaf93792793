//! Regolith Reservoir

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 14, tags = ["simulation", "grid"])]
pub struct Solver;

const SOURCE_X: usize = 500;

/// Rock layout of the cave slice.
///
/// Wide enough for the sand pile resting on the floor two below the lowest
/// rock, which never spreads further than its height from the source.
#[derive(Debug, Clone)]
pub struct Cave {
    width: usize,
    /// Row of the lowest rock
    lowest: usize,
    blocked: Vec<bool>,
}

impl Cave {
    fn floor(&self) -> usize {
        self.lowest + 2
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Drop sand until it either escapes below the rocks or, with a floor,
    /// plugs the source. Returns the units at rest.
    fn pour(&self, with_floor: bool) -> usize {
        let mut blocked = self.blocked.clone();
        // Path of the current grain, resumed from its last free cell
        let mut path = vec![(SOURCE_X, 0)];
        let mut rested = 0;

        while let Some(&(x, y)) = path.last() {
            if y + 1 == self.floor() {
                if !with_floor {
                    break;
                }
                blocked[self.idx(x, y)] = true;
                rested += 1;
                path.pop();
                continue;
            }
            if !with_floor && y >= self.lowest {
                break;
            }

            let below = y + 1;
            match [x, x - 1, x + 1]
                .into_iter()
                .find(|&nx| !blocked[self.idx(nx, below)])
            {
                Some(nx) => path.push((nx, below)),
                None => {
                    blocked[self.idx(x, y)] = true;
                    rested += 1;
                    path.pop();
                }
            }
        }
        rested
    }
}

fn parse_point(s: &str) -> Option<(usize, usize)> {
    let (x, y) = s.trim().split_once(',')?;
    Some((x.parse().ok()?, y.parse().ok()?))
}

impl AocParser for Solver {
    type SharedData<'a> = Cave;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let paths = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                let points = line
                    .split("->")
                    .map(|p| parse_point(p).ok_or_else(|| ParseError::at_line(line_idx, format!("bad point {p:?}"))))
                    .collect::<Result<Vec<_>, _>>()?;
                if points.windows(2).any(|w| w[0].0 != w[1].0 && w[0].1 != w[1].1) {
                    return Err(ParseError::at_line(line_idx, "rock segments must be straight"));
                }
                Ok(points)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let lowest = paths
            .iter()
            .flatten()
            .map(|&(_, y)| y)
            .max()
            .ok_or_else(|| ParseError::MissingData("no rock paths".into()))?;
        let rightmost = paths.iter().flatten().map(|&(x, _)| x).max().unwrap_or(SOURCE_X);
        let width = rightmost.max(SOURCE_X + lowest + 3) + 2;
        if SOURCE_X < lowest + 3 {
            return Err(ParseError::InvalidFormat(format!("rocks reach too deep at y={lowest}")));
        }

        let mut cave = Cave {
            width,
            lowest,
            blocked: vec![false; width * (lowest + 3)],
        };
        for path in &paths {
            for w in path.windows(2) {
                let (x0, x1) = (w[0].0.min(w[1].0), w[0].0.max(w[1].0));
                let (y0, y1) = (w[0].1.min(w[1].1), w[0].1.max(w[1].1));
                for y in y0..=y1 {
                    for x in x0..=x1 {
                        let idx = cave.idx(x, y);
                        cave.blocked[idx] = true;
                    }
                }
            }
            if let [(x, y)] = path[..] {
                let idx = cave.idx(x, y);
                cave.blocked[idx] = true;
            }
        }
        Ok(cave)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.pour(false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.pour(true).to_string())
    }
}
