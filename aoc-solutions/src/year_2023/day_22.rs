//! Sand Slabs

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashMap, VecDeque};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 22, tags = ["simulation", "graph"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Brick {
    min: [u32; 3],
    max: [u32; 3],
}

/// Which settled bricks rest on which, indexed in settling order
pub struct Stack {
    supports: Vec<Vec<usize>>,
    supported_by: Vec<Vec<usize>>,
}

impl Stack {
    /// Let every brick fall as far as it can, lowest first
    fn settle(mut bricks: Vec<Brick>) -> Stack {
        bricks.sort_unstable_by_key(|b| b.min[2]);
        let n = bricks.len();
        let mut supports = vec![Vec::new(); n];
        let mut supported_by = vec![Vec::new(); n];
        // (height, brick on top) per occupied column
        let mut top: HashMap<(u32, u32), (u32, usize)> = HashMap::new();

        for (idx, brick) in bricks.iter().enumerate() {
            let footprint: Vec<(u32, u32)> = (brick.min[0]..=brick.max[0])
                .flat_map(|x| (brick.min[1]..=brick.max[1]).map(move |y| (x, y)))
                .collect();
            let floor = footprint
                .iter()
                .filter_map(|xy| top.get(xy).map(|&(h, _)| h))
                .max()
                .unwrap_or(0);

            let mut below: Vec<usize> = footprint
                .iter()
                .filter_map(|xy| top.get(xy))
                .filter(|&&(h, _)| h == floor && floor > 0)
                .map(|&(_, other)| other)
                .collect();
            below.sort_unstable();
            below.dedup();
            for &other in &below {
                supports[other].push(idx);
            }
            supported_by[idx] = below;

            let height = floor + brick.max[2] - brick.min[2] + 1;
            for xy in footprint {
                top.insert(xy, (height, idx));
            }
        }
        Stack {
            supports,
            supported_by,
        }
    }

    /// Bricks that would fall if brick `removed` were disintegrated
    fn chain_reaction(&self, removed: usize) -> usize {
        let mut lost = vec![0usize; self.supports.len()];
        let mut queue = VecDeque::from([removed]);
        let mut fallen = 0;
        while let Some(idx) = queue.pop_front() {
            for &above in &self.supports[idx] {
                lost[above] += 1;
                if lost[above] == self.supported_by[above].len() {
                    fallen += 1;
                    queue.push_back(above);
                }
            }
        }
        fallen
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Stack;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let bricks = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                let coords = line
                    .split(['~', ','])
                    .map(|s| s.trim().parse::<u32>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| ParseError::at_line(line_idx, e))?;
                let [x0, y0, z0, x1, y1, z1] = coords[..] else {
                    return Err(ParseError::at_line(line_idx, "expected `x,y,z~x,y,z`"));
                };
                if z0.min(z1) == 0 {
                    return Err(ParseError::at_line(line_idx, "bricks start above the ground at z=1"));
                }
                Ok(Brick {
                    min: [x0.min(x1), y0.min(y1), z0.min(z1)],
                    max: [x0.max(x1), y0.max(y1), z0.max(z1)],
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Stack::settle(bricks))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let safe = shared
            .supports
            .iter()
            .filter(|above| above.iter().all(|&a| shared.supported_by[a].len() > 1))
            .count();
        Ok(safe.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: usize = (0..shared.supports.len()).map(|i| shared.chain_reaction(i)).sum();
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const EXAMPLE: &str = "\
1,0,1~1,2,1
0,0,2~2,0,2
0,2,3~2,2,3
0,0,4~0,2,4
2,0,5~2,2,5
0,1,6~2,1,6
1,1,8~1,1,9
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "5");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "7");
    }

    #[test]
    fn test_supports_after_settling() {
        let stack = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(stack.supports[0], vec![1, 2]);
        assert_eq!(stack.supported_by[3], vec![1, 2]);
        assert_eq!(stack.supported_by[6], vec![5]);
        assert_eq!(stack.chain_reaction(0), 6);
        assert_eq!(stack.chain_reaction(5), 1);
    }

    #[test]
    fn test_ground_level_rejected() {
        assert!(Solver::parse("0,0,0~0,0,1\n").is_err());
    }
}
