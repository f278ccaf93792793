//! Hot Springs

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;

use crate::utils::dp_cache::{ClosureProblem, DpCache, Vec2DBackend};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 12, tags = ["dp", "parallel"])]
pub struct Solver;

const UNFOLD: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// `.`, `#` or `?` per spring
    springs: Vec<u8>,
    groups: Vec<usize>,
}

impl Record {
    fn unfold(&self) -> Record {
        let mut springs = self.springs.clone();
        for _ in 1..UNFOLD {
            springs.push(b'?');
            springs.extend_from_slice(&self.springs);
        }
        Record {
            springs,
            groups: self.groups.repeat(UNFOLD),
        }
    }

    /// Whether group `j` can be placed starting at spring `i`
    fn fits(&self, i: usize, j: usize) -> bool {
        let n = self.springs.len();
        let end = i + self.groups[j];
        end <= n && !self.springs[i..end].contains(&b'.') && self.springs.get(end) != Some(&b'#')
    }

    /// Ways to fill in the unknown springs consistently with the groups.
    ///
    /// `(i, j)` counts arrangements of `springs[i..]` holding exactly
    /// `groups[j..]`. A group placed at `i` also consumes the operational
    /// spring after it.
    pub fn arrangements(&self) -> u64 {
        let (n, m) = (self.springs.len(), self.groups.len());
        let deps = |&(i, j): &(usize, usize)| {
            let mut deps = Vec::with_capacity(2);
            if i < n {
                if self.springs[i] != b'#' {
                    deps.push((i + 1, j));
                }
                if self.springs[i] != b'.' && j < m && self.fits(i, j) {
                    deps.push((i + self.groups[j] + 1, j + 1));
                }
            }
            deps
        };
        let compute = |&(i, j): &(usize, usize), ways: Vec<u64>| {
            if i >= n { u64::from(j == m) } else { ways.iter().sum() }
        };

        let cache = DpCache::new(Vec2DBackend::new(n + 2, m + 1), ClosureProblem::new(deps, compute));
        cache.get(&(0, 0))
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Record>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                let (springs, groups) = line
                    .split_once(' ')
                    .ok_or_else(|| ParseError::at_line(line_idx, "expected `<springs> <groups>`"))?;
                if let Some(c) = springs.chars().find(|c| !matches!(c, '.' | '#' | '?')) {
                    return Err(ParseError::at_line(line_idx, format!("unexpected spring {c:?}")));
                }
                let groups = groups
                    .trim()
                    .split(',')
                    .map(str::parse)
                    .collect::<Result<Vec<usize>, _>>()
                    .map_err(|e| ParseError::at_line(line_idx, e))?;
                if groups.contains(&0) {
                    return Err(ParseError::at_line(line_idx, "groups must be non-empty"));
                }
                Ok(Record {
                    springs: springs.as_bytes().to_vec(),
                    groups,
                })
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(Record::arrangements).sum::<u64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared.par_iter().map(|r| r.unfold().arrangements()).sum();
        Ok(total.to_string())
    }
}
