//! Beacon Exclusion Zone

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;
use regex::Regex;
use std::sync::LazyLock;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 15, tags = ["intervals", "parallel"])]
pub struct Solver;

const TARGET_ROW: i64 = 2_000_000;
const SEARCH_BOUND: i64 = 4_000_000;
const TUNING_FACTOR: i64 = 4_000_000;

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-?\d+").expect("number pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sensor {
    pos: (i64, i64),
    beacon: (i64, i64),
    radius: i64,
}

impl Sensor {
    /// Inclusive x-range this sensor covers on row `y`
    fn coverage(&self, y: i64) -> Option<(i64, i64)> {
        let reach = self.radius - (self.pos.1 - y).abs();
        (reach >= 0).then_some((self.pos.0 - reach, self.pos.0 + reach))
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Sensor>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                let nums = NUMBER_RE
                    .find_iter(line)
                    .map(|m| m.as_str().parse::<i64>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| ParseError::at_line(line_idx, e))?;
                let [sx, sy, bx, by] = nums[..] else {
                    return Err(ParseError::at_line(
                        line_idx,
                        format!("expected 4 coordinates, found {}", nums.len()),
                    ));
                };
                Ok(Sensor {
                    pos: (sx, sy),
                    beacon: (bx, by),
                    radius: (sx - bx).abs() + (sy - by).abs(),
                })
            })
            .collect()
    }
}

/// Sorted, merged coverage intervals on row `y`
fn merged_coverage(sensors: &[Sensor], y: i64) -> Vec<(i64, i64)> {
    let mut ranges: Vec<_> = sensors.iter().filter_map(|s| s.coverage(y)).collect();
    ranges.sort_unstable();

    let mut merged: Vec<(i64, i64)> = Vec::with_capacity(ranges.len());
    for (lo, hi) in ranges {
        match merged.last_mut() {
            Some(last) if lo <= last.1 + 1 => last.1 = last.1.max(hi),
            _ => merged.push((lo, hi)),
        }
    }
    merged
}

/// Positions on row `y` where no beacon can be
pub fn excluded_on_row(sensors: &[Sensor], y: i64) -> i64 {
    let covered: i64 = merged_coverage(sensors, y).iter().map(|(lo, hi)| hi - lo + 1).sum();
    let mut beacons: Vec<i64> = sensors
        .iter()
        .filter(|s| s.beacon.1 == y)
        .map(|s| s.beacon.0)
        .collect();
    beacons.sort_unstable();
    beacons.dedup();
    covered - beacons.len() as i64
}

/// The single uncovered position with both coordinates in `0..=bound`
pub fn distress_beacon(sensors: &[Sensor], bound: i64) -> Option<(i64, i64)> {
    (0..=bound).into_par_iter().find_map_any(|y| {
        let mut x = 0;
        for (lo, hi) in merged_coverage(sensors, y) {
            if lo > x {
                break;
            }
            x = x.max(hi + 1);
        }
        (x <= bound).then_some((x, y))
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(excluded_on_row(shared, TARGET_ROW).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (x, y) = distress_beacon(shared, SEARCH_BOUND)
            .ok_or_else(|| anyhow!("every position within 0..={SEARCH_BOUND} is covered"))?;
        Ok((x * TUNING_FACTOR + y).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
Sensor at x=2, y=18: closest beacon is at x=-2, y=15
Sensor at x=9, y=16: closest beacon is at x=10, y=16
Sensor at x=13, y=2: closest beacon is at x=15, y=3
Sensor at x=12, y=14: closest beacon is at x=10, y=16
Sensor at x=10, y=20: closest beacon is at x=10, y=16
Sensor at x=14, y=17: closest beacon is at x=10, y=16
Sensor at x=8, y=7: closest beacon is at x=2, y=10
Sensor at x=2, y=0: closest beacon is at x=2, y=10
Sensor at x=0, y=11: closest beacon is at x=2, y=10
Sensor at x=20, y=14: closest beacon is at x=25, y=17
Sensor at x=17, y=20: closest beacon is at x=21, y=22
Sensor at x=16, y=7: closest beacon is at x=15, y=3
Sensor at x=14, y=3: closest beacon is at x=15, y=3
Sensor at x=20, y=1: closest beacon is at x=15, y=3
";

    #[test]
    fn test_example_row() {
        let sensors = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(excluded_on_row(&sensors, 10), 26);
    }

    #[test]
    fn test_example_distress_beacon() {
        let sensors = Solver::parse(EXAMPLE).unwrap();
        let (x, y) = distress_beacon(&sensors, 20).unwrap();
        assert_eq!((x, y), (14, 11));
        assert_eq!(x * TUNING_FACTOR + y, 56000011);
    }

    #[test]
    fn test_parse_line_error() {
        let err = Solver::parse("Sensor at x=1, y=2: nothing here\n").unwrap_err();
        assert!(err.to_string().contains("(line 1)"), "{err}");
    }
}
