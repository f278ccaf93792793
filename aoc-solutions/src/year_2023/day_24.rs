//! Never Tell Me The Odds

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::anyhow;
use itertools::Itertools;
use rayon::prelude::*;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 24, tags = ["geometry", "math"])]
pub struct Solver;

const TEST_AREA: (i64, i64) = (200_000_000_000_000, 400_000_000_000_000);

/// Rock velocities searched per axis, both signs
const VELOCITY_RANGE: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hailstone {
    pos: [i64; 3],
    vel: [i64; 3],
}

/// Pairs of hailstones whose future xy paths cross inside `lo..=hi` on both axes
pub fn crossings_in_area(hail: &[Hailstone], lo: i64, hi: i64) -> usize {
    hail.iter()
        .tuple_combinations()
        .filter(|(a, b)| crosses_in_area(a, b, lo, hi))
        .count()
}

fn crosses_in_area(a: &Hailstone, b: &Hailstone, lo: i64, hi: i64) -> bool {
    let [ax, ay, _] = a.pos.map(i128::from);
    let [avx, avy, _] = a.vel.map(i128::from);
    let [bx, by, _] = b.pos.map(i128::from);
    let [bvx, bvy, _] = b.vel.map(i128::from);

    let det = avx * bvy - avy * bvx;
    if det == 0 {
        return false;
    }
    let (dx, dy) = (bx - ax, by - ay);
    // Crossing times of a and b, both scaled by det
    let (t, s) = (dx * bvy - dy * bvx, dx * avy - dy * avx);
    let (det, t, s) = if det < 0 { (-det, -t, -s) } else { (det, t, s) };
    if t < 0 || s < 0 {
        return false;
    }

    let area = i128::from(lo) * det..=i128::from(hi) * det;
    area.contains(&(ax * det + avx * t)) && area.contains(&(ay * det + avy * t))
}

/// Time at which `stone` meets `rock`, if ever
fn hit_time(rock: &Hailstone, stone: &Hailstone) -> Option<i128> {
    let mut time = None;
    for axis in 0..3 {
        let closing = i128::from(stone.vel[axis]) - i128::from(rock.vel[axis]);
        let gap = i128::from(rock.pos[axis]) - i128::from(stone.pos[axis]);
        if closing == 0 {
            if gap != 0 {
                return None;
            }
            continue;
        }
        if gap % closing != 0 {
            return None;
        }
        let t = gap / closing;
        if t < 0 || time.is_some_and(|prev| prev != t) {
            return None;
        }
        time = Some(t);
    }
    Some(time.unwrap_or(0))
}

/// The throw with xy velocity `(vx, vy)` that hits every hailstone, if any.
///
/// In the rock's frame all hailstones pass through its start point, so two
/// of them fix the xy start and their hit times fix the z motion.
fn throw_with(hail: &[Hailstone], vx: i64, vy: i64) -> Option<Hailstone> {
    let relative = |h: &Hailstone| (i128::from(h.vel[0] - vx), i128::from(h.vel[1] - vy));

    let a = hail.first()?;
    let (awx, awy) = relative(a);
    let (b, det) = hail[1..].iter().find_map(|b| {
        let (bwx, bwy) = relative(b);
        let det = awx * bwy - awy * bwx;
        (det != 0).then_some((b, det))
    })?;
    let (bwx, bwy) = relative(b);

    let [ax, ay, az] = a.pos.map(i128::from);
    let [bx, by, bz] = b.pos.map(i128::from);
    let (dx, dy) = (bx - ax, by - ay);
    let (t, s) = (dx * bwy - dy * bwx, dx * awy - dy * awx);
    if t % det != 0 || s % det != 0 {
        return None;
    }
    let (t, s) = (t / det, s / det);
    if t < 0 || s < 0 || t == s {
        return None;
    }

    let drift = (az + i128::from(a.vel[2]) * t) - (bz + i128::from(b.vel[2]) * s);
    if drift % (t - s) != 0 {
        return None;
    }
    let vz = drift / (t - s);
    let start = [
        ax + awx * t,
        ay + awy * t,
        az + (i128::from(a.vel[2]) - vz) * t,
    ];

    let rock = Hailstone {
        pos: [
            i64::try_from(start[0]).ok()?,
            i64::try_from(start[1]).ok()?,
            i64::try_from(start[2]).ok()?,
        ],
        vel: [vx, vy, i64::try_from(vz).ok()?],
    };
    hail.iter()
        .all(|stone| hit_time(&rock, stone).is_some())
        .then_some(rock)
}

/// The rock throw that hits every hailstone, searching small velocities
pub fn rock_throw(hail: &[Hailstone]) -> Option<Hailstone> {
    (-VELOCITY_RANGE..=VELOCITY_RANGE)
        .into_par_iter()
        .find_map_any(|vx| (-VELOCITY_RANGE..=VELOCITY_RANGE).find_map(|vy| throw_with(hail, vx, vy)))
}

fn parse_triple(s: &str) -> Option<[i64; 3]> {
    let (x, y, z) = s
        .split(',')
        .map(|v| v.trim().parse().ok())
        .collect_tuple()?;
    Some([x?, y?, z?])
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Hailstone>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let hail = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                line.split_once('@')
                    .and_then(|(pos, vel)| {
                        Some(Hailstone {
                            pos: parse_triple(pos)?,
                            vel: parse_triple(vel)?,
                        })
                    })
                    .ok_or_else(|| ParseError::at_line(line_idx, format!("bad hailstone {line:?}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if hail.len() < 3 {
            return Err(ParseError::MissingData("need at least three hailstones".into()));
        }
        Ok(hail)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(crossings_in_area(shared, TEST_AREA.0, TEST_AREA.1).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let rock = rock_throw(shared).ok_or_else(|| anyhow!("no rock throw hits every hailstone"))?;
        Ok(rock.pos.iter().map(|&c| i128::from(c)).sum::<i128>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const EXAMPLE: &str = "\
19, 13, 30 @ -2,  1, -2
18, 19, 22 @ -1, -1, -2
20, 25, 34 @ -2, -2, -4
12, 31, 28 @ -1, -2, -1
20, 19, 15 @  1, -5, -3
";

    #[test]
    fn test_crossings_in_example_area() {
        let hail = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(crossings_in_area(&hail, 7, 27), 2);
    }

    #[test]
    fn test_rock_throw() {
        let hail = Solver::parse(EXAMPLE).unwrap();
        let rock = rock_throw(&hail).unwrap();
        assert_eq!(rock.pos, [24, 13, 10]);
        assert_eq!(rock.vel, [-3, 1, 2]);
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "47");
    }

    #[test]
    fn test_hit_time() {
        let rock = Hailstone {
            pos: [24, 13, 10],
            vel: [-3, 1, 2],
        };
        let hail = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(hit_time(&rock, &hail[0]), Some(5));
        assert_eq!(hit_time(&rock, &hail[1]), Some(3));
    }

    #[test]
    fn test_parallel_paths_never_cross() {
        let a = Hailstone {
            pos: [0, 0, 0],
            vel: [1, 1, 0],
        };
        let b = Hailstone {
            pos: [0, 1, 0],
            vel: [2, 2, 0],
        };
        assert!(!crosses_in_area(&a, &b, -10, 10));
    }

    #[test]
    fn test_too_few_hailstones() {
        let err = Solver::parse("1, 2, 3 @ 1, 1, 1\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingData(_)));
    }
}
