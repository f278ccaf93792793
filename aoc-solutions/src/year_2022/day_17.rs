//! Pyroclastic Flow

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 17, tags = ["simulation", "cycle-detection"])]
pub struct Solver;

/// Rows of each rock, bottom first. Bit 6 is the leftmost column and every
/// rock starts two columns in from the left wall.
const ROCKS: [&[u8]; 5] = [
    &[0b0011110],
    &[0b0001000, 0b0011100, 0b0001000],
    &[0b0011100, 0b0000100, 0b0000100],
    &[0b0010000, 0b0010000, 0b0010000, 0b0010000],
    &[0b0011000, 0b0011000],
];

/// Rows from the top of the tower used to recognise a repeating state
const PROFILE_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jet {
    Left,
    Right,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Jet>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let jets = input
            .trim()
            .chars()
            .map(|c| match c {
                '<' => Ok(Jet::Left),
                '>' => Ok(Jet::Right),
                _ => Err(ParseError::InvalidFormat(format!("unexpected jet {c:?}"))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if jets.is_empty() {
            return Err(ParseError::MissingData("no jet pattern".into()));
        }
        Ok(jets)
    }
}

fn collides(chamber: &[u8], rock: &[u8], y: usize) -> bool {
    rock.iter()
        .enumerate()
        .any(|(i, row)| chamber.get(y + i).is_some_and(|c| c & row != 0))
}

fn shift(rock: &[u8], jet: Jet) -> Option<Vec<u8>> {
    match jet {
        Jet::Left if rock.iter().all(|r| r & 0b1000000 == 0) => Some(rock.iter().map(|r| r << 1).collect()),
        Jet::Right if rock.iter().all(|r| r & 1 == 0) => Some(rock.iter().map(|r| r >> 1).collect()),
        _ => None,
    }
}

/// Height of the tower after `count` rocks have come to rest.
///
/// Once the rock kind, jet position and top of the tower repeat, whole
/// cycles are skipped arithmetically.
pub fn tower_height(jets: &[Jet], count: u64) -> u64 {
    let mut chamber: Vec<u8> = Vec::new();
    let mut seen: HashMap<(usize, usize, [u8; PROFILE_DEPTH]), (u64, usize)> = HashMap::new();
    let mut skipped = None;
    let mut jet_idx = 0;
    let mut dropped = 0u64;

    while dropped < count {
        let mut rock = ROCKS[(dropped % ROCKS.len() as u64) as usize].to_vec();
        let mut y = chamber.len() + 3;

        loop {
            let jet = jets[jet_idx];
            jet_idx = (jet_idx + 1) % jets.len();
            if let Some(moved) = shift(&rock, jet)
                && !collides(&chamber, &moved, y)
            {
                rock = moved;
            }
            if y == 0 || collides(&chamber, &rock, y - 1) {
                break;
            }
            y -= 1;
        }

        for (i, row) in rock.iter().enumerate() {
            if chamber.len() <= y + i {
                chamber.resize(y + i + 1, 0);
            }
            chamber[y + i] |= row;
        }
        dropped += 1;

        if skipped.is_none() && chamber.len() >= PROFILE_DEPTH {
            let mut profile = [0u8; PROFILE_DEPTH];
            profile.copy_from_slice(&chamber[chamber.len() - PROFILE_DEPTH..]);
            let key = ((dropped % ROCKS.len() as u64) as usize, jet_idx, profile);

            if let Some(&(prev_dropped, prev_height)) = seen.get(&key) {
                let period = dropped - prev_dropped;
                let growth = (chamber.len() - prev_height) as u64;
                let cycles = (count - dropped) / period;
                tracing::debug!(period, growth, cycles, "tower cycle found");
                dropped += cycles * period;
                skipped = Some(cycles * growth);
            } else {
                seen.insert(key, (dropped, chamber.len()));
            }
        }
    }

    chamber.len() as u64 + skipped.unwrap_or(0)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tower_height(shared, 2022).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tower_height(shared, 1_000_000_000_000).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const EXAMPLE: &str = ">>><<><>><<<>><>>><<<>>><<<><<<>><>><<>>\n";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "3068");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "1514285714288");
    }

    #[test]
    fn test_first_rocks() {
        let jets = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(tower_height(&jets, 0), 0);
        assert_eq!(tower_height(&jets, 1), 1);
        assert_eq!(tower_height(&jets, 2), 4);
    }

    #[test]
    fn test_rejects_unknown_jet() {
        assert!(Solver::parse("<<>x").is_err());
    }
}
