//! Rucksack Reorganization

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 3, tags = ["bitset"])]
pub struct Solver;

/// Set of item priorities, bit `p` set for priority `p`
type ItemSet = u64;

fn priority(item: u8) -> Option<u32> {
    match item {
        b'a'..=b'z' => Some((item - b'a' + 1) as u32),
        b'A'..=b'Z' => Some((item - b'A' + 27) as u32),
        _ => None,
    }
}

fn item_set(items: &[u8]) -> ItemSet {
    items
        .iter()
        .filter_map(|&i| priority(i))
        .fold(0, |set, p| set | 1 << p)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a [u8]>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .lines()
            .enumerate()
            .map(|(line_idx, line)| {
                let items = line.trim().as_bytes();
                if items.len() % 2 != 0 {
                    return Err(ParseError::at_line(line_idx, "odd number of items"));
                }
                if let Some(bad) = items.iter().find(|&&i| priority(i).is_none()) {
                    return Err(ParseError::at_line(line_idx, format!("invalid item {:?}", *bad as char)));
                }
                Ok(items)
            })
            .collect()
    }
}

/// The single priority present in `set`
fn only_priority(set: ItemSet) -> Result<u32, SolveError> {
    if set.count_ones() == 1 {
        Ok(set.trailing_zeros())
    } else {
        Err(anyhow!("expected exactly one common item, found {}", set.count_ones()).into())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total = shared.iter().try_fold(0u32, |acc, sack| {
            let (left, right) = sack.split_at(sack.len() / 2);
            Ok::<_, SolveError>(acc + only_priority(item_set(left) & item_set(right))?)
        })?;
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.len() % 3 != 0 {
            return Err(anyhow!("{} rucksacks can't be split into groups of three", shared.len()).into());
        }
        let total = shared.chunks(3).try_fold(0u32, |acc, group| {
            let common = group.iter().fold(!0, |set, sack| set & item_set(sack));
            Ok::<_, SolveError>(acc + only_priority(common)?)
        })?;
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const EXAMPLE: &str = "\
vJrwpWtwJgWrhcsFMMfFFhFp
jqHRNqRjqzjGDLGLrsFMfFZSrLrFZsSL
PmmdzqPrVvPwwTWBwg
wMqvLMZHhHMvwLHjbvcjnnSBnvTQFn
ttgJtRGJQctTZtZT
CrZsJsPPZsGzwwsLwLmpwMDw
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "157");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "70");
    }

    #[test]
    fn test_priorities() {
        assert_eq!(priority(b'a'), Some(1));
        assert_eq!(priority(b'z'), Some(26));
        assert_eq!(priority(b'A'), Some(27));
        assert_eq!(priority(b'Z'), Some(52));
        assert_eq!(priority(b'1'), None);
    }
}
