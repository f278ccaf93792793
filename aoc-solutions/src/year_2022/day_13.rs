//! Distress Signal

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use serde_json::Value;
use std::cmp::Ordering;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 13, tags = ["parsing", "ordering"])]
pub struct Solver;

/// A packet value: an integer or a nested list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    Int(u64),
    List(Vec<Packet>),
}

impl TryFrom<Value> for Packet {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .map(Packet::Int)
                .ok_or_else(|| format!("{n} is not a non-negative integer")),
            Value::Array(items) => items
                .into_iter()
                .map(Packet::try_from)
                .collect::<Result<_, _>>()
                .map(Packet::List),
            other => Err(format!("unexpected packet value {other}")),
        }
    }
}

impl Ord for Packet {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Packet::Int(a), Packet::Int(b)) => a.cmp(b),
            (Packet::List(a), Packet::List(b)) => a.cmp(b),
            (Packet::Int(a), Packet::List(b)) => std::slice::from_ref(&Packet::Int(*a)).cmp(b.as_slice()),
            (Packet::List(a), Packet::Int(b)) => a.as_slice().cmp(std::slice::from_ref(&Packet::Int(*b))),
        }
    }
}

impl PartialOrd for Packet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Packet>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let packets = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                serde_json::from_str::<Value>(line)
                    .map_err(|e| e.to_string())
                    .and_then(Packet::try_from)
                    .map_err(|e| ParseError::at_line(line_idx, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if packets.len() % 2 != 0 {
            return Err(ParseError::InvalidFormat(format!(
                "{} packets cannot be split into pairs",
                packets.len()
            )));
        }
        Ok(packets)
    }
}

fn divider(n: u64) -> Packet {
    Packet::List(vec![Packet::List(vec![Packet::Int(n)])])
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: usize = shared
            .chunks_exact(2)
            .enumerate()
            .filter(|(_, pair)| pair[0] < pair[1])
            .map(|(idx, _)| idx + 1)
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // Only the divider positions matter, so count instead of sorting.
        let (two, six) = (divider(2), divider(6));
        let before_two = shared.iter().filter(|p| **p < two).count();
        let before_six = shared.iter().filter(|p| **p < six).count();
        Ok(((before_two + 1) * (before_six + 2)).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const EXAMPLE: &str = "\
[1,1,3,1,1]
[1,1,5,1,1]

[[1],[2,3,4]]
[[1],4]

[9]
[[8,7,6]]

[[4,4],4,4]
[[4,4],4,4,4]

[7,7,7,7]
[7,7,7]

[]
[3]

[[[]]]
[[]]

[1,[2,[3,[4,[5,6,7]]]],8,9]
[1,[2,[3,[4,[5,6,0]]]],8,9]
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "13");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "140");
    }

    #[test]
    fn test_mixed_comparison() {
        let parse = |s: &str| Packet::try_from(serde_json::from_str::<Value>(s).unwrap()).unwrap();
        assert!(parse("[[1],[2,3,4]]") < parse("[[1],4]"));
        assert!(parse("[9]") > parse("[[8,7,6]]"));
        assert_eq!(parse("[[2]]").cmp(&parse("[2]")), Ordering::Equal);
    }

    #[test]
    fn test_rejects_non_integer() {
        let err = Solver::parse("[1]\n[\"a\"]\n").unwrap_err();
        assert!(err.to_string().contains("(line 2)"), "{err}");
    }
}
