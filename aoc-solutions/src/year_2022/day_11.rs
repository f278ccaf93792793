//! Monkey in the Middle

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;
use std::sync::LazyLock;

use crate::utils::math::lcm;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 11, tags = ["simulation", "modular"])]
pub struct Solver;

static MONKEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"Monkey (\d+):\s+Starting items:([\d, ]*)\s+Operation: new = old ([*+]) (old|\d+)\s+Test: divisible by (\d+)\s+If true: throw to monkey (\d+)\s+If false: throw to monkey (\d+)",
    )
    .expect("monkey pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add(u64),
    Mul(u64),
    Square,
}

impl Operation {
    fn apply(self, old: u64) -> Option<u64> {
        match self {
            Operation::Add(v) => old.checked_add(v),
            Operation::Mul(v) => old.checked_mul(v),
            Operation::Square => old.checked_mul(old),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Monkey {
    items: Vec<u64>,
    operation: Operation,
    divisor: u64,
    /// Targets when the test passes and fails
    targets: (usize, usize),
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Monkey>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let num = |s: &str| s.parse::<u64>().map_err(|e| ParseError::InvalidFormat(e.to_string()));

        let monkeys = MONKEY_RE
            .captures_iter(input)
            .enumerate()
            .map(|(idx, caps)| {
                if num(&caps[1])? != idx as u64 {
                    return Err(ParseError::InvalidFormat(format!("monkey {} out of order", &caps[1])));
                }
                let items = caps[2]
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(num)
                    .collect::<Result<Vec<_>, _>>()?;
                let operation = match (&caps[3], &caps[4]) {
                    ("*", "old") => Operation::Square,
                    ("*", v) => Operation::Mul(num(v)?),
                    (_, "old") => {
                        return Err(ParseError::InvalidFormat("`old + old` is not supported".into()));
                    }
                    (_, v) => Operation::Add(num(v)?),
                };
                let divisor = num(&caps[5])?;
                if divisor == 0 {
                    return Err(ParseError::InvalidFormat(format!("monkey {idx} divides by zero")));
                }
                Ok(Monkey {
                    items,
                    operation,
                    divisor,
                    targets: (num(&caps[6])? as usize, num(&caps[7])? as usize),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if monkeys.is_empty() {
            return Err(ParseError::MissingData("no monkeys".into()));
        }
        if let Some((idx, _)) = monkeys.iter().enumerate().find(|(idx, m)| {
            let (t, f) = m.targets;
            t >= monkeys.len() || f >= monkeys.len() || t == *idx || f == *idx
        }) {
            return Err(ParseError::InvalidFormat(format!("monkey {idx} throws to an invalid target")));
        }
        Ok(monkeys)
    }
}

/// Product of the two largest inspection counts after `rounds` rounds.
///
/// With `relief`, worry is divided by three after every inspection;
/// otherwise it is kept modulo the common multiple of all divisors.
pub fn monkey_business(monkeys: &[Monkey], rounds: usize, relief: bool) -> Result<u64, SolveError> {
    let mut monkeys = monkeys.to_vec();
    let modulus = monkeys.iter().map(|m| m.divisor).fold(1, lcm);
    let mut inspected = vec![0u64; monkeys.len()];

    for _ in 0..rounds {
        for i in 0..monkeys.len() {
            let items = std::mem::take(&mut monkeys[i].items);
            let Monkey {
                operation,
                divisor,
                targets,
                ..
            } = monkeys[i];
            inspected[i] += items.len() as u64;

            for item in items {
                let worry = operation
                    .apply(item)
                    .ok_or_else(|| anyhow!("worry level overflowed inspecting {item}"))?;
                let worry = if relief { worry / 3 } else { worry % modulus };
                let target = if worry % divisor == 0 { targets.0 } else { targets.1 };
                monkeys[target].items.push(worry);
            }
        }
    }

    inspected.sort_unstable_by(|a, b| b.cmp(a));
    Ok(inspected.iter().take(2).product())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(monkey_business(shared, 20, true)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(monkey_business(shared, 10_000, false)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const EXAMPLE: &str = "\
Monkey 0:
  Starting items: 79, 98
  Operation: new = old * 19
  Test: divisible by 23
    If true: throw to monkey 2
    If false: throw to monkey 3

Monkey 1:
  Starting items: 54, 65, 75, 74
  Operation: new = old + 6
  Test: divisible by 19
    If true: throw to monkey 2
    If false: throw to monkey 0

Monkey 2:
  Starting items: 79, 60, 97
  Operation: new = old * old
  Test: divisible by 13
    If true: throw to monkey 1
    If false: throw to monkey 3

Monkey 3:
  Starting items: 74
  Operation: new = old + 3
  Test: divisible by 17
    If true: throw to monkey 0
    If false: throw to monkey 1
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "10605");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "2713310158");
    }

    #[test]
    fn test_parse_operations() {
        let monkeys = Solver::parse(EXAMPLE).unwrap();
        let ops: Vec<_> = monkeys.iter().map(|m| m.operation).collect();
        assert_eq!(
            ops,
            vec![Operation::Mul(19), Operation::Add(6), Operation::Square, Operation::Add(3)]
        );
        assert_eq!(monkeys[1].items, vec![54, 65, 75, 74]);
    }

    #[test]
    fn test_one_round_without_relief() {
        let monkeys = Solver::parse(EXAMPLE).unwrap();
        // inspections after round 1: 2, 4, 3, 6
        assert_eq!(monkey_business(&monkeys, 1, false).unwrap(), 24);
    }

    #[test]
    fn test_self_target_rejected() {
        let input = EXAMPLE.replace("If true: throw to monkey 2", "If true: throw to monkey 0");
        assert!(Solver::parse(&input).is_err());
    }
}
