//! Supply Stacks

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 5, tags = ["parsing", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    count: usize,
    from: usize,
    to: usize,
}

#[derive(Debug, Clone)]
pub struct SharedData {
    /// Bottom crate first
    stacks: Vec<Vec<u8>>,
    moves: Vec<Move>,
}

fn parse_drawing(drawing: &str) -> Result<Vec<Vec<u8>>, ParseError> {
    let mut lines: Vec<&str> = drawing.lines().collect();
    let labels = lines
        .pop()
        .ok_or_else(|| ParseError::MissingData("empty crate drawing".into()))?;
    let count = labels.split_whitespace().count();
    if count == 0 {
        return Err(ParseError::MissingData("no stack labels".into()));
    }

    let mut stacks = vec![Vec::new(); count];
    for (line_idx, line) in lines.iter().enumerate().rev() {
        let bytes = line.as_bytes();
        for (i, stack) in stacks.iter_mut().enumerate() {
            match bytes.get(4 * i + 1) {
                Some(b' ') | None => {}
                Some(&c) if c.is_ascii_uppercase() => stack.push(c),
                Some(&c) => {
                    return Err(ParseError::at_line(line_idx, format!("unexpected crate {:?}", c as char)));
                }
            }
        }
    }
    Ok(stacks)
}

fn parse_move(line: &str, stacks: usize) -> Result<Move, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [_, count, _, from, _, to] = fields[..] else {
        return Err(format!("expected `move n from a to b`, got {line:?}"));
    };
    let num = |s: &str| s.parse::<usize>().map_err(|e| e.to_string());
    let (count, from, to) = (num(count)?, num(from)?, num(to)?);
    if !(1..=stacks).contains(&from) || !(1..=stacks).contains(&to) {
        return Err(format!("stack out of range in {line:?}"));
    }
    Ok(Move {
        count,
        from: from - 1,
        to: to - 1,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let input = input.replace("\r\n", "\n");
        let (drawing, procedure) = input
            .split_once("\n\n")
            .ok_or_else(|| ParseError::MissingData("blank line between drawing and moves".into()))?;
        let stacks = parse_drawing(drawing)?;
        let offset = drawing.lines().count() + 1;
        let moves = procedure
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| parse_move(line, stacks.len()).map_err(|e| ParseError::at_line(offset + i, e)))
            .collect::<Result<_, _>>()?;
        Ok(SharedData { stacks, moves })
    }
}

/// Run the procedure, moving `count` crates one at a time or all at once
fn rearrange(shared: &SharedData, keep_order: bool) -> Result<String, SolveError> {
    let mut stacks = shared.stacks.clone();
    for m in &shared.moves {
        let from = &mut stacks[m.from];
        let split = from
            .len()
            .checked_sub(m.count)
            .ok_or_else(|| anyhow!("cannot move {} crates from a stack of {}", m.count, from.len()))?;
        let mut moved = from.split_off(split);
        if !keep_order {
            moved.reverse();
        }
        stacks[m.to].extend(moved);
    }
    Ok(stacks
        .iter()
        .filter_map(|s| s.last().map(|&c| c as char))
        .collect())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        rearrange(shared, false)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        rearrange(shared, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const EXAMPLE: &str = "    [D]    \n[N] [C]    \n[Z] [M] [P]\n 1   2   3 \n\nmove 1 from 2 to 1\nmove 3 from 1 to 3\nmove 2 from 2 to 1\nmove 1 from 1 to 2\n";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "CMZ");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "MCD");
    }

    #[test]
    fn test_drawing_without_trailing_spaces() {
        let shared = Solver::parse("    [D]\n[N] [C]\n[Z] [M] [P]\n 1   2   3\n\nmove 1 from 2 to 1\n").unwrap();
        assert_eq!(shared.stacks, vec![b"ZN".to_vec(), b"MCD".to_vec(), b"P".to_vec()]);
        assert_eq!(shared.moves, vec![Move { count: 1, from: 1, to: 0 }]);
    }

    #[test]
    fn test_overdrawn_stack_fails() {
        let mut shared = Solver::parse("[A]\n 1 \n\nmove 2 from 1 to 1\n").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut shared).is_err());
    }

    #[test]
    fn test_bad_stack_number() {
        let err = Solver::parse("[A]\n 1 \n\nmove 1 from 1 to 4\n").unwrap_err();
        assert!(err.to_string().contains("(line 4)"), "{err}");
    }
}
