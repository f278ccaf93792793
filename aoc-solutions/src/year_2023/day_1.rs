//! Trebuchet?!

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 1, tags = ["string"])]
pub struct Solver;

const SPELLED: [&str; 9] = ["one", "two", "three", "four", "five", "six", "seven", "eight", "nine"];

/// Digit starting at byte `idx`, written as a numeral or, with `spelled`,
/// as an English word. Words may overlap, as in `eightwo`.
fn digit_at(line: &str, idx: usize, spelled: bool) -> Option<u32> {
    let rest = &line[idx..];
    let first = rest.chars().next()?;
    if let Some(d) = first.to_digit(10) {
        return Some(d);
    }
    if !spelled {
        return None;
    }
    SPELLED
        .iter()
        .position(|word| rest.starts_with(word))
        .map(|i| i as u32 + 1)
}

/// First digit times ten plus last digit
pub fn calibration_value(line: &str, spelled: bool) -> Option<u32> {
    let mut digits = line
        .char_indices()
        .filter_map(|(idx, _)| digit_at(line, idx, spelled));
    let first = digits.next()?;
    let last = digits.last().unwrap_or(first);
    Some(first * 10 + last)
}

fn total(lines: &[&str], spelled: bool) -> Result<u32, SolveError> {
    lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            calibration_value(line, spelled)
                .ok_or_else(|| SolveError::from(anyhow!("line {} has no digits: {line:?}", idx + 1)))
        })
        .sum()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines: Vec<_> = input.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if lines.is_empty() {
            return Err(ParseError::MissingData("no calibration lines".into()));
        }
        Ok(lines)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total(shared, false)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total(shared, true)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    #[test]
    fn test_part1_example() {
        let input = "1abc2\npqr3stu8vwx\na1b2c3d4e5f\ntreb7uchet\n";
        assert_eq!(solve::<Solver>(input, 1), "142");
    }

    #[test]
    fn test_part2_example() {
        let input = "\
two1nine
eightwothree
abcone2threexyz
xtwone3four
4nineeightseven2
zoneight234
7pqrstsixteen
";
        assert_eq!(solve::<Solver>(input, 2), "281");
    }

    #[test]
    fn test_overlapping_words() {
        assert_eq!(calibration_value("eightwo", true), Some(82));
        assert_eq!(calibration_value("oneight", true), Some(18));
        assert_eq!(calibration_value("eightwo", false), None);
        assert_eq!(calibration_value("zero7", true), Some(77));
    }

    #[test]
    fn test_line_without_digits_fails() {
        let mut lines = Solver::parse("abc\n").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut lines).is_err());
    }
}
