//! Property tests for part dispatch through the derived `Solver` impl

use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver, SolverExt};
use proptest::prelude::*;

/// Rucksack-like solver: part 1 counts items, part 2 finds the largest one
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Items;

impl AocParser for Items {
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| {
                l.parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("not a number: {l}")))
            })
            .collect()
    }
}

impl PartSolver<1> for Items {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

impl PartSolver<2> for Items {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().max().copied().unwrap_or_default().to_string())
    }
}

/// Single-part solver whose const generic sets the part count
struct Fixed<const N: u8>;

impl<const N: u8> AocParser for Fixed<N> {
    type SharedData<'a> = ();

    fn parse(_input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(())
    }
}

impl<const N: u8> Solver for Fixed<N> {
    const PARTS: u8 = N;

    fn solve_part(_shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
        Ok(format!("part{part}"))
    }
}

fn join(numbers: &[u32]) -> String {
    numbers.iter().map(u32::to_string).collect::<Vec<_>>().join("\n")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn derived_dispatch_matches_part_solver(numbers in prop::collection::vec(0u32..1000, 1..20), part in 1u8..=2) {
        let input = join(&numbers);
        let mut via_solver = Items::parse(&input).unwrap();
        let mut direct = Items::parse(&input).unwrap();

        let dispatched = <Items as Solver>::solve_part(&mut via_solver, part).unwrap();
        let expected = match part {
            1 => <Items as PartSolver<1>>::solve(&mut direct).unwrap(),
            _ => <Items as PartSolver<2>>::solve(&mut direct).unwrap(),
        };
        prop_assert_eq!(dispatched, expected);
    }

    #[test]
    fn derived_dispatch_rejects_unknown_parts(part in prop_oneof![Just(0u8), 3u8..=255]) {
        let mut shared = Items::parse("1\n2").unwrap();
        match <Items as Solver>::solve_part(&mut shared, part) {
            Err(SolveError::PartNotImplemented(p)) => prop_assert_eq!(p, part),
            other => prop_assert!(false, "expected PartNotImplemented, got {:?}", other),
        }
    }

    #[test]
    fn checked_range_rejects_outside_parts(part in 0u8..=255) {
        let mut shared = ();
        let one = Fixed::<1>::solve_part_checked_range(&mut shared, part);
        let three = Fixed::<3>::solve_part_checked_range(&mut shared, part);

        for (result, max) in [(one, 1u8), (three, 3u8)] {
            if (1..=max).contains(&part) {
                prop_assert_eq!(result.unwrap(), format!("part{part}"));
            } else {
                prop_assert!(matches!(result, Err(SolveError::PartOutOfRange(p)) if p == part));
            }
        }
    }
}

#[test]
fn parts_constant_comes_from_attribute() {
    assert_eq!(<Items as Solver>::PARTS, 2);
}

#[test]
fn parse_error_surfaces_offending_line() {
    let err = Items::parse("4\nx7").unwrap_err();
    assert_eq!(err.to_string(), "Invalid format: not a number: x7");
}
