//! Plugin-based registration through `AutoRegisterSolver`

use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, RegistrationError,
    SolveError, SolverError, SolverRegistryBuilder,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2030, day = 1, tags = ["test", "sum"])]
struct SumLines;

impl AocParser for SumLines {
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .enumerate()
            .map(|(i, l)| l.trim().parse().map_err(|e| ParseError::at_line(i, e)))
            .collect()
    }
}

impl PartSolver<1> for SumLines {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i64>().to_string())
    }
}

impl PartSolver<2> for SumLines {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .max()
            .map(|m| m.to_string())
            .ok_or_else(|| anyhow::anyhow!("no lines").into())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2030, day = 2, tags = ["test"])]
struct CountChars;

impl AocParser for CountChars {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for CountChars {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.chars().filter(|c| !c.is_whitespace()).count().to_string())
    }
}

fn test_registry() -> aoc_solver::SolverRegistry {
    SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"test"))
        .unwrap()
        .build()
}

#[test]
fn plugins_register_with_parts_from_derive() {
    let registry = test_registry();
    let info: Vec<_> = registry
        .storage()
        .iter_info()
        .map(|i| (i.year, i.day, i.parts))
        .collect();
    assert_eq!(info, vec![(2030, 1, 2), (2030, 2, 1)]);
}

#[test]
fn tag_filter_selects_subset() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"sum"))
        .unwrap()
        .build();
    assert!(registry.storage().contains(2030, 1));
    assert!(!registry.storage().contains(2030, 2));
}

#[test]
fn registered_solver_runs_all_parts() {
    let registry = test_registry();
    let mut solver = registry.create_solver(2030, 1, "3\n-1\n10").unwrap();
    assert_eq!(solver.parts(), 2);
    assert_eq!(solver.solve(1).unwrap().answer, "12");
    assert_eq!(solver.solve(2).unwrap().answer, "10");
    assert!(matches!(solver.solve(3), Err(SolveError::PartOutOfRange(3))));
}

#[test]
fn solve_failure_is_reported() {
    let registry = test_registry();
    let mut solver = registry.create_solver(2030, 1, "").unwrap();
    assert!(matches!(solver.solve(2), Err(SolveError::SolveFailed(_))));
}

#[test]
fn parse_error_carries_line_number() {
    let registry = test_registry();
    let err = registry.create_solver(2030, 1, "1\n2\nthree").err().unwrap();
    match err {
        SolverError::ParseError(ParseError::InvalidFormat(msg)) => {
            assert!(msg.starts_with("(line 3)"), "{msg}")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn registering_plugins_twice_is_a_duplicate() {
    let builder = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.year == 2030)
        .unwrap();
    let result = builder.register_solver_plugins(|plugin| plugin.year == 2030);
    assert!(matches!(result, Err(RegistrationError::DuplicateSolver(2030, _))));
}
