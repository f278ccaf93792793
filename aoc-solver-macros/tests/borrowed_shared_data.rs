use aoc_solver::{
    AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder,
    register_solver,
};

/// Tuning-signal puzzle that keeps the input borrowed
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Marker;

impl AocParser for Marker {
    type SharedData<'a> = &'a [u8];

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseError::MissingData("empty signal".into()));
        }
        Ok(trimmed.as_bytes())
    }
}

fn first_distinct(signal: &[u8], len: usize) -> Result<String, SolveError> {
    signal
        .windows(len)
        .position(|w| (1..w.len()).all(|i| !w[..i].contains(&w[i])))
        .map(|i| (i + len).to_string())
        .ok_or_else(|| SolveError::SolveFailed("no marker".into()))
}

impl PartSolver<1> for Marker {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        first_distinct(shared, 4)
    }
}

impl PartSolver<2> for Marker {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        first_distinct(shared, 14)
    }
}

#[test]
fn test_borrowed_data_through_registry() {
    let mut builder = SolverRegistryBuilder::new();
    register_solver!(builder, Marker, 2022, 6);
    let registry = builder.build();

    let input = String::from("mjqjpqmgbljsphdztnvjfqwrcgsmlb\n");
    let mut solver = registry.create_solver(2022, 6, &input).unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "7");
    assert_eq!(solver.solve(2).unwrap().answer, "19");
}

#[test]
fn test_missing_marker_is_a_solve_failure() {
    let mut builder = SolverRegistryBuilder::new();
    register_solver!(builder, Marker, 2022, 6);
    let registry = builder.build();

    let mut solver = registry.create_solver(2022, 6, "aaaa").unwrap();
    assert!(matches!(solver.solve(1), Err(SolveError::SolveFailed(_))));
}
