use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};

/// Rope-like puzzle: both parts walk the same moves, part 2 reuses the
/// visited count computed by part 1.
#[derive(Debug)]
struct Walk {
    moves: Vec<i32>,
    visited: Option<usize>,
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 3)]
struct WalkSolver;

impl AocParser for WalkSolver {
    type SharedData<'a> = Walk;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let moves = input
            .split(',')
            .map(|t| {
                t.trim()
                    .parse::<i32>()
                    .map_err(|_| ParseError::InvalidFormat(format!("bad move {t:?}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Walk {
            moves,
            visited: None,
        })
    }
}

fn visited(walk: &mut Walk) -> usize {
    *walk.visited.get_or_insert_with(|| {
        let mut seen = std::collections::HashSet::from([0i32]);
        let mut pos = 0;
        for step in &walk.moves {
            for _ in 0..step.abs() {
                pos += step.signum();
                seen.insert(pos);
            }
        }
        seen.len()
    })
}

impl PartSolver<1> for WalkSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(visited(shared).to_string())
    }
}

impl PartSolver<2> for WalkSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let end: i32 = shared.moves.iter().sum();
        Ok(format!("{}@{}", visited(shared), end))
    }
}

impl PartSolver<3> for WalkSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .visited
            .map(|v| (v * 2).to_string())
            .ok_or_else(|| SolveError::SolveFailed("part 1 has not run".into()))
    }
}

#[test]
fn test_parts_share_memoized_result() {
    let mut walk = WalkSolver::parse("3, -5, 1").unwrap();
    assert!(walk.visited.is_none());

    assert_eq!(<WalkSolver as Solver>::solve_part(&mut walk, 1).unwrap(), "6");
    assert_eq!(walk.visited, Some(6));
    assert_eq!(<WalkSolver as Solver>::solve_part(&mut walk, 2).unwrap(), "6@-1");
    assert_eq!(<WalkSolver as Solver>::solve_part(&mut walk, 3).unwrap(), "12");
}

#[test]
fn test_part_depending_on_earlier_part_fails_alone() {
    let mut walk = WalkSolver::parse("1").unwrap();
    let result = <WalkSolver as Solver>::solve_part(&mut walk, 3);
    assert!(matches!(result, Err(SolveError::SolveFailed(_))));
}

#[test]
fn test_parts_constant_matches_attribute() {
    assert_eq!(<WalkSolver as Solver>::PARTS, 3);
    let mut walk = WalkSolver::parse("1").unwrap();
    assert!(matches!(
        <WalkSolver as Solver>::solve_part(&mut walk, 4),
        Err(SolveError::PartNotImplemented(4))
    ));
}
