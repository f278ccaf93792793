//! Advent of Code puzzle solutions with automatic registration
//!
//! Solutions are organized by year. Each one derives `AutoRegisterSolver`, so
//! linking this crate is enough to make it available to a
//! `SolverRegistryBuilder::register_all_plugins` call.

pub mod utils;

#[cfg(feature = "year-2022")]
pub mod year_2022;

#[cfg(feature = "year-2023")]
pub mod year_2023;

#[cfg(test)]
pub(crate) mod test_support {
    use aoc_solver::{Solver, SolverExt};

    /// Parse `input` and solve `part`, panicking on any error
    pub fn solve<S: Solver>(input: &str, part: u8) -> String {
        let mut shared = S::parse(input).unwrap_or_else(|e| panic!("parse failed: {e}"));
        S::solve_part_checked_range(&mut shared, part)
            .unwrap_or_else(|e| panic!("part {part} failed: {e}"))
    }
}
