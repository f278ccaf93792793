//! Solver registry for managing and creating solver instances

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};
use crate::solver::Solver;

// ============================================================================
// Storage Constants and Index Calculation
// ============================================================================

/// First Advent of Code year
pub const BASE_YEAR: u16 = 2015;
/// Number of years the storage covers (2015-2034)
pub const MAX_YEARS: usize = 20;
pub const DAYS_PER_YEAR: usize = 25;
/// Total capacity of the flat storage
pub const CAPACITY: usize = MAX_YEARS * DAYS_PER_YEAR;

/// Flat index for year/day, `None` when out of bounds
#[inline]
pub fn calc_index(year: u16, day: u8) -> Option<usize> {
    if year < BASE_YEAR || year >= BASE_YEAR + MAX_YEARS as u16 {
        return None;
    }
    if day == 0 || day > DAYS_PER_YEAR as u8 {
        return None;
    }
    let y = (year - BASE_YEAR) as usize;
    let d = (day - 1) as usize;
    Some(y * DAYS_PER_YEAR + d)
}

/// Inverse of [`calc_index`]
#[inline]
pub fn from_index(index: usize) -> (u16, u8) {
    let year = BASE_YEAR + (index / DAYS_PER_YEAR) as u16;
    let day = (index % DAYS_PER_YEAR) as u8 + 1;
    (year, day)
}

// ============================================================================
// Factory Types
// ============================================================================

/// Thread-safe factory that parses an input and returns a ready solver
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

/// Metadata about a registered solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryInfo {
    pub year: u16,
    pub day: u8,
    /// Number of parts this solver supports
    pub parts: u8,
}

struct SolverFactoryEntry {
    factory: SolverFactory,
    parts: u8,
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for an immutable [`SolverRegistry`].
///
/// Rejects duplicate and out-of-range registrations.
///
/// ```
/// use aoc_solver::SolverRegistryBuilder;
///
/// let registry = SolverRegistryBuilder::new()
///     .register_solver_plugins(|plugin| plugin.year == 2022)
///     .unwrap()
///     .build();
/// assert!(registry.storage().iter_info().all(|info| info.year == 2022));
/// ```
pub struct SolverRegistryBuilder {
    entries: Vec<Option<SolverFactoryEntry>>,
}

impl SolverRegistryBuilder {
    /// Create an empty builder with pre-allocated storage
    pub fn new() -> Self {
        Self {
            entries: (0..CAPACITY).map(|_| None).collect(),
        }
    }

    /// Register a factory for `year`/`day` producing a solver with `parts` parts
    pub fn register<F>(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        let index = calc_index(year, day).ok_or(RegistrationError::InvalidYearDay(year, day))?;

        if self.entries[index].is_some() {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }

        tracing::debug!(year, day, parts, "registered solver");
        self.entries[index] = Some(SolverFactoryEntry {
            factory: Box::new(factory),
            parts,
        });
        Ok(self)
    }

    /// Register every plugin submitted through `inventory`
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solver_plugins(|_| true)
    }

    /// Register the plugins for which `filter` returns `true`
    ///
    /// ```no_run
    /// use aoc_solver::SolverRegistryBuilder;
    ///
    /// let registry = SolverRegistryBuilder::new()
    ///     .register_solver_plugins(|plugin| plugin.tags.contains(&"grid"))
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_solver_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        for plugin in inventory::iter::<SolverPlugin>() {
            if filter(plugin) {
                self = plugin.solver.register_with(self, plugin.year, plugin.day)?;
            }
        }
        Ok(self)
    }

    /// Finish registration
    pub fn build(self) -> SolverRegistry {
        let storage = SolverFactoryStorage {
            entries: self.entries,
        };
        tracing::debug!(solvers = storage.len(), "solver registry built");
        SolverRegistry { storage }
    }
}

impl Default for SolverRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Flat Vec Storage
// ============================================================================

/// Read-only view of the registered factories with O(1) lookup
pub struct SolverFactoryStorage {
    entries: Vec<Option<SolverFactoryEntry>>,
}

impl SolverFactoryStorage {
    /// Metadata for all registered solvers, ordered by year then day
    pub fn iter_info(&self) -> impl Iterator<Item = FactoryInfo> + '_ {
        self.entries.iter().enumerate().filter_map(|(i, entry)| {
            entry.as_ref().map(|e| {
                let (year, day) = from_index(i);
                FactoryInfo {
                    year,
                    day,
                    parts: e.parts,
                }
            })
        })
    }

    pub fn get_info(&self, year: u16, day: u8) -> Option<FactoryInfo> {
        calc_index(year, day)
            .and_then(|i| self.entries.get(i)?.as_ref())
            .map(|e| FactoryInfo {
                year,
                day,
                parts: e.parts,
            })
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.get_info(year, day).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| e.is_none())
    }
}

/// Immutable registry of solver factories
pub struct SolverRegistry {
    storage: SolverFactoryStorage,
}

impl SolverRegistry {
    /// Read-only access for iteration and lookup
    pub fn storage(&self) -> &SolverFactoryStorage {
        &self.storage
    }

    /// Parse `input` with the solver registered for `year`/`day`
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        let index = calc_index(year, day).ok_or(SolverError::InvalidYearDay(year, day))?;

        let entry = self
            .storage
            .entries
            .get(index)
            .and_then(|e| e.as_ref())
            .ok_or(SolverError::NotFound(year, day))?;

        tracing::debug!(year, day, input_len = input.len(), "creating solver");
        (entry.factory)(input).map_err(SolverError::ParseError)
    }
}

// ============================================================================
// Plugins
// ============================================================================

/// Object-safe registration hook, so solvers of different types can sit in
/// one plugin collection.
///
/// Blanket-implemented for every `Solver + Sync + 'static`.
pub trait RegisterableSolver: Sync {
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError>;

    /// Number of parts the solver supports
    fn parts(&self) -> u8;
}

impl<S> RegisterableSolver for S
where
    S: Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError> {
        builder.register(year, day, S::PARTS, move |input: &str| {
            let instance = SolverInstance::<S>::new(year, day, input)?;
            Ok(Box::new(instance) as Box<dyn DynSolver + '_>)
        })
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

/// A solver submitted for automatic registration.
///
/// Normally produced by `#[derive(AutoRegisterSolver)]`, which expands to
/// an `inventory::submit!` of this struct.
pub struct SolverPlugin {
    pub year: u16,
    pub day: u8,
    /// The solver (type-erased)
    pub solver: &'static dyn RegisterableSolver,
    /// Free-form labels for filtering, e.g. `"grid"` or `"graph"`
    pub tags: &'static [&'static str],
}

inventory::collect!(SolverPlugin);

/// Register solver type `$solver` with a builder variable, panicking on
/// a duplicate or invalid key.
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver, SolverRegistryBuilder, register_solver};
///
/// struct Echo;
///
/// impl AocParser for Echo {
///     type SharedData<'a> = &'a str;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input.trim())
///     }
/// }
///
/// impl Solver for Echo {
///     const PARTS: u8 = 1;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, _part: u8) -> Result<String, SolveError> {
///         Ok(shared.to_string())
///     }
/// }
///
/// let mut builder = SolverRegistryBuilder::new();
/// register_solver!(builder, Echo, 2022, 1);
/// let registry = builder.build();
///
/// let mut solver = registry.create_solver(2022, 1, " hi ").unwrap();
/// assert_eq!(solver.solve(1).unwrap().answer, "hi");
/// ```
#[macro_export]
macro_rules! register_solver {
    ($builder:expr, $solver:ty, $year:expr, $day:expr) => {
        let (year, day): (u16, u8) = ($year, $day);
        $builder = $builder
            .register(
                year,
                day,
                <$solver as $crate::Solver>::PARTS,
                move |input: &str| {
                    let instance = $crate::SolverInstance::<$solver>::new(year, day, input)?;
                    Ok(Box::new(instance) as Box<dyn $crate::DynSolver + '_>)
                },
            )
            .expect("Failed to register solver");
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolveError;
    use crate::solver::AocParser;
    use proptest::prelude::*;

    struct Sum;

    impl AocParser for Sum {
        type SharedData<'a> = Vec<i64>;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            input
                .split_whitespace()
                .map(|t| t.parse().map_err(|_| ParseError::InvalidFormat(t.to_string())))
                .collect()
        }
    }

    impl Solver for Sum {
        const PARTS: u8 = 1;

        fn solve_part(shared: &mut Self::SharedData<'_>, _part: u8) -> Result<String, SolveError> {
            Ok(shared.iter().sum::<i64>().to_string())
        }
    }

    #[test]
    fn test_register_and_create() {
        let registry = Sum.register_with(SolverRegistryBuilder::new(), 2022, 1).unwrap().build();

        let mut solver = registry.create_solver(2022, 1, "1 2 3").unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "6");
        assert_eq!(
            registry.storage().get_info(2022, 1),
            Some(FactoryInfo { year: 2022, day: 1, parts: 1 })
        );
        assert_eq!(registry.storage().len(), 1);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let builder = Sum.register_with(SolverRegistryBuilder::new(), 2023, 5).unwrap();
        let result = Sum.register_with(builder, 2023, 5);
        assert!(matches!(result, Err(RegistrationError::DuplicateSolver(2023, 5))));
    }

    #[test]
    fn test_out_of_range_registration_rejected() {
        let result = Sum.register_with(SolverRegistryBuilder::new(), 2014, 1);
        assert!(matches!(result, Err(RegistrationError::InvalidYearDay(2014, 1))));
        let result = Sum.register_with(SolverRegistryBuilder::new(), 2022, 26);
        assert!(matches!(result, Err(RegistrationError::InvalidYearDay(2022, 26))));
    }

    #[test]
    fn test_create_solver_errors() {
        let registry = Sum.register_with(SolverRegistryBuilder::new(), 2022, 1).unwrap().build();
        assert!(matches!(
            registry.create_solver(2022, 2, ""),
            Err(SolverError::NotFound(2022, 2))
        ));
        assert!(matches!(
            registry.create_solver(2022, 0, ""),
            Err(SolverError::InvalidYearDay(2022, 0))
        ));
        assert!(matches!(
            registry.create_solver(2022, 1, "1 x"),
            Err(SolverError::ParseError(ParseError::InvalidFormat(_)))
        ));
    }

    #[test]
    fn test_iter_info_is_ordered() {
        let builder = SolverRegistryBuilder::new();
        let builder = Sum.register_with(builder, 2023, 3).unwrap();
        let builder = Sum.register_with(builder, 2022, 17).unwrap();
        let builder = Sum.register_with(builder, 2022, 2).unwrap();
        let registry = builder.build();

        let keys: Vec<_> = registry.storage().iter_info().map(|i| (i.year, i.day)).collect();
        assert_eq!(keys, vec![(2022, 2), (2022, 17), (2023, 3)]);
    }

    proptest! {
        #[test]
        fn prop_index_roundtrip(year in BASE_YEAR..BASE_YEAR + MAX_YEARS as u16, day in 1u8..=25) {
            let index = calc_index(year, day).unwrap();
            prop_assert!(index < CAPACITY);
            prop_assert_eq!(from_index(index), (year, day));
        }

        #[test]
        fn prop_out_of_range_day_has_no_index(year in 2015u16..2035, day in 26u8..=255) {
            prop_assert!(calc_index(year, day).is_none());
            prop_assert!(calc_index(year, 0).is_none());
        }
    }
}
