//! Memoized lazy evaluation of recurrences
//!
//! A [`DpProblem`] describes, for each index, which other indices it depends
//! on and how to combine their values. [`DpCache`] resolves dependencies on
//! demand and computes every index at most once.
//!
//! # Backends
//!
//! - [`VecBackend`]: dense `usize` indices, grows as needed
//! - [`Vec2DBackend`]: dense `(usize, usize)` indices with fixed bounds
//! - [`HashMapBackend`]: any hashable index
//!
//! # Warning: Cycle Behavior
//!
//! There is no cycle detection. A dependency cycle recurses until the stack
//! overflows, so dependencies must form a DAG.
//!
//! # Example
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, VecBackend};
//!
//! /// Ways to climb `n` stairs taking 1 or 2 steps at a time
//! struct Stairs;
//!
//! impl DpProblem<usize, u64> for Stairs {
//!     fn deps(&self, n: &usize) -> Vec<usize> {
//!         if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
//!     }
//!     fn compute(&self, _n: &usize, deps: Vec<u64>) -> u64 {
//!         if deps.is_empty() { 1 } else { deps[0] + deps[1] }
//!     }
//! }
//!
//! let cache = DpCache::new(VecBackend::new(), Stairs);
//! assert_eq!(cache.get(&10), 89);
//! ```
//!
//! # Example: closures
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{ClosureProblem, DpCache, HashMapBackend};
//!
//! let collatz = ClosureProblem::new(
//!     |n: &u64| if *n <= 1 { vec![] } else if n % 2 == 0 { vec![n / 2] } else { vec![3 * n + 1] },
//!     |_n: &u64, deps: Vec<u32>| deps.first().map_or(0, |d| d + 1),
//! );
//! let cache = DpCache::new(HashMapBackend::new(), collatz);
//! assert_eq!(cache.get(&27), 111);
//! ```

mod backend;
mod cache;
mod problem;

pub use backend::{Backend, HashMapBackend, Vec2DBackend, VecBackend};
pub use cache::DpCache;
pub use problem::{ClosureProblem, DpProblem};

#[cfg(test)]
mod tests;
