//! Tests for the DP cache module.

use std::cell::Cell;
use std::rc::Rc;

use super::*;

struct Fibonacci;

impl DpProblem<usize, u64> for Fibonacci {
    fn deps(&self, n: &usize) -> Vec<usize> {
        if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
    }

    fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
        if *n <= 1 { *n as u64 } else { deps[0] + deps[1] }
    }
}

#[test]
fn test_fibonacci_linear_dependency_chain() {
    let cache = DpCache::new(VecBackend::new(), Fibonacci);

    assert_eq!(cache.get(&0), 0);
    assert_eq!(cache.get(&1), 1);
    assert_eq!(cache.get(&10), 55);
    assert_eq!(cache.get(&90), 2_880_067_194_370_816_120);
}

#[test]
fn test_diamond_dependency_computed_once() {
    // 0 depends on 1 and 2, both depend on 3
    let computed = Rc::new(Cell::new(0));
    let counter = computed.clone();
    let diamond = ClosureProblem::new(
        |n: &usize| match n {
            0 => vec![1, 2],
            1 | 2 => vec![3],
            _ => vec![],
        },
        move |n: &usize, deps: Vec<u32>| {
            if *n == 3 {
                counter.set(counter.get() + 1);
            }
            deps.iter().sum::<u32>().max(1)
        },
    );

    let cache = DpCache::new(HashMapBackend::new(), diamond);
    assert_eq!(cache.get(&0), 2);
    assert_eq!(cache.get(&0), 2);
    assert_eq!(computed.get(), 1);
}

#[test]
fn test_grid_paths_with_2d_backend() {
    let paths = ClosureProblem::new(
        |&(r, c): &(usize, usize)| match (r, c) {
            (0, 0) => vec![],
            (0, c) => vec![(0, c - 1)],
            (r, 0) => vec![(r - 1, 0)],
            (r, c) => vec![(r - 1, c), (r, c - 1)],
        },
        |_: &(usize, usize), deps: Vec<u64>| if deps.is_empty() { 1 } else { deps.iter().sum() },
    );

    let cache = DpCache::new(Vec2DBackend::new(5, 5), paths);
    assert_eq!(cache.get(&(4, 4)), 70);
    assert_eq!(cache.get(&(2, 2)), 6);
}

#[test]
fn test_vec_backend_sparse_inserts() {
    let mut backend = VecBackend::new();
    backend.insert(5, "five");
    assert_eq!(backend.get(&5), Some(&"five"));
    assert_eq!(backend.get(&2), None);
    assert_eq!(backend.get(&100), None);
}
