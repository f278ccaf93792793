//! Storage backends for the DP cache.

use std::collections::HashMap;
use std::hash::Hash;

/// Where a [`DpCache`](super::DpCache) keeps computed values
pub trait Backend<I, K> {
    fn get(&self, index: &I) -> Option<&K>;

    fn insert(&mut self, index: I, value: K);
}

/// Dense `usize` indices starting at 0, grows on insert
#[derive(Debug)]
pub struct VecBackend<K> {
    data: Vec<Option<K>>,
}

impl<K> VecBackend<K> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }
}

impl<K> Default for VecBackend<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Backend<usize, K> for VecBackend<K> {
    fn get(&self, index: &usize) -> Option<&K> {
        self.data.get(*index)?.as_ref()
    }

    fn insert(&mut self, index: usize, value: K) {
        if index >= self.data.len() {
            self.data.resize_with(index + 1, || None);
        }
        self.data[index] = Some(value);
    }
}

/// Dense `(row, col)` indices within fixed bounds.
///
/// # Panics
///
/// `insert` panics on an index outside the bounds given to `new`.
#[derive(Debug)]
pub struct Vec2DBackend<K> {
    cols: usize,
    data: Vec<Option<K>>,
}

impl<K> Vec2DBackend<K> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cols,
            data: std::iter::repeat_with(|| None).take(rows * cols).collect(),
        }
    }
}

impl<K> Backend<(usize, usize), K> for Vec2DBackend<K> {
    fn get(&self, &(row, col): &(usize, usize)) -> Option<&K> {
        if col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col)?.as_ref()
    }

    fn insert(&mut self, (row, col): (usize, usize), value: K) {
        assert!(col < self.cols, "column {col} out of bounds");
        self.data[row * self.cols + col] = Some(value);
    }
}

/// Arbitrary hashable indices, for sparse or structured keys
#[derive(Debug)]
pub struct HashMapBackend<I, K> {
    data: HashMap<I, K>,
}

impl<I, K> HashMapBackend<I, K> {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }
}

impl<I, K> Default for HashMapBackend<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Hash + Eq, K> Backend<I, K> for HashMapBackend<I, K> {
    fn get(&self, index: &I) -> Option<&K> {
        self.data.get(index)
    }

    fn insert(&mut self, index: I, value: K) {
        self.data.insert(index, value);
    }
}
