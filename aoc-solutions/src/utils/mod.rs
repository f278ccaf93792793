//! Helpers shared by several puzzles

pub mod dp_cache;
pub mod grid;
pub mod math;
