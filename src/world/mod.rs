//! Island terrain: the tile grid and its generator

pub mod generation;
pub mod grid;

pub use generation::{generate_island, random_passable_position};
pub use grid::{Grid, Tile};
