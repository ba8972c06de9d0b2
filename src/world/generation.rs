//! Island generation
//!
//! Noisy disc of grass ringed by sand, smoothed, then seeded with forest.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::types::Position;
use crate::world::grid::{Grid, Tile};

/// Island radius as a fraction of the grid size
const ISLAND_RADIUS_FRACTION: f32 = 0.4;
/// Width of the sand ring around the grass
const BEACH_WIDTH: f32 = 2.0;
/// Total spread of the coastline noise
const COAST_NOISE: f32 = 5.0;
const SMOOTHING_PASSES: usize = 2;
/// Forest seeding attempts per grid row
const FOREST_SEEDS_PER_ROW: usize = 5;

/// Generate a fresh island of `size` x `size` cells
pub fn generate_island<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Grid {
    let mut grid = Grid::new(size, Tile::Water);
    let centre = size as f32 / 2.0;
    let radius = size as f32 * ISLAND_RADIUS_FRACTION;

    for pos in grid.positions().collect::<Vec<_>>() {
        let dx = pos.x as f32 - centre;
        let dy = pos.y as f32 - centre;
        let distance = (dx * dx + dy * dy).sqrt();
        let noise = (rng.gen::<f32>() - 0.5) * COAST_NOISE;

        let tile = if distance + noise < radius {
            Tile::Grass
        } else if distance + noise < radius + BEACH_WIDTH {
            Tile::Sand
        } else {
            continue;
        };
        // in bounds by construction
        let _ = grid.set_tile(pos, tile);
    }

    for _ in 0..SMOOTHING_PASSES {
        fill_enclosed_water(&mut grid);
    }

    for _ in 0..size * FOREST_SEEDS_PER_ROW {
        let pos = Position::new(rng.gen_range(0..size as i32), rng.gen_range(0..size as i32));
        if grid.get(pos) == Some(Tile::Grass) {
            let _ = grid.set_tile(pos, Tile::Forest);
        }
    }

    grid
}

/// Interior water cells with at least three land neighbours become sand.
/// Updates in place, so earlier fills influence later cells in the same pass.
fn fill_enclosed_water(grid: &mut Grid) {
    let size = grid.size() as i32;
    for y in 1..size - 1 {
        for x in 1..size - 1 {
            let pos = Position::new(x, y);
            if grid.get(pos) != Some(Tile::Water) {
                continue;
            }
            let land = pos
                .cardinal_neighbors()
                .iter()
                .filter(|n| grid.is_any(**n, &[Tile::Grass, Tile::Sand]))
                .count();
            if land >= 3 {
                let _ = grid.set_tile(pos, Tile::Sand);
            }
        }
    }
}

/// Uniformly pick a cell that is not water and not a wall
pub fn random_passable_position<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<Position> {
    let candidates: Vec<Position> = grid
        .cells()
        .filter(|(_, tile)| tile.is_passable())
        .map(|(pos, _)| pos)
        .collect();
    candidates.choose(rng).copied()
}
