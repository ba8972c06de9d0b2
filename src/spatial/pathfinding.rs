//! Greedy single-step movement
//!
//! Not a planner: each call looks one cell ahead and can oscillate behind
//! obstacles. Every query here is read-only over the grid and entity lists.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::types::{Position, Positioned};
use crate::world::grid::{Grid, Tile};

/// One step from `from` toward `to`.
///
/// The primary axis is the one with the larger delta; ties go to y. When the
/// primary step is blocked the fallbacks are, in order:
/// - both deltas nonzero: x toward target, then y toward target
/// - no x delta: x+1, then x-1
/// - otherwise: y+1, then y-1
///
/// Returns `from` when every candidate is blocked.
pub fn move_towards(from: Position, to: Position, grid: &Grid) -> Position {
    if from == to {
        return from;
    }

    let dx = to.x - from.x;
    let dy = to.y - from.y;

    let primary = if dx.abs() > dy.abs() {
        from.offset(dx.signum(), 0)
    } else {
        from.offset(0, dy.signum())
    };
    if grid.is_passable(primary) {
        return primary;
    }

    let fallbacks = if dx != 0 && dy != 0 {
        [from.offset(dx.signum(), 0), from.offset(0, dy.signum())]
    } else if dx == 0 {
        [from.offset(1, 0), from.offset(-1, 0)]
    } else {
        [from.offset(0, 1), from.offset(0, -1)]
    };

    fallbacks
        .into_iter()
        .find(|p| grid.is_passable(*p))
        .unwrap_or(from)
}

/// Nearest cell (Manhattan) satisfying `matches`. Row-major scan; the first
/// cell seen at the minimum distance wins.
pub fn find_nearest_matching<F>(from: Position, grid: &Grid, mut matches: F) -> Option<Position>
where
    F: FnMut(Position, Tile) -> bool,
{
    let mut best: Option<(u32, Position)> = None;
    for (pos, tile) in grid.cells() {
        if !matches(pos, tile) {
            continue;
        }
        let d = from.manhattan(&pos);
        if best.map_or(true, |(min, _)| d < min) {
            best = Some((d, pos));
        }
    }
    best.map(|(_, pos)| pos)
}

/// Nearest cell holding any of `kinds`
pub fn find_nearest_tile(from: Position, kinds: &[Tile], grid: &Grid) -> Option<Position> {
    find_nearest_matching(from, grid, |_, tile| kinds.contains(&tile))
}

/// Nearest entity by Manhattan distance; ties keep the earlier entity
pub fn find_nearest_entity<'a, T, I>(from: Position, entities: I) -> Option<&'a T>
where
    T: Positioned + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut best: Option<(u32, &'a T)> = None;
    for entity in entities {
        let d = from.manhattan(&entity.position());
        if best.map_or(true, |(min, _)| d < min) {
            best = Some((d, entity));
        }
    }
    best.map(|(_, e)| e)
}

/// Uniform step to one of the passable cardinal neighbours, or stay put
pub fn random_step<R: Rng + ?Sized>(from: Position, grid: &Grid, rng: &mut R) -> Position {
    let moves: Vec<Position> = from
        .cardinal_neighbors()
        .into_iter()
        .filter(|p| grid.is_passable(*p))
        .collect();
    moves.choose(rng).copied().unwrap_or(from)
}
