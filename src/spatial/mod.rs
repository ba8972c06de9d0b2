//! Movement and nearest-target queries over the tile grid

pub mod pathfinding;

pub use pathfinding::{
    find_nearest_entity, find_nearest_matching, find_nearest_tile, move_towards, random_step,
};
