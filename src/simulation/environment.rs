//! Environment - forest regrowth and night spawns

use rand::Rng;
use tracing::info;

use crate::core::types::Position;
use crate::ecs::world::World;
use crate::simulation::tick::SimulationEvent;
use crate::ui::state::LogCategory;
use crate::world::generation::random_passable_position;
use crate::world::grid::Tile;

/// Each GRASS cell independently rolls to become FOREST
pub fn regrow_trees(world: &mut World, events: &mut Vec<SimulationEvent>) {
    let chance = world.config.tree_regrowth_chance;
    let grass: Vec<Position> = world
        .grid
        .cells()
        .filter(|(_, tile)| *tile == Tile::Grass)
        .map(|(pos, _)| pos)
        .collect();

    for pos in grass {
        if world.rng.gen::<f64>() < chance && world.grid.set_tile(pos, Tile::Forest).is_ok() {
            events.push(SimulationEvent::TreeGrew { position: pos });
        }
    }
}

/// At night, below the population cap, one roll may add a single mob
pub fn spawn_mobs(world: &mut World, events: &mut Vec<SimulationEvent>) {
    if !world.is_night() || world.mobs.len() >= world.config.mob_cap {
        return;
    }
    if world.rng.gen::<f64>() >= world.config.night_spawn_roll() {
        return;
    }
    let Some(position) = random_passable_position(&world.grid, &mut world.rng) else {
        return;
    };

    let mob = world.spawn_mob(position);
    info!(%mob, x = position.x, y = position.y, "Mob spawned");
    world.log_event(LogCategory::Combat, "A mob emerges from the darkness.");
    events.push(SimulationEvent::MobSpawned { mob, position });
}
