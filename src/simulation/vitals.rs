//! Hunger, energy and health upkeep

use crate::core::config::{ActionEnergyCosts, SimulationConfig};
use crate::ecs::world::World;
use crate::entity::action::ActionKind;
use crate::simulation::tick::SimulationEvent;
use crate::ui::state::LogCategory;
use crate::world::grid::Tile;

/// Extra per-tick energy spent by an action, on top of the baseline
pub fn action_energy_cost(kind: ActionKind, costs: &ActionEnergyCosts) -> f32 {
    match kind {
        ActionKind::GatheringWood => costs.gathering_wood,
        ActionKind::BuildingFloor | ActionKind::BuildingWall => costs.building,
        ActionKind::PlacingItem => costs.placing_item,
        ActionKind::Crafting => costs.crafting,
        ActionKind::Exploring => costs.exploring,
        ActionKind::Fighting => costs.fighting,
        _ => 0.0,
    }
}

/// Net energy change this tick. RESTING replaces every other term with the
/// bed-dependent value.
pub fn energy_delta(kind: ActionKind, on_bed: bool, night: bool, config: &SimulationConfig) -> f32 {
    if kind == ActionKind::Resting {
        return if on_bed { config.bed_energy_regen } else { 0.0 };
    }
    let mut delta = -config.energy_baseline_drain;
    if night {
        delta -= config.night_energy_drain;
    }
    delta - action_energy_cost(kind, &config.energy_costs)
}

/// Decay vitals for every living survivor, then remove the dead
pub fn update_vitals(world: &mut World, events: &mut Vec<SimulationEvent>) {
    let night = world.is_night();
    let config = &world.config;
    let grid = &world.grid;

    for survivor in world.survivors.iter_mut().filter(|s| s.is_alive()) {
        let stats = &mut survivor.stats;
        stats.hunger = (stats.hunger - config.hunger_decay).max(0.0);
        if stats.hunger == 0.0 {
            stats.health -= config.starvation_damage;
        }

        let kind = survivor.action.kind();
        let on_bed = grid.get(survivor.position) == Some(Tile::Bed);
        if kind == ActionKind::Resting && on_bed {
            stats.health += config.bed_health_regen;
        }
        stats.energy += energy_delta(kind, on_bed, night, config);
        stats.clamp(config.max_stat);

        survivor.tick_bubble();
    }

    for dead in world.remove_dead_survivors() {
        world.log_event(LogCategory::System, format!("{} has perished.", dead.name));
        events.push(SimulationEvent::SurvivorDied {
            survivor: dead.id,
            name: dead.name,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Position;
    use crate::entity::action::Action;
    use crate::world::grid::Grid;

    fn world_with_one() -> World {
        let mut world = World::new(SimulationConfig::default(), Grid::new(5, Tile::Grass));
        world.spawn_survivor("Alice", Position::new(2, 2));
        world
    }

    #[test]
    fn test_idle_day_tick() {
        let mut world = world_with_one();
        update_vitals(&mut world, &mut Vec::new());
        let stats = world.survivors[0].stats;
        assert!((stats.hunger - 99.9).abs() < 1e-4);
        assert!((stats.energy - 99.95).abs() < 1e-4);
        assert_eq!(stats.health, 100.0);
    }

    #[test]
    fn test_energy_table() {
        let config = SimulationConfig::default();
        let wood = energy_delta(ActionKind::GatheringWood, false, false, &config);
        assert!((wood + 0.35).abs() < 1e-6);
        let fight_night = energy_delta(ActionKind::Fighting, false, true, &config);
        assert!((fight_night + 0.55).abs() < 1e-6);
        let fishing = energy_delta(ActionKind::Fishing, false, false, &config);
        assert!((fishing + 0.05).abs() < 1e-6);
        assert_eq!(energy_delta(ActionKind::Resting, true, true, &config), 1.5);
        assert_eq!(energy_delta(ActionKind::Resting, false, true, &config), 0.0);
    }

    #[test]
    fn test_resting_on_bed_heals() {
        let mut world = world_with_one();
        world.grid.set_tile(Position::new(2, 2), Tile::Bed).unwrap();
        let s = &mut world.survivors[0];
        s.action = Action::Resting;
        s.stats.health = 50.0;
        s.stats.energy = 10.0;

        update_vitals(&mut world, &mut Vec::new());
        let stats = world.survivors[0].stats;
        assert_eq!(stats.health, 50.5);
        assert_eq!(stats.energy, 11.5);
    }

    #[test]
    fn test_starvation_kills() {
        let mut world = world_with_one();
        let s = &mut world.survivors[0];
        s.stats.hunger = 0.05;
        s.stats.health = 0.3;

        let mut events = Vec::new();
        update_vitals(&mut world, &mut events);
        assert!((world.survivors[0].stats.health - 0.1).abs() < 1e-4);

        update_vitals(&mut world, &mut events);
        assert!(world.survivors.is_empty());
        assert!(matches!(events[0], SimulationEvent::SurvivorDied { .. }));
        assert!(world.log.contains("Alice has perished."));
    }

    #[test]
    fn test_energy_never_negative() {
        let mut world = world_with_one();
        world.survivors[0].action = Action::Fighting;
        world.survivors[0].stats.energy = 0.1;
        update_vitals(&mut world, &mut Vec::new());
        assert_eq!(world.survivors[0].stats.energy, 0.0);
    }
}
