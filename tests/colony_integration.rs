//! Integration tests for the tick pipeline
//!
//! These tests drive whole ticks through `run_simulation_tick` and check the
//! end-to-end behaviour of gathering, crafting, combat, storage and spawning.

use std::sync::Arc;

use castaway::core::config::SimulationConfig;
use castaway::core::types::Position;
use castaway::crafting::production::start_craft;
use castaway::decision::dispatcher::Dispatcher;
use castaway::decision::oracle::ScriptedOracle;
use castaway::ecs::world::World;
use castaway::entity::action::Action;
use castaway::entity::item::Item;
use castaway::simulation::tick::{run_simulation_tick, SimulationEvent};
use castaway::world::grid::{Grid, Tile};

/// Nobody is ever eligible for a decision, so actions persist untouched
fn no_decisions() -> SimulationConfig {
    SimulationConfig {
        min_decision_energy: 1_000.0,
        tree_regrowth_chance: 0.0,
        mob_spawn_chance_night: 0.0,
        ..Default::default()
    }
}

fn dispatcher() -> Dispatcher {
    Dispatcher::new(Arc::new(ScriptedOracle::new()), None)
}

fn run(world: &mut World, dispatcher: &mut Dispatcher, ticks: u32) -> Vec<SimulationEvent> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        events.extend(run_simulation_tick(world, dispatcher).unwrap());
    }
    events
}

// ============================================================================
// Gathering and crafting
// ============================================================================

#[test]
fn test_gathering_wood_for_100_ticks() {
    let mut world = World::new(no_decisions(), Grid::new(10, Tile::Forest));
    world.spawn_survivor("Alice", Position::new(5, 5));
    world.survivors[0].action = Action::GatheringWood;
    let start_energy = world.survivors[0].stats.energy;

    run(&mut world, &mut dispatcher(), 100);

    let alice = &world.survivors[0];
    assert!(alice.inventory.count(Item::Wood) >= 5);
    assert!(alice.stats.energy < start_energy);
    assert_eq!(alice.action, Action::GatheringWood);
}

#[test]
fn test_wooden_planks_craft_cycle() {
    let mut world = World::new(no_decisions(), Grid::new(6, Tile::Grass));
    world.spawn_survivor("Bob", Position::new(2, 2));
    world.survivors[0].inventory.add(Item::Wood, 1);

    {
        let recipes = &world.recipes;
        let bob = &mut world.survivors[0];
        start_craft(bob, "Wooden Planks", recipes).unwrap();
        assert_eq!(bob.inventory.count(Item::Wood), 0);
        assert_eq!(bob.crafting_state().unwrap().progress, 0);
    }

    let events = run(&mut world, &mut dispatcher(), 10);

    let bob = &world.survivors[0];
    assert_eq!(bob.inventory.count(Item::WoodenPlank), 4);
    assert!(bob.crafting_state().is_none());
    assert!(bob.action.is_idle());
    assert!(events
        .iter()
        .any(|e| matches!(e, SimulationEvent::Crafted { quantity: 4, .. })));
    assert!(world.log.contains("Bob crafted Wooden Planks."));
}

#[test]
fn test_build_a_floor_then_place_a_bed() {
    let mut world = World::new(no_decisions(), Grid::new(6, Tile::Grass));
    world.spawn_survivor("Carl", Position::new(1, 1));
    world.survivors[0].inventory.add(Item::WoodenPlank, 1);
    world.survivors[0].inventory.add(Item::Bed, 1);
    let mut dispatcher = dispatcher();

    world.survivors[0].action = Action::BuildingFloor;
    run(&mut world, &mut dispatcher, 1);
    assert_eq!(world.grid.tile_at(Position::new(1, 1)).unwrap(), Tile::WoodenFloor);

    world.survivors[0].action = Action::PlacingItem {
        item: Some(Item::Bed),
    };
    run(&mut world, &mut dispatcher, 1);
    assert_eq!(world.grid.tile_at(Position::new(1, 1)).unwrap(), Tile::Bed);
    assert!(world.survivors[0].inventory.is_empty());
}

// ============================================================================
// Combat
// ============================================================================

#[test]
fn test_mob_hits_and_fighter_strikes_back() {
    let mut world = World::new(no_decisions(), Grid::new(8, Tile::Grass));
    world.spawn_survivor("Dana", Position::new(4, 4));
    world.survivors[0].action = Action::Fighting;
    world.spawn_mob(Position::new(5, 4));
    world.mobs[0].attack_damage = 5.0;

    run(&mut world, &mut dispatcher(), 1);

    assert_eq!(world.survivors[0].stats.health, 95.0);
    assert_eq!(world.mobs[0].health, 28.0);
}

#[test]
fn test_sword_kills_mob_in_three_hits() {
    let mut world = World::new(no_decisions(), Grid::new(8, Tile::Grass));
    world.spawn_survivor("Eve", Position::new(4, 4));
    world.survivors[0].action = Action::Fighting;
    world.survivors[0].inventory.add(Item::WoodenSword, 1);
    world.spawn_mob(Position::new(4, 5));

    let events = run(&mut world, &mut dispatcher(), 3);

    assert!(world.mobs.is_empty());
    assert_eq!(world.survivors[0].stats.health, 91.0);
    assert!(events
        .iter()
        .any(|e| matches!(e, SimulationEvent::MobDefeated { .. })));
    // nothing left to fight
    run(&mut world, &mut dispatcher(), 1);
    assert!(world.survivors[0].action.is_idle());
}

#[test]
fn test_mob_population_never_exceeds_cap() {
    let config = SimulationConfig {
        grid_size: 12,
        mob_spawn_chance_night: 1.0 / 12.0,
        ticks_per_day: 20,
        min_decision_energy: 1_000.0,
        ..Default::default()
    };
    let mut world = World::new(config, Grid::new(12, Tile::Sand));
    let mut dispatcher = dispatcher();

    let mut peak = 0;
    for _ in 0..400 {
        run_simulation_tick(&mut world, &mut dispatcher).unwrap();
        peak = peak.max(world.mobs.len());
        assert!(world.mobs.len() <= 10);
    }
    assert_eq!(peak, 10);
}

// ============================================================================
// Storage
// ============================================================================

#[test]
fn test_deposit_withdraw_round_trip() {
    let mut world = World::new(no_decisions(), Grid::new(8, Tile::Grass));
    world.place_chest(Position::new(6, 6)).unwrap();
    world.spawn_survivor("Alice", Position::new(1, 1));
    world.survivors[0].inventory.add(Item::Fish, 2);
    let before = world.survivors[0].inventory.clone();
    let mut dispatcher = dispatcher();

    world.survivors[0].action = Action::DepositingItem {
        item: Some(Item::Fish),
    };
    run(&mut world, &mut dispatcher, 12);
    assert_eq!(world.chests[0].inventory.count(Item::Fish), 1);
    assert_eq!(world.survivors[0].inventory.count(Item::Fish), 1);

    world.survivors[0].action = Action::WithdrawingItem {
        item: Some(Item::Fish),
    };
    run(&mut world, &mut dispatcher, 1);
    assert_eq!(world.survivors[0].inventory, before);
    assert!(world.chests[0].inventory.is_empty());
}

#[test]
fn test_idle_survivors_leave_world_untouched() {
    let mut world = World::new(no_decisions(), Grid::new(8, Tile::Forest));
    world.spawn_survivor("Alice", Position::new(2, 2));
    world.spawn_survivor("Bob", Position::new(5, 5));
    world.survivors[1].inventory.add(Item::WoodenPlank, 3);
    let grid = world.grid.clone();
    let positions: Vec<_> = world.survivors.iter().map(|s| s.position).collect();
    let inventories: Vec<_> = world.survivors.iter().map(|s| s.inventory.clone()).collect();

    run(&mut world, &mut dispatcher(), 50);

    assert_eq!(world.grid, grid);
    for (i, s) in world.survivors.iter().enumerate() {
        assert_eq!(s.position, positions[i]);
        assert_eq!(s.inventory, inventories[i]);
    }
}

#[test]
fn test_generated_island_runs_a_full_day() {
    let config = SimulationConfig {
        min_decision_energy: 1_000.0,
        ..Default::default()
    };
    let mut world = World::generate(config).unwrap();
    for (i, s) in world.survivors.iter_mut().enumerate() {
        s.action = if i % 2 == 0 {
            Action::GatheringWood
        } else {
            Action::Exploring
        };
    }

    run(&mut world, &mut dispatcher(), 480);

    assert_eq!(world.current_tick(), 480);
    for s in &world.survivors {
        assert!(world.grid.is_passable(s.position));
        assert!(s.stats.energy >= 0.0 && s.stats.energy <= 100.0);
    }
}
