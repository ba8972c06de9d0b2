//! Tick system - orchestrates simulation updates
//!
//! One tick runs a fixed pipeline of passes over the world:
//! vitals -> mob AI -> survivor actions -> combat -> decisions -> environment
//!
//! Every pass takes `&mut World` and appends to the tick's event list.

use serde::Serialize;

use crate::core::error::Result;
use crate::core::types::{MobId, Position, SurvivorId};
use crate::decision::dispatcher::Dispatcher;
use crate::ecs::world::World;
use crate::entity::action::ActionKind;
use crate::entity::item::Item;
use crate::simulation::actions::execute_survivor_actions;
use crate::simulation::combat::{resolve_survivor_attacks, run_mob_actions};
use crate::simulation::environment::{regrow_trees, spawn_mobs};
use crate::simulation::vitals::update_vitals;
use crate::world::grid::Tile;

/// Events generated during a simulation tick
///
/// Returned by `run_simulation_tick` so callers can react without diffing the world.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum SimulationEvent {
    /// Health reached zero; the survivor is gone for good
    SurvivorDied { survivor: SurvivorId, name: String },
    MobAttacked {
        mob: MobId,
        survivor: SurvivorId,
        damage: f32,
    },
    /// A fighting survivor struck a mob
    MobHit {
        survivor: SurvivorId,
        mob: MobId,
        damage: f32,
    },
    MobDefeated { survivor: SurvivorId, mob: MobId },
    MobSpawned { mob: MobId, position: Position },
    TreeGrew { position: Position },
    TreeFelled {
        survivor: SurvivorId,
        position: Position,
    },
    /// One unit of a raw resource picked up (wood, string, fish)
    Gathered { survivor: SurvivorId, item: Item },
    Built {
        survivor: SurvivorId,
        tile: Tile,
        position: Position,
    },
    ItemPlaced {
        survivor: SurvivorId,
        item: Item,
        position: Position,
    },
    Crafted {
        survivor: SurvivorId,
        recipe: String,
        item: Item,
        quantity: u32,
    },
    Deposited {
        survivor: SurvivorId,
        item: Item,
        chest: Position,
    },
    Withdrew {
        survivor: SurvivorId,
        item: Item,
        chest: Position,
    },
    Gave {
        from: SurvivorId,
        to: SurvivorId,
        item: Item,
    },
    /// Night threat override, no oracle involved
    ForcedToFight { survivor: SurvivorId },
    DecisionRequested { survivor: SurvivorId },
    DecisionApplied {
        survivor: SurvivorId,
        action: ActionKind,
    },
    DecisionFailed { survivor: SurvivorId, reason: String },
}

/// The passes of one tick, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickPass {
    Vitals,
    MobAi,
    Actions,
    Combat,
    Decisions,
    Environment,
}

/// Fixed pass order. Mob attacks land before survivors strike back, and
/// decisions see the world after both.
pub const PIPELINE: [TickPass; 6] = [
    TickPass::Vitals,
    TickPass::MobAi,
    TickPass::Actions,
    TickPass::Combat,
    TickPass::Decisions,
    TickPass::Environment,
];

impl TickPass {
    pub fn name(&self) -> &'static str {
        match self {
            TickPass::Vitals => "vitals",
            TickPass::MobAi => "mob_ai",
            TickPass::Actions => "actions",
            TickPass::Combat => "combat",
            TickPass::Decisions => "decisions",
            TickPass::Environment => "environment",
        }
    }

    fn run(
        &self,
        world: &mut World,
        dispatcher: &mut Dispatcher,
        events: &mut Vec<SimulationEvent>,
    ) -> Result<()> {
        match self {
            TickPass::Vitals => update_vitals(world, events),
            TickPass::MobAi => run_mob_actions(world, events),
            TickPass::Actions => execute_survivor_actions(world, events)?,
            TickPass::Combat => resolve_survivor_attacks(world, events),
            TickPass::Decisions => dispatcher.dispatch(world, events),
            TickPass::Environment => {
                regrow_trees(world, events);
                spawn_mobs(world, events);
            }
        }
        Ok(())
    }
}

/// Run a single simulation tick
///
/// The clock advances first, so every pass sees the new tick number.
/// Oracle responses are applied by the caller before this runs
/// (see `Dispatcher::collect`), never in the middle of a pass.
///
/// Must be called inside a tokio runtime: the decisions pass may spawn an
/// oracle task.
pub fn run_simulation_tick(
    world: &mut World,
    dispatcher: &mut Dispatcher,
) -> Result<Vec<SimulationEvent>> {
    let mut events = Vec::new();
    world.tick();

    for pass in PIPELINE {
        pass.run(world, dispatcher, &mut events)?;
        tracing::trace!(tick = world.current_tick(), pass = pass.name(), "Pass complete");
    }

    Ok(events)
}
