//! Applying an oracle outcome to the world at a tick boundary

use tracing::{debug, info, warn};

use crate::core::error::{ColonyError, Result};
use crate::core::types::SurvivorId;
use crate::crafting::production::start_craft;
use crate::ecs::world::World;
use crate::entity::action::{Action, ActionKind};
use crate::entity::item::Item;
use crate::decision::oracle::DecisionResponse;
use crate::simulation::tick::SimulationEvent;
use crate::ui::state::LogCategory;

/// Map a response onto an action value. CRAFTING is resolved separately
/// because it consumes ingredients.
pub fn action_from_kind(kind: ActionKind, item: Option<Item>, recipient: Option<SurvivorId>) -> Action {
    match kind {
        ActionKind::Idle | ActionKind::Crafting => Action::Idle,
        ActionKind::GatheringWood => Action::GatheringWood,
        ActionKind::BuildingFloor => Action::BuildingFloor,
        ActionKind::BuildingWall => Action::BuildingWall,
        ActionKind::PlacingItem => Action::PlacingItem { item },
        ActionKind::Exploring => Action::Exploring,
        ActionKind::Resting => Action::Resting,
        ActionKind::Fighting => Action::Fighting,
        ActionKind::DepositingItem => Action::DepositingItem { item },
        ActionKind::WithdrawingItem => Action::WithdrawingItem { item },
        ActionKind::GivingItem => Action::GivingItem { item, recipient },
        ActionKind::Fishing => Action::Fishing,
        ActionKind::GatheringString => Action::GatheringString,
    }
}

/// Apply the outcome of one oracle call.
///
/// A survivor that no longer exists is skipped silently. A failed call
/// leaves the survivor IDLE with a fresh decision stamp.
pub fn apply_decision(
    world: &mut World,
    survivor: SurvivorId,
    outcome: Result<DecisionResponse>,
    events: &mut Vec<SimulationEvent>,
) {
    let Some(index) = world.survivors.iter().position(|s| s.id == survivor) else {
        debug!(%survivor, "Discarding decision for a survivor who is gone");
        return;
    };
    let tick = world.current_tick();

    let response = match outcome {
        Ok(response) => response,
        Err(err) => {
            let target = &mut world.survivors[index];
            target.action = Action::Idle;
            target.last_decision_tick = tick;
            let name = target.name.clone();

            warn!(survivor = %name, error = %err, "Decision failed");
            world.log_event(
                LogCategory::Decision,
                format!("Failed to get a new action for {name}."),
            );
            events.push(SimulationEvent::DecisionFailed {
                survivor,
                reason: err.to_string(),
            });
            return;
        }
    };

    let recipient = response
        .target_survivor_name
        .as_deref()
        .and_then(|name| world.survivor_by_name(name))
        .map(|s| s.id);
    let item = response.target_item();
    let display_ticks = world.config.message_display_ticks;

    let target = &mut world.survivors[index];
    let name = target.name.clone();
    target.last_decision_tick = tick;
    target.action = action_from_kind(response.action, item, recipient);
    if let Some(message) = &response.message {
        target.say(message.clone(), display_ticks);
    }

    world.log_event(
        LogCategory::Decision,
        format!(
            "{name} decided to {}. Reason: {}",
            response.action.phrase(),
            response.reasoning
        ),
    );
    if let Some(message) = response.message {
        world.chat.push(name.clone(), message);
    }

    if response.action == ActionKind::Crafting {
        let note = match response.crafting_recipe_name.as_deref() {
            None => Some(format!("{name} wanted to craft but did not name a recipe.")),
            Some(recipe) => {
                let recipes = &world.recipes;
                let target = &mut world.survivors[index];
                match start_craft(target, recipe, recipes) {
                    Ok(()) => None,
                    Err(ColonyError::UnknownRecipe(_)) => {
                        Some(format!("{name} wanted to craft {recipe} but no such recipe exists."))
                    }
                    Err(_) => Some(format!("{name} wanted to craft {recipe} but lacked ingredients.")),
                }
            }
        };
        if let Some(note) = note {
            world.survivors[index].action = Action::Idle;
            world.log_event(LogCategory::Production, note);
        }
    }

    let action = world.survivors[index].action.kind();
    info!(survivor = %name, %action, "Decision applied");
    events.push(SimulationEvent::DecisionApplied { survivor, action });
}
