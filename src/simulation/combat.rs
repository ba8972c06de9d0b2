//! Combat - mob AI and survivor attacks
//!
//! Mobs act first (move or strike), survivors strike back in a later pass.
//! Deaths are filtered at the end of each half.

use tracing::debug;

use crate::ecs::world::World;
use crate::entity::action::Action;
use crate::entity::item::Item;
use crate::simulation::tick::SimulationEvent;
use crate::spatial::pathfinding::{find_nearest_entity, move_towards};
use crate::ui::state::LogCategory;

/// Every mob targets its nearest living survivor: strike when adjacent,
/// otherwise step toward them.
pub fn run_mob_actions(world: &mut World, events: &mut Vec<SimulationEvent>) {
    for i in 0..world.mobs.len() {
        let mob = &world.mobs[i];
        let (mob_id, mob_pos, damage) = (mob.id, mob.position, mob.attack_damage);

        let Some((target_id, target_pos)) =
            find_nearest_entity(mob_pos, world.survivors.iter().filter(|s| s.is_alive()))
                .map(|s| (s.id, s.position))
        else {
            continue;
        };

        if mob_pos.is_adjacent(&target_pos) {
            let Some(target) = world.survivors.iter_mut().find(|s| s.id == target_id) else {
                continue;
            };
            target.stats.health = (target.stats.health - damage).max(0.0);
            let defeated = !target.is_alive();
            let name = target.name.clone();
            debug!(mob = %mob_id, survivor = %name, damage, "Mob attack");

            events.push(SimulationEvent::MobAttacked {
                mob: mob_id,
                survivor: target_id,
                damage,
            });
            if defeated {
                world.log_event(LogCategory::Combat, format!("{name} was defeated by a mob."));
            }
        } else {
            let next = move_towards(mob_pos, target_pos, &world.grid);
            world.mobs[i].position = next;
        }
    }

    for dead in world.remove_dead_survivors() {
        events.push(SimulationEvent::SurvivorDied {
            survivor: dead.id,
            name: dead.name,
        });
    }
}

/// Each FIGHTING survivor hits the first adjacent living mob in list order
pub fn resolve_survivor_attacks(world: &mut World, events: &mut Vec<SimulationEvent>) {
    let sword = world.config.sword_attack_damage;
    let bare = world.config.survivor_base_attack_damage;

    for i in 0..world.survivors.len() {
        let survivor = &world.survivors[i];
        if survivor.action != Action::Fighting {
            continue;
        }
        let damage = if survivor.inventory.has(Item::WoodenSword) {
            sword
        } else {
            bare
        };
        let (id, pos) = (survivor.id, survivor.position);

        let Some(mob) = world
            .mobs
            .iter_mut()
            .find(|m| m.is_alive() && m.position.is_adjacent(&pos))
        else {
            continue;
        };
        mob.health -= damage;
        let mob_id = mob.id;
        let killed = !mob.is_alive();

        events.push(SimulationEvent::MobHit {
            survivor: id,
            mob: mob_id,
            damage,
        });
        if killed {
            let name = world.survivors[i].name.clone();
            world.log_event(LogCategory::Combat, format!("{name} defeated a mob."));
            events.push(SimulationEvent::MobDefeated {
                survivor: id,
                mob: mob_id,
            });
        }
    }

    world.remove_dead_mobs();
}
