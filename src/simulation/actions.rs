//! Action state machine - one step of work or movement per survivor per tick
//!
//! Every action that finishes drops back to IDLE. IDLE itself touches nothing.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::{Position, SurvivorId, Tick};
use crate::crafting::production::tick_craft;
use crate::crafting::recipe::RecipeCatalog;
use crate::ecs::world::{place_chest, World};
use crate::entity::action::Action;
use crate::entity::chest::Chest;
use crate::entity::item::Item;
use crate::entity::mob::Mob;
use crate::entity::survivor::Survivor;
use crate::simulation::tick::SimulationEvent;
use crate::spatial::pathfinding::{
    find_nearest_entity, find_nearest_matching, find_nearest_tile, move_towards, random_step,
};
use crate::ui::state::{ColonyLog, LogCategory};
use crate::world::grid::{Grid, Tile};

/// Tiles a wall may be raised on
const WALL_BASE_TILES: [Tile; 3] = [Tile::Grass, Tile::Sand, Tile::WoodenFloor];

/// Where each survivor stands, refreshed as soon as they have acted
struct RosterEntry {
    id: SurvivorId,
    name: String,
    position: Position,
}

/// One unit handed over during the pass, credited after every survivor has acted
struct Gift {
    recipient: SurvivorId,
    item: Item,
}

/// Borrowed view of everything but the survivors
struct ActionContext<'a> {
    tick: Tick,
    config: &'a SimulationConfig,
    recipes: &'a RecipeCatalog,
    grid: &'a mut Grid,
    mobs: &'a [Mob],
    chests: &'a mut Vec<Chest>,
    log: &'a mut ColonyLog,
    rng: &'a mut ChaCha8Rng,
    roster: Vec<RosterEntry>,
    gifts: Vec<Gift>,
    events: &'a mut Vec<SimulationEvent>,
}

/// Run the current action of every survivor, in list order
pub fn execute_survivor_actions(world: &mut World, events: &mut Vec<SimulationEvent>) -> Result<()> {
    let roster: Vec<RosterEntry> = world
        .survivors
        .iter()
        .map(|s| RosterEntry {
            id: s.id,
            name: s.name.clone(),
            position: s.position,
        })
        .collect();

    let mut ctx = ActionContext {
        tick: world.calendar.current_tick(),
        config: &world.config,
        recipes: &world.recipes,
        grid: &mut world.grid,
        mobs: &world.mobs,
        chests: &mut world.chests,
        log: &mut world.log,
        rng: &mut world.rng,
        roster,
        gifts: Vec::new(),
        events,
    };

    for (i, survivor) in world.survivors.iter_mut().enumerate() {
        ctx.step(survivor)?;
        ctx.roster[i].position = survivor.position;
    }

    let gifts = std::mem::take(&mut ctx.gifts);
    for gift in gifts {
        if let Some(recipient) = world.survivors.iter_mut().find(|s| s.id == gift.recipient) {
            recipient.inventory.add(gift.item, 1);
        }
    }
    Ok(())
}

impl ActionContext<'_> {
    fn log(&mut self, category: LogCategory, message: String) {
        self.log.push(self.tick, category, message);
    }

    fn roll(&mut self, chance: f64) -> bool {
        self.rng.gen::<f64>() < chance
    }

    /// Step toward the nearest tile of `kinds`; stay put when there is none
    fn approach_tile(&self, survivor: &mut Survivor, kinds: &[Tile]) -> bool {
        match find_nearest_tile(survivor.position, kinds, self.grid) {
            Some(target) => {
                survivor.position = move_towards(survivor.position, target, self.grid);
                true
            }
            None => false,
        }
    }

    fn step(&mut self, survivor: &mut Survivor) -> Result<()> {
        let pos = survivor.position;
        let here = self.grid.tile_at(pos)?;

        match survivor.action.clone() {
            Action::Idle => {}

            Action::GatheringWood => {
                if here == Tile::Forest {
                    survivor.inventory.add(Item::Wood, 1);
                    self.events.push(SimulationEvent::Gathered {
                        survivor: survivor.id,
                        item: Item::Wood,
                    });
                    if self.roll(self.config.tree_fell_chance) {
                        self.grid.set_tile(pos, Tile::Grass)?;
                        self.log(
                            LogCategory::Production,
                            format!("A tree was felled near {}.", survivor.name),
                        );
                        self.events.push(SimulationEvent::TreeFelled {
                            survivor: survivor.id,
                            position: pos,
                        });
                    }
                } else {
                    self.approach_tile(survivor, &[Tile::Forest]);
                }
            }

            Action::BuildingFloor => self.build(survivor, here, &[Tile::Grass], Tile::WoodenFloor)?,

            Action::BuildingWall => self.build(survivor, here, &WALL_BASE_TILES, Tile::WoodenWall)?,

            Action::PlacingItem { item } => {
                let Some(item) = item.filter(|i| survivor.inventory.has(*i)) else {
                    survivor.action = Action::Idle;
                    return Ok(());
                };
                let Some(tile) = item.placed_tile() else {
                    survivor.action = Action::Idle;
                    return Ok(());
                };
                if here != Tile::WoodenFloor {
                    self.approach_tile(survivor, &[Tile::WoodenFloor]);
                    return Ok(());
                }

                if tile == Tile::Chest {
                    place_chest(self.grid, self.chests, pos)?;
                } else {
                    self.grid.set_tile(pos, tile)?;
                }
                survivor.inventory.take_one(item);
                survivor.action = Action::Idle;
                self.log(
                    LogCategory::Production,
                    format!("{} placed a {}.", survivor.name, tile.as_str()),
                );
                self.events.push(SimulationEvent::ItemPlaced {
                    survivor: survivor.id,
                    item,
                    position: pos,
                });
            }

            Action::Crafting(_) => {
                if let Some(done) =
                    tick_craft(survivor, self.recipes, self.config.crafting_duration_ticks)
                {
                    self.log(
                        LogCategory::Production,
                        format!("{} crafted {}.", survivor.name, done.recipe_name),
                    );
                    self.events.push(SimulationEvent::Crafted {
                        survivor: survivor.id,
                        recipe: done.recipe_name,
                        item: done.item,
                        quantity: done.quantity,
                    });
                }
            }

            Action::Exploring => {
                survivor.position = random_step(pos, self.grid, self.rng);
            }

            Action::Resting => {
                if here != Tile::Bed && !self.approach_tile(survivor, &[Tile::Bed]) {
                    survivor.action = Action::Idle;
                }
            }

            Action::Fighting => {
                match find_nearest_entity(pos, self.mobs.iter().filter(|m| m.is_alive())) {
                    None => survivor.action = Action::Idle,
                    Some(mob) if pos.manhattan(&mob.position) > 1 => {
                        survivor.position = move_towards(pos, mob.position, self.grid);
                    }
                    Some(_) => {}
                }
            }

            Action::DepositingItem { item } => {
                let Some(item) = item.filter(|i| survivor.inventory.has(*i)) else {
                    survivor.action = Action::Idle;
                    return Ok(());
                };
                let Some(chest) = find_nearest_entity(pos, self.chests.iter()).map(|c| c.position)
                else {
                    survivor.action = Action::Idle;
                    return Ok(());
                };

                if pos.is_adjacent(&chest) {
                    if let Some(target) = self.chests.iter_mut().find(|c| c.position == chest) {
                        survivor.inventory.take_one(item);
                        target.inventory.add(item, 1);
                        survivor.action = Action::Idle;
                        debug!(survivor = %survivor.name, %item, "Deposited into chest");
                        self.events.push(SimulationEvent::Deposited {
                            survivor: survivor.id,
                            item,
                            chest,
                        });
                    }
                } else {
                    survivor.position = move_towards(pos, chest, self.grid);
                }
            }

            Action::WithdrawingItem { item } => {
                let Some(item) = item else {
                    survivor.action = Action::Idle;
                    return Ok(());
                };
                let Some(chest) = find_nearest_entity(pos, self.chests.iter())
                    .filter(|c| c.inventory.has(item))
                    .map(|c| c.position)
                else {
                    survivor.action = Action::Idle;
                    return Ok(());
                };

                if pos.is_adjacent(&chest) {
                    if let Some(source) = self.chests.iter_mut().find(|c| c.position == chest) {
                        source.inventory.take_one(item);
                        survivor.inventory.add(item, 1);
                        survivor.action = Action::Idle;
                        debug!(survivor = %survivor.name, %item, "Withdrew from chest");
                        self.events.push(SimulationEvent::Withdrew {
                            survivor: survivor.id,
                            item,
                            chest,
                        });
                    }
                } else {
                    survivor.position = move_towards(pos, chest, self.grid);
                }
            }

            Action::GivingItem { item, recipient } => {
                let item = item.filter(|i| survivor.inventory.has(*i));
                let recipient = recipient
                    .filter(|id| *id != survivor.id)
                    .and_then(|id| self.roster.iter().find(|r| r.id == id))
                    .map(|r| (r.id, r.name.clone(), r.position));
                let (Some(item), Some((to, to_name, to_pos))) = (item, recipient) else {
                    survivor.action = Action::Idle;
                    return Ok(());
                };

                if pos.is_adjacent(&to_pos) {
                    survivor.inventory.take_one(item);
                    survivor.action = Action::Idle;
                    self.gifts.push(Gift { recipient: to, item });
                    let from = survivor.id;
                    self.log(
                        LogCategory::Action,
                        format!("{} gave {} to {}.", survivor.name, item, to_name),
                    );
                    self.events.push(SimulationEvent::Gave { from, to, item });
                } else {
                    survivor.position = move_towards(pos, to_pos, self.grid);
                }
            }

            Action::Fishing => {
                if !survivor.inventory.has(Item::FishingRod) {
                    survivor.action = Action::Idle;
                    return Ok(());
                }
                if is_fishing_spot(self.grid, pos) {
                    if self.roll(self.config.fish_catch_chance) {
                        survivor.inventory.add(Item::Fish, 1);
                        self.log(
                            LogCategory::Production,
                            format!("{} caught a fish.", survivor.name),
                        );
                        self.events.push(SimulationEvent::Gathered {
                            survivor: survivor.id,
                            item: Item::Fish,
                        });
                    }
                } else {
                    let grid = &*self.grid;
                    if let Some(spot) = find_nearest_matching(pos, grid, |p, _| is_fishing_spot(grid, p)) {
                        survivor.position = move_towards(pos, spot, grid);
                    }
                }
            }

            Action::GatheringString => {
                if here == Tile::Sand {
                    if self.roll(self.config.string_find_chance) {
                        survivor.inventory.add(Item::String, 1);
                        self.events.push(SimulationEvent::Gathered {
                            survivor: survivor.id,
                            item: Item::String,
                        });
                    }
                } else {
                    self.approach_tile(survivor, &[Tile::Sand]);
                }
            }
        }
        Ok(())
    }

    /// Shared floor/wall logic: needs a plank, converts the current tile if it
    /// is a valid base, otherwise walks to the nearest one
    fn build(&mut self, survivor: &mut Survivor, here: Tile, bases: &[Tile], result: Tile) -> Result<()> {
        if !survivor.inventory.has(Item::WoodenPlank) {
            survivor.action = Action::Idle;
            return Ok(());
        }
        if !bases.contains(&here) {
            self.approach_tile(survivor, bases);
            return Ok(());
        }

        self.grid.set_tile(survivor.position, result)?;
        survivor.inventory.take_one(Item::WoodenPlank);
        survivor.action = Action::Idle;
        debug!(survivor = %survivor.name, tile = result.as_str(), "Built");
        self.events.push(SimulationEvent::Built {
            survivor: survivor.id,
            tile: result,
            position: survivor.position,
        });
        Ok(())
    }
}

/// A passable cell with water on at least one side
fn is_fishing_spot(grid: &Grid, pos: Position) -> bool {
    grid.is_passable(pos)
        && pos
            .cardinal_neighbors()
            .iter()
            .any(|n| grid.get(*n) == Some(Tile::Water))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::action::CraftingState;

    fn world(size: usize, fill: Tile) -> World {
        World::new(SimulationConfig::default(), Grid::new(size, fill))
    }

    fn run(world: &mut World) -> Vec<SimulationEvent> {
        let mut events = Vec::new();
        execute_survivor_actions(world, &mut events).unwrap();
        events
    }

    #[test]
    fn test_idle_touches_nothing() {
        let mut w = world(6, Tile::Forest);
        w.spawn_survivor("Alice", Position::new(2, 2));
        w.survivors[0].inventory.add(Item::Wood, 2);
        let grid_before = w.grid.clone();

        for _ in 0..20 {
            assert!(run(&mut w).is_empty());
        }
        assert_eq!(w.grid, grid_before);
        assert_eq!(w.survivors[0].position, Position::new(2, 2));
        assert_eq!(w.survivors[0].inventory.count(Item::Wood), 2);
    }

    #[test]
    fn test_gathering_wood_on_forest() {
        let mut w = world(6, Tile::Forest);
        w.spawn_survivor("Alice", Position::new(2, 2));
        w.survivors[0].action = Action::GatheringWood;
        run(&mut w);
        assert_eq!(w.survivors[0].inventory.count(Item::Wood), 1);
        assert_eq!(w.survivors[0].action, Action::GatheringWood);
    }

    #[test]
    fn test_gathering_wood_walks_to_forest() {
        let mut w = world(6, Tile::Grass);
        w.grid.set_tile(Position::new(5, 2), Tile::Forest).unwrap();
        w.spawn_survivor("Bob", Position::new(2, 2));
        w.survivors[0].action = Action::GatheringWood;
        run(&mut w);
        assert_eq!(w.survivors[0].position, Position::new(3, 2));
        assert_eq!(w.survivors[0].inventory.count(Item::Wood), 0);
    }

    #[test]
    fn test_gathering_wood_without_forest_stays() {
        let mut w = world(6, Tile::Grass);
        w.spawn_survivor("Bob", Position::new(2, 2));
        w.survivors[0].action = Action::GatheringWood;
        run(&mut w);
        assert_eq!(w.survivors[0].position, Position::new(2, 2));
        assert_eq!(w.survivors[0].action, Action::GatheringWood);
    }

    #[test]
    fn test_building_floor() {
        let mut w = world(6, Tile::Grass);
        w.spawn_survivor("Carl", Position::new(1, 1));
        w.survivors[0].action = Action::BuildingFloor;
        w.survivors[0].inventory.add(Item::WoodenPlank, 2);
        run(&mut w);
        assert_eq!(w.grid.tile_at(Position::new(1, 1)).unwrap(), Tile::WoodenFloor);
        assert_eq!(w.survivors[0].inventory.count(Item::WoodenPlank), 1);
        assert!(w.survivors[0].action.is_idle());
    }

    #[test]
    fn test_building_without_planks_goes_idle() {
        let mut w = world(6, Tile::Grass);
        w.spawn_survivor("Carl", Position::new(1, 1));
        w.survivors[0].action = Action::BuildingWall;
        run(&mut w);
        assert!(w.survivors[0].action.is_idle());
        assert_eq!(w.grid.count(Tile::WoodenWall), 0);
    }

    #[test]
    fn test_wall_on_sand_and_walks_off_forest() {
        let mut w = world(6, Tile::Forest);
        w.grid.set_tile(Position::new(0, 1), Tile::Sand).unwrap();
        w.spawn_survivor("Dana", Position::new(0, 0));
        w.survivors[0].action = Action::BuildingWall;
        w.survivors[0].inventory.add(Item::WoodenPlank, 1);

        run(&mut w);
        assert_eq!(w.survivors[0].position, Position::new(0, 1));
        run(&mut w);
        assert_eq!(w.grid.tile_at(Position::new(0, 1)).unwrap(), Tile::WoodenWall);
        assert!(w.survivors[0].action.is_idle());
    }

    #[test]
    fn test_placing_chest_creates_entity() {
        let mut w = world(5, Tile::WoodenFloor);
        w.spawn_survivor("Eve", Position::new(2, 2));
        w.survivors[0].inventory.add(Item::ChestItem, 1);
        w.survivors[0].action = Action::PlacingItem {
            item: Some(Item::ChestItem),
        };

        run(&mut w);
        assert_eq!(w.grid.tile_at(Position::new(2, 2)).unwrap(), Tile::Chest);
        assert_eq!(w.chests.len(), 1);
        assert_eq!(w.chests[0].position, Position::new(2, 2));
        assert!(w.chests[0].inventory.is_empty());
        assert_eq!(w.survivors[0].inventory.count(Item::ChestItem), 0);
        assert!(w.log.contains("Eve placed a CHEST."));
    }

    #[test]
    fn test_placing_bed_needs_floor() {
        let mut w = world(5, Tile::Grass);
        w.grid.set_tile(Position::new(4, 0), Tile::WoodenFloor).unwrap();
        w.spawn_survivor("Eve", Position::new(0, 0));
        w.survivors[0].inventory.add(Item::Bed, 1);
        w.survivors[0].action = Action::PlacingItem {
            item: Some(Item::Bed),
        };

        run(&mut w);
        assert_eq!(w.survivors[0].position, Position::new(1, 0));
        assert_eq!(w.grid.count(Tile::Bed), 0);
    }

    #[test]
    fn test_placing_without_item_goes_idle() {
        let mut w = world(5, Tile::WoodenFloor);
        w.spawn_survivor("Eve", Position::new(0, 0));
        w.survivors[0].action = Action::PlacingItem {
            item: Some(Item::Bed),
        };
        run(&mut w);
        assert!(w.survivors[0].action.is_idle());

        w.survivors[0].inventory.add(Item::Wood, 1);
        w.survivors[0].action = Action::PlacingItem {
            item: Some(Item::Wood),
        };
        run(&mut w);
        assert!(w.survivors[0].action.is_idle());
        assert_eq!(w.grid.count(Tile::WoodenFloor), 25);
    }

    #[test]
    fn test_crafting_completes() {
        let mut w = world(5, Tile::Grass);
        w.spawn_survivor("Alice", Position::new(0, 0));
        w.survivors[0].action = Action::Crafting(CraftingState::new("Bed"));

        for _ in 0..9 {
            assert!(run(&mut w).is_empty());
        }
        let events = run(&mut w);
        assert!(matches!(events[0], SimulationEvent::Crafted { item: Item::Bed, .. }));
        assert_eq!(w.survivors[0].inventory.count(Item::Bed), 1);
        assert!(w.log.contains("Alice crafted Bed."));
    }

    #[test]
    fn test_resting_without_bed_goes_idle() {
        let mut w = world(5, Tile::Grass);
        w.spawn_survivor("Bob", Position::new(0, 0));
        w.survivors[0].action = Action::Resting;
        run(&mut w);
        assert!(w.survivors[0].action.is_idle());
    }

    #[test]
    fn test_resting_walks_to_bed_and_stays() {
        let mut w = world(5, Tile::Grass);
        w.grid.set_tile(Position::new(0, 2), Tile::Bed).unwrap();
        w.spawn_survivor("Bob", Position::new(0, 0));
        w.survivors[0].action = Action::Resting;
        run(&mut w);
        run(&mut w);
        assert_eq!(w.survivors[0].position, Position::new(0, 2));
        run(&mut w);
        assert_eq!(w.survivors[0].position, Position::new(0, 2));
        assert_eq!(w.survivors[0].action, Action::Resting);
    }

    #[test]
    fn test_fighting_approaches_and_idles_without_mobs() {
        let mut w = world(8, Tile::Grass);
        w.spawn_survivor("Dana", Position::new(0, 0));
        w.survivors[0].action = Action::Fighting;
        w.spawn_mob(Position::new(4, 0));
        run(&mut w);
        assert_eq!(w.survivors[0].position, Position::new(1, 0));

        w.mobs.clear();
        run(&mut w);
        assert!(w.survivors[0].action.is_idle());
    }

    #[test]
    fn test_exploring_moves_one_passable_step() {
        let mut w = world(5, Tile::Grass);
        w.spawn_survivor("Eve", Position::new(2, 2));
        w.survivors[0].action = Action::Exploring;
        for _ in 0..10 {
            let before = w.survivors[0].position;
            run(&mut w);
            let after = w.survivors[0].position;
            assert_eq!(before.manhattan(&after), 1);
            assert!(w.grid.is_passable(after));
        }
    }

    #[test]
    fn test_deposit_then_withdraw_restores_split() {
        let mut w = world(5, Tile::Grass);
        w.place_chest(Position::new(2, 3)).unwrap();
        w.spawn_survivor("Alice", Position::new(2, 2));
        w.survivors[0].inventory.add(Item::Wood, 3);

        w.survivors[0].action = Action::DepositingItem {
            item: Some(Item::Wood),
        };
        run(&mut w);
        assert_eq!(w.survivors[0].inventory.count(Item::Wood), 2);
        assert_eq!(w.chests[0].inventory.count(Item::Wood), 1);
        assert!(w.survivors[0].action.is_idle());

        w.survivors[0].action = Action::WithdrawingItem {
            item: Some(Item::Wood),
        };
        run(&mut w);
        assert_eq!(w.survivors[0].inventory.count(Item::Wood), 3);
        assert_eq!(w.chests[0].inventory.count(Item::Wood), 0);
    }

    #[test]
    fn test_deposit_walks_to_chest() {
        let mut w = world(6, Tile::Grass);
        w.place_chest(Position::new(5, 5)).unwrap();
        w.spawn_survivor("Alice", Position::new(0, 5));
        w.survivors[0].inventory.add(Item::Fish, 1);
        w.survivors[0].action = Action::DepositingItem {
            item: Some(Item::Fish),
        };
        run(&mut w);
        assert_eq!(w.survivors[0].position, Position::new(1, 5));
        assert!(w.chests[0].inventory.is_empty());
    }

    #[test]
    fn test_withdraw_from_empty_chest_goes_idle() {
        let mut w = world(5, Tile::Grass);
        w.place_chest(Position::new(1, 1)).unwrap();
        w.spawn_survivor("Alice", Position::new(1, 2));
        w.survivors[0].action = Action::WithdrawingItem {
            item: Some(Item::Wood),
        };
        run(&mut w);
        assert!(w.survivors[0].action.is_idle());
        assert_eq!(w.survivors[0].inventory.count(Item::Wood), 0);
    }

    #[test]
    fn test_giving_to_adjacent_survivor() {
        let mut w = world(5, Tile::Grass);
        let _alice = w.spawn_survivor("Alice", Position::new(1, 1));
        let bob = w.spawn_survivor("Bob", Position::new(1, 2));
        w.survivors[0].inventory.add(Item::WoodenSword, 1);
        w.survivors[0].action = Action::GivingItem {
            item: Some(Item::WoodenSword),
            recipient: Some(bob),
        };

        run(&mut w);
        assert_eq!(w.survivors[0].inventory.count(Item::WoodenSword), 0);
        assert_eq!(w.survivors[1].inventory.count(Item::WoodenSword), 1);
        assert!(w.survivors[0].action.is_idle());
        assert!(w.log.contains("Alice gave WOODEN_SWORD to Bob."));
    }

    #[test]
    fn test_giving_sees_recipient_after_they_moved() {
        let mut w = world(6, Tile::Grass);
        w.grid.set_tile(Position::new(5, 2), Tile::Forest).unwrap();
        let bob = w.spawn_survivor("Bob", Position::new(2, 2));
        w.spawn_survivor("Alice", Position::new(1, 2));
        w.survivors[0].action = Action::GatheringWood;
        w.survivors[1].inventory.add(Item::Wood, 1);
        w.survivors[1].action = Action::GivingItem {
            item: Some(Item::Wood),
            recipient: Some(bob),
        };

        // Bob walks east first, so Alice is two cells behind and follows
        run(&mut w);
        assert_eq!(w.survivors[0].position, Position::new(3, 2));
        assert_eq!(w.survivors[1].position, Position::new(2, 2));
        assert_eq!(w.survivors[0].inventory.count(Item::Wood), 0);
        assert_eq!(w.survivors[1].inventory.count(Item::Wood), 1);

        // Bob stays on grass short of the forest, now Alice is adjacent
        w.survivors[0].action = Action::Idle;
        run(&mut w);
        assert_eq!(w.survivors[0].inventory.count(Item::Wood), 1);
        assert!(w.survivors[1].action.is_idle());
    }

    #[test]
    fn test_giving_walks_toward_recipient() {
        let mut w = world(6, Tile::Grass);
        w.spawn_survivor("Alice", Position::new(0, 0));
        let bob = w.spawn_survivor("Bob", Position::new(0, 4));
        w.survivors[0].inventory.add(Item::Wood, 1);
        w.survivors[0].action = Action::GivingItem {
            item: Some(Item::Wood),
            recipient: Some(bob),
        };
        run(&mut w);
        assert_eq!(w.survivors[0].position, Position::new(0, 1));
        assert_eq!(w.survivors[1].inventory.count(Item::Wood), 0);
    }

    #[test]
    fn test_giving_to_self_or_unknown_goes_idle() {
        let mut w = world(5, Tile::Grass);
        let alice = w.spawn_survivor("Alice", Position::new(0, 0));
        w.survivors[0].inventory.add(Item::Wood, 1);
        w.survivors[0].action = Action::GivingItem {
            item: Some(Item::Wood),
            recipient: Some(alice),
        };
        run(&mut w);
        assert!(w.survivors[0].action.is_idle());

        w.survivors[0].action = Action::GivingItem {
            item: Some(Item::Wood),
            recipient: Some(SurvivorId(42)),
        };
        run(&mut w);
        assert!(w.survivors[0].action.is_idle());
        assert_eq!(w.survivors[0].inventory.count(Item::Wood), 1);
    }

    #[test]
    fn test_fishing_requires_rod_and_water() {
        let config = SimulationConfig {
            fish_catch_chance: 1.0,
            ..Default::default()
        };
        let mut w = World::new(config, Grid::new(5, Tile::Sand));
        w.grid.set_tile(Position::new(4, 4), Tile::Water).unwrap();
        w.spawn_survivor("Bob", Position::new(0, 0));
        w.survivors[0].action = Action::Fishing;

        run(&mut w);
        assert!(w.survivors[0].action.is_idle());

        w.survivors[0].inventory.add(Item::FishingRod, 1);
        w.survivors[0].action = Action::Fishing;
        // walk to a shore cell next to (4,4)
        for _ in 0..8 {
            run(&mut w);
        }
        assert!(is_fishing_spot(&w.grid, w.survivors[0].position));
        assert!(w.survivors[0].inventory.count(Item::Fish) > 0);
        assert_eq!(w.survivors[0].action, Action::Fishing);
    }

    #[test]
    fn test_gathering_string_on_sand() {
        let config = SimulationConfig {
            string_find_chance: 1.0,
            ..Default::default()
        };
        let mut w = World::new(config, Grid::new(4, Tile::Grass));
        w.grid.set_tile(Position::new(0, 1), Tile::Sand).unwrap();
        w.spawn_survivor("Eve", Position::new(0, 0));
        w.survivors[0].action = Action::GatheringString;

        run(&mut w);
        assert_eq!(w.survivors[0].position, Position::new(0, 1));
        run(&mut w);
        assert_eq!(w.survivors[0].inventory.count(Item::String), 1);
    }
}
