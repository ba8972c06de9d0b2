//! World - owns the grid and every entity collection
//!
//! Each tick pass receives `&mut World`; nothing else holds simulation state.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::core::calendar::Calendar;
use crate::core::config::SimulationConfig;
use crate::core::error::{ColonyError, Result};
use crate::core::types::{MobId, Position, SurvivorId, Tick};
use crate::crafting::recipe::RecipeCatalog;
use crate::entity::chest::Chest;
use crate::entity::mob::Mob;
use crate::entity::survivor::Survivor;
use crate::ui::state::{ChatHistory, ColonyLog, LogCategory};
use crate::world::generation::{generate_island, random_passable_position};
use crate::world::grid::{Grid, Tile};

/// The game world containing all entities
pub struct World {
    pub config: SimulationConfig,
    pub calendar: Calendar,
    pub grid: Grid,
    pub recipes: RecipeCatalog,
    pub survivors: Vec<Survivor>,
    pub mobs: Vec<Mob>,
    pub chests: Vec<Chest>,
    pub log: ColonyLog,
    pub chat: ChatHistory,
    /// Single source of randomness for the run
    pub rng: ChaCha8Rng,
    next_survivor_id: u32,
    next_mob_id: u32,
}

impl World {
    /// Empty world on an existing grid. No survivors, mobs or chests.
    pub fn new(config: SimulationConfig, grid: Grid) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(config, grid, rng)
    }

    fn with_rng(config: SimulationConfig, grid: Grid, rng: ChaCha8Rng) -> Self {
        Self {
            calendar: Calendar::new(config.ticks_per_day),
            log: ColonyLog::new(config.log_capacity),
            chat: ChatHistory::new(config.chat_capacity),
            recipes: RecipeCatalog::with_defaults(),
            survivors: Vec::new(),
            mobs: Vec::new(),
            chests: Vec::new(),
            next_survivor_id: 0,
            next_mob_id: 0,
            config,
            grid,
            rng,
        }
    }

    /// Fresh island with the configured survivors on random passable cells
    pub fn generate(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let grid = generate_island(config.grid_size, &mut rng);
        let mut world = Self::with_rng(config, grid, rng);
        if let Some(path) = &world.config.recipes_path {
            world.recipes = RecipeCatalog::load_from_toml(path)?;
            info!(path = %path.display(), recipes = world.recipes.len(), "Loaded recipe catalog");
        }

        let names = world.config.survivor_names.clone();
        for name in names {
            let pos = random_passable_position(&world.grid, &mut world.rng).ok_or_else(|| {
                ColonyError::InvalidConfig("island has no passable cell for survivors".into())
            })?;
            world.spawn_survivor(name, pos);
        }

        info!(
            seed = world.config.seed,
            survivors = world.survivors.len(),
            forest = world.grid.count(Tile::Forest),
            "Island generated"
        );
        let count = world.survivors.len();
        world.log_event(
            LogCategory::System,
            format!("A new journey begins. {count} survivors find themselves on a deserted island."),
        );
        Ok(world)
    }

    pub fn current_tick(&self) -> Tick {
        self.calendar.current_tick()
    }

    pub fn is_night(&self) -> bool {
        self.calendar.is_night()
    }

    pub fn tick(&mut self) {
        self.calendar.advance();
    }

    /// Append to the colony log at the current tick
    pub fn log_event(&mut self, category: LogCategory, message: impl Into<String>) {
        let tick = self.current_tick();
        self.log.push(tick, category, message);
    }

    pub fn spawn_survivor(&mut self, name: impl Into<String>, position: Position) -> SurvivorId {
        let id = SurvivorId(self.next_survivor_id);
        self.next_survivor_id += 1;
        self.survivors
            .push(Survivor::new(id, name, position, self.config.max_stat));
        id
    }

    /// New mob with the configured starting health and attack
    pub fn spawn_mob(&mut self, position: Position) -> MobId {
        let id = MobId(self.next_mob_id);
        self.next_mob_id += 1;
        self.mobs.push(Mob::new(
            id,
            position,
            self.config.mob_health,
            self.config.mob_attack_damage,
        ));
        id
    }

    /// Turn `position` into a CHEST tile with an empty chest on it
    pub fn place_chest(&mut self, position: Position) -> Result<()> {
        place_chest(&mut self.grid, &mut self.chests, position)
    }

    pub fn survivor(&self, id: SurvivorId) -> Option<&Survivor> {
        self.survivors.iter().find(|s| s.id == id)
    }

    pub fn survivor_mut(&mut self, id: SurvivorId) -> Option<&mut Survivor> {
        self.survivors.iter_mut().find(|s| s.id == id)
    }

    /// Case-insensitive name lookup
    pub fn survivor_by_name(&self, name: &str) -> Option<&Survivor> {
        let name = name.trim();
        self.survivors
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn survivor_at(&self, position: Position) -> Option<&Survivor> {
        self.survivors.iter().find(|s| s.position == position)
    }

    pub fn mob_at(&self, position: Position) -> Option<&Mob> {
        self.mobs.iter().find(|m| m.position == position)
    }

    pub fn chest_at(&self, position: Position) -> Option<&Chest> {
        self.chests.iter().find(|c| c.position == position)
    }

    /// Drop survivors at or below zero health, returning them
    pub fn remove_dead_survivors(&mut self) -> Vec<Survivor> {
        let (alive, dead) = std::mem::take(&mut self.survivors)
            .into_iter()
            .partition(Survivor::is_alive);
        self.survivors = alive;
        dead
    }

    /// Drop mobs at or below zero health, returning how many died
    pub fn remove_dead_mobs(&mut self) -> usize {
        let before = self.mobs.len();
        self.mobs.retain(Mob::is_alive);
        before - self.mobs.len()
    }
}

/// Field-level chest placement so passes can hold other borrows of the world
pub(crate) fn place_chest(grid: &mut Grid, chests: &mut Vec<Chest>, position: Position) -> Result<()> {
    grid.set_tile(position, Tile::Chest)?;
    if !chests.iter().any(|c| c.position == position) {
        chests.push(Chest::new(position));
    }
    Ok(())
}
