//! Immutable copy of the world handed to render sinks and decision oracles

use serde::Serialize;

use crate::core::types::{Position, SurvivorId, Tick};
use crate::ecs::world::World;
use crate::entity::chest::Chest;
use crate::entity::mob::Mob;
use crate::entity::survivor::Survivor;
use crate::ui::state::{ChatMessage, LogEntry};
use crate::world::grid::{Grid, Tile};

/// Log lines carried in each snapshot
pub const SNAPSHOT_LOG_TAIL: usize = 20;

#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    pub tick: Tick,
    pub day: u64,
    pub day_progress: f32,
    pub is_night: bool,
    pub grid: Grid,
    pub survivors: Vec<Survivor>,
    pub mobs: Vec<Mob>,
    pub chests: Vec<Chest>,
    pub log: Vec<LogEntry>,
    pub chat: Vec<ChatMessage>,
    /// Survivor whose decision is outstanding
    pub thinking: Option<SurvivorId>,
    pub recipes: Vec<String>,
}

impl WorldSnapshot {
    pub fn capture(world: &World, thinking: Option<SurvivorId>) -> Self {
        Self {
            tick: world.current_tick(),
            day: world.calendar.current_day(),
            day_progress: world.calendar.day_progress(),
            is_night: world.is_night(),
            grid: world.grid.clone(),
            survivors: world.survivors.clone(),
            mobs: world.mobs.clone(),
            chests: world.chests.clone(),
            log: world.log.tail(SNAPSHOT_LOG_TAIL),
            chat: world.chat.tail(world.config.chat_capacity),
            thinking,
            recipes: world.recipes.names().map(str::to_string).collect(),
        }
    }

    pub fn survivor(&self, id: SurvivorId) -> Option<&Survivor> {
        self.survivors.iter().find(|s| s.id == id)
    }

    pub fn tile_at(&self, pos: Position) -> Option<Tile> {
        self.grid.get(pos)
    }
}
