//! Survivors: the agents of the colony

use serde::{Deserialize, Serialize};

use crate::core::types::{Position, Positioned, SurvivorId, Tick};
use crate::entity::action::{Action, CraftingState};
use crate::entity::item::Inventory;

/// Vital stats, each kept within [0, max_stat]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub health: f32,
    pub hunger: f32,
    pub energy: f32,
}

impl Stats {
    pub fn full(max_stat: f32) -> Self {
        Self {
            health: max_stat,
            hunger: max_stat,
            energy: max_stat,
        }
    }

    pub fn clamp(&mut self, max_stat: f32) {
        self.health = self.health.clamp(0.0, max_stat);
        self.hunger = self.hunger.clamp(0.0, max_stat);
        self.energy = self.energy.clamp(0.0, max_stat);
    }
}

/// Transient message shown above a survivor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechBubble {
    pub text: String,
    pub ticks_left: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Survivor {
    pub id: SurvivorId,
    pub name: String,
    pub position: Position,
    pub stats: Stats,
    pub inventory: Inventory,
    pub action: Action,
    pub last_decision_tick: Tick,
    pub bubble: Option<SpeechBubble>,
}

impl Survivor {
    pub fn new(id: SurvivorId, name: impl Into<String>, position: Position, max_stat: f32) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            stats: Stats::full(max_stat),
            inventory: Inventory::new(),
            action: Action::Idle,
            last_decision_tick: 0,
            bubble: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.stats.health > 0.0
    }

    pub fn crafting_state(&self) -> Option<&CraftingState> {
        self.action.crafting_state()
    }

    /// Show `text` for `ticks` ticks
    pub fn say(&mut self, text: impl Into<String>, ticks: u32) {
        self.bubble = Some(SpeechBubble {
            text: text.into(),
            ticks_left: ticks,
        });
    }

    /// Count the bubble down, clearing it at zero
    pub fn tick_bubble(&mut self) {
        if let Some(bubble) = &mut self.bubble {
            bubble.ticks_left = bubble.ticks_left.saturating_sub(1);
            if bubble.ticks_left == 0 {
                self.bubble = None;
            }
        }
    }
}

impl Positioned for Survivor {
    fn position(&self) -> Position {
        self.position
    }
}
