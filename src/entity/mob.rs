//! Hostile night creatures

use serde::{Deserialize, Serialize};

use crate::core::types::{MobId, Position, Positioned};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mob {
    pub id: MobId,
    pub position: Position,
    pub health: f32,
    pub attack_damage: f32,
}

impl Mob {
    pub fn new(id: MobId, position: Position, health: f32, attack_damage: f32) -> Self {
        Self {
            id,
            position,
            health,
            attack_damage,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

impl Positioned for Mob {
    fn position(&self) -> Position {
        self.position
    }
}
