//! Shared storage placed on the map

use serde::{Deserialize, Serialize};

use crate::core::types::{Position, Positioned};
use crate::entity::item::Inventory;

/// Always sits on a CHEST tile at the same position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chest {
    pub position: Position,
    pub inventory: Inventory,
}

impl Chest {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            inventory: Inventory::new(),
        }
    }
}

impl Positioned for Chest {
    fn position(&self) -> Position {
        self.position
    }
}
