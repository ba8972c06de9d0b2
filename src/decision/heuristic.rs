//! Rule-based oracle used when no language model is configured
//!
//! Deterministic: the same snapshot always yields the same answer.
//! Rules are checked top to bottom and the first match wins.

use async_trait::async_trait;

use crate::core::error::Result;
use crate::decision::oracle::{DecisionOracle, DecisionRequest, DecisionResponse};
use crate::ecs::snapshot::WorldSnapshot;
use crate::entity::action::ActionKind;
use crate::entity::item::Item;
use crate::entity::survivor::Survivor;
use crate::world::grid::Tile;

/// Below these a survivor heads for bed
const LOW_ENERGY: f32 = 30.0;
const LOW_HEALTH: f32 = 40.0;

/// Planks per recipe, mirrored from the default catalog
const SWORD_PLANKS: u32 = 2;
const BED_PLANKS: u32 = 6;

/// Floor tiles to lay before switching to walls
const FLOOR_TARGET: usize = 9;

#[derive(Debug, Clone)]
pub struct HeuristicOracle {
    threat_radius: u32,
}

impl HeuristicOracle {
    pub fn new(threat_radius: u32) -> Self {
        Self { threat_radius }
    }

    /// Pick the next action for `survivor`
    pub fn choose(&self, snapshot: &WorldSnapshot, survivor: &Survivor) -> DecisionResponse {
        let inv = &survivor.inventory;
        let planks = inv.count(Item::WoodenPlank);
        let wood = inv.count(Item::Wood);

        let threatened = snapshot
            .mobs
            .iter()
            .any(|m| m.position.chebyshev(&survivor.position) < self.threat_radius);
        if snapshot.is_night && threatened {
            return DecisionResponse::new(ActionKind::Fighting, "A mob is close. Stand and fight.")
                .with_message("Mob! Everyone stay sharp!");
        }

        let stats = survivor.stats;
        if (stats.energy < LOW_ENERGY || stats.health < LOW_HEALTH) && snapshot.grid.count(Tile::Bed) > 0 {
            return DecisionResponse::new(ActionKind::Resting, "Running low. A bed will help.");
        }

        if planks >= SWORD_PLANKS && wood >= 1 && !inv.has(Item::WoodenSword) {
            return DecisionResponse::craft("Wooden Sword", "Nights are dangerous without a weapon.");
        }

        let has_floor = snapshot.grid.count(Tile::WoodenFloor) > 0;
        if has_floor {
            for item in [Item::Bed, Item::ChestItem] {
                if inv.has(item) {
                    return DecisionResponse::place(item, "The floor is ready for it.");
                }
            }
        }

        let beds = snapshot.grid.count(Tile::Bed)
            + snapshot
                .survivors
                .iter()
                .map(|s| s.inventory.count(Item::Bed) as usize)
                .sum::<usize>();
        if planks >= BED_PLANKS && beds < snapshot.survivors.len() {
            return DecisionResponse::craft("Bed", "Not everyone has a bed yet.")
                .with_message("Making another bed.");
        }

        if planks >= 1 {
            let kind = if snapshot.grid.count(Tile::WoodenFloor) < FLOOR_TARGET {
                ActionKind::BuildingFloor
            } else {
                ActionKind::BuildingWall
            };
            return DecisionResponse::new(kind, "Planks on hand. Time to build the camp.");
        }

        if wood >= 1 {
            return DecisionResponse::craft("Wooden Planks", "Turning wood into planks.");
        }

        DecisionResponse::new(ActionKind::GatheringWood, "Everything starts with wood.")
    }
}

impl Default for HeuristicOracle {
    fn default() -> Self {
        Self::new(5)
    }
}

#[async_trait]
impl DecisionOracle for HeuristicOracle {
    async fn decide(&self, request: DecisionRequest) -> Result<DecisionResponse> {
        let survivor = request.subject()?;
        Ok(self.choose(&request.snapshot, survivor))
    }
}
