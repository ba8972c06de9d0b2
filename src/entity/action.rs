//! What a survivor is doing right now
//!
//! `Action` carries exactly the parameters its variant needs. `ActionKind` is
//! the flat wire form exchanged with decision oracles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::ColonyError;
use crate::core::types::SurvivorId;
use crate::entity::item::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Idle,
    GatheringWood,
    BuildingFloor,
    BuildingWall,
    PlacingItem,
    Crafting,
    Exploring,
    Resting,
    Fighting,
    DepositingItem,
    WithdrawingItem,
    GivingItem,
    Fishing,
    GatheringString,
}

impl ActionKind {
    pub const ALL: [ActionKind; 14] = [
        ActionKind::Idle,
        ActionKind::GatheringWood,
        ActionKind::BuildingFloor,
        ActionKind::BuildingWall,
        ActionKind::PlacingItem,
        ActionKind::Crafting,
        ActionKind::Exploring,
        ActionKind::Resting,
        ActionKind::Fighting,
        ActionKind::DepositingItem,
        ActionKind::WithdrawingItem,
        ActionKind::GivingItem,
        ActionKind::Fishing,
        ActionKind::GatheringString,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Idle => "IDLE",
            ActionKind::GatheringWood => "GATHERING_WOOD",
            ActionKind::BuildingFloor => "BUILDING_FLOOR",
            ActionKind::BuildingWall => "BUILDING_WALL",
            ActionKind::PlacingItem => "PLACING_ITEM",
            ActionKind::Crafting => "CRAFTING",
            ActionKind::Exploring => "EXPLORING",
            ActionKind::Resting => "RESTING",
            ActionKind::Fighting => "FIGHTING",
            ActionKind::DepositingItem => "DEPOSITING_ITEM",
            ActionKind::WithdrawingItem => "WITHDRAWING_ITEM",
            ActionKind::GivingItem => "GIVING_ITEM",
            ActionKind::Fishing => "FISHING",
            ActionKind::GatheringString => "GATHERING_STRING",
        }
    }

    /// Lowercase words for log lines, e.g. "gathering wood"
    pub fn phrase(&self) -> String {
        self.as_str().to_lowercase().replace('_', " ")
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = ColonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ColonyError::OracleFailure(format!("unknown action: {s}")))
    }
}

/// A recipe being worked on. Ingredients are already consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftingState {
    pub recipe_name: String,
    pub progress: u32,
}

impl CraftingState {
    pub fn new(recipe_name: impl Into<String>) -> Self {
        Self {
            recipe_name: recipe_name.into(),
            progress: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Awaiting the next decision. Never mutates the world.
    #[default]
    Idle,
    GatheringWood,
    BuildingFloor,
    BuildingWall,
    PlacingItem {
        item: Option<Item>,
    },
    Crafting(CraftingState),
    Exploring,
    Resting,
    Fighting,
    DepositingItem {
        item: Option<Item>,
    },
    WithdrawingItem {
        item: Option<Item>,
    },
    GivingItem {
        item: Option<Item>,
        recipient: Option<SurvivorId>,
    },
    Fishing,
    GatheringString,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Idle => ActionKind::Idle,
            Action::GatheringWood => ActionKind::GatheringWood,
            Action::BuildingFloor => ActionKind::BuildingFloor,
            Action::BuildingWall => ActionKind::BuildingWall,
            Action::PlacingItem { .. } => ActionKind::PlacingItem,
            Action::Crafting(_) => ActionKind::Crafting,
            Action::Exploring => ActionKind::Exploring,
            Action::Resting => ActionKind::Resting,
            Action::Fighting => ActionKind::Fighting,
            Action::DepositingItem { .. } => ActionKind::DepositingItem,
            Action::WithdrawingItem { .. } => ActionKind::WithdrawingItem,
            Action::GivingItem { .. } => ActionKind::GivingItem,
            Action::Fishing => ActionKind::Fishing,
            Action::GatheringString => ActionKind::GatheringString,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Action::Idle)
    }

    pub fn crafting_state(&self) -> Option<&CraftingState> {
        match self {
            Action::Crafting(state) => Some(state),
            _ => None,
        }
    }

    /// Item parameter of the action, if it has one
    pub fn target_item(&self) -> Option<Item> {
        match self {
            Action::PlacingItem { item }
            | Action::DepositingItem { item }
            | Action::WithdrawingItem { item }
            | Action::GivingItem { item, .. } => *item,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in ActionKind::ALL {
            assert_eq!(kind.as_str().parse::<ActionKind>().unwrap(), kind);
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_phrase() {
        assert_eq!(ActionKind::GatheringWood.phrase(), "gathering wood");
        assert_eq!(ActionKind::Idle.phrase(), "idle");
    }

    #[test]
    fn test_action_payloads() {
        let action = Action::DepositingItem {
            item: Some(Item::Wood),
        };
        assert_eq!(action.kind(), ActionKind::DepositingItem);
        assert_eq!(action.target_item(), Some(Item::Wood));
        assert_eq!(Action::Fighting.target_item(), None);

        let crafting = Action::Crafting(CraftingState::new("Bed"));
        assert_eq!(crafting.crafting_state().map(|c| c.progress), Some(0));
        assert!(Action::default().is_idle());
    }

    #[test]
    fn test_action_serializes_with_kind_tag() {
        let json = serde_json::to_value(Action::PlacingItem {
            item: Some(Item::Bed),
        })
        .unwrap();
        assert_eq!(json["kind"], "PLACING_ITEM");
        assert_eq!(json["item"], "BED");
    }
}
