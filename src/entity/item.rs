//! Items and the per-holder inventory

use std::fmt;
use std::str::FromStr;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::ColonyError;
use crate::world::grid::Tile;

/// Anything a survivor or chest can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Item {
    Wood,
    WoodenPlank,
    Bed,
    WoodenSword,
    ChestItem,
    String,
    FishingRod,
    Fish,
}

impl Item {
    pub const ALL: [Item; 8] = [
        Item::Wood,
        Item::WoodenPlank,
        Item::Bed,
        Item::WoodenSword,
        Item::ChestItem,
        Item::String,
        Item::FishingRod,
        Item::Fish,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Item::Wood => "WOOD",
            Item::WoodenPlank => "WOODEN_PLANK",
            Item::Bed => "BED",
            Item::WoodenSword => "WOODEN_SWORD",
            Item::ChestItem => "CHEST_ITEM",
            Item::String => "STRING",
            Item::FishingRod => "FISHING_ROD",
            Item::Fish => "FISH",
        }
    }

    /// Tile produced when this item is placed on a floor, if it is placeable
    pub fn placed_tile(&self) -> Option<Tile> {
        match self {
            Item::Bed => Some(Tile::Bed),
            Item::ChestItem => Some(Tile::Chest),
            _ => None,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Item {
    type Err = ColonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Item::ALL
            .into_iter()
            .find(|item| item.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ColonyError::InvalidConfig(format!("unknown item: {s}")))
    }
}

/// Item counts. A missing key means zero; zero entries are pruned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: AHashMap<Item, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, item: Item) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    pub fn has(&self, item: Item) -> bool {
        self.count(item) > 0
    }

    pub fn add(&mut self, item: Item, amount: u32) {
        if amount > 0 {
            *self.items.entry(item).or_insert(0) += amount;
        }
    }

    /// Remove up to `amount`, returns how many were actually removed
    pub fn remove(&mut self, item: Item, amount: u32) -> u32 {
        let Some(held) = self.items.get_mut(&item) else {
            return 0;
        };
        let removed = amount.min(*held);
        *held -= removed;
        if *held == 0 {
            self.items.remove(&item);
        }
        removed
    }

    /// Remove exactly one unit if any is held
    pub fn take_one(&mut self, item: Item) -> bool {
        self.remove(item, 1) == 1
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Non-zero entries in a stable order
    pub fn entries(&self) -> Vec<(Item, u32)> {
        let mut entries: Vec<_> = self.items.iter().map(|(i, n)| (*i, *n)).collect();
        entries.sort();
        entries
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("empty");
        }
        let parts: Vec<String> = self
            .entries()
            .into_iter()
            .map(|(item, n)| format!("{item} x{n}"))
            .collect();
        f.write_str(&parts.join(", "))
    }
}
