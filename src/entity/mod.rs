//! Survivors, mobs, chests and what they carry

pub mod action;
pub mod chest;
pub mod item;
pub mod mob;
pub mod survivor;

pub use action::{Action, ActionKind, CraftingState};
pub use chest::Chest;
pub use item::{Inventory, Item};
pub use mob::Mob;
pub use survivor::{SpeechBubble, Stats, Survivor};
