//! Crafting - the recipe catalog and the per-survivor craft cycle

pub mod production;
pub mod recipe;

pub use production::{start_craft, tick_craft, CraftResult};
pub use recipe::{Recipe, RecipeCatalog, RecipeOutput, Shape};
