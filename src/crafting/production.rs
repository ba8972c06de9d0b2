//! Craft cycle - consume on start, produce after a fixed number of ticks
//!
//! Ingredients leave the inventory the moment crafting starts. Overriding
//! the CRAFTING action later discards the progress and the ingredients.

use crate::core::error::{ColonyError, Result};
use crate::crafting::recipe::RecipeCatalog;
use crate::entity::action::{Action, CraftingState};
use crate::entity::item::Item;
use crate::entity::survivor::Survivor;

/// A finished craft
#[derive(Debug, Clone, PartialEq)]
pub struct CraftResult {
    pub recipe_name: String,
    pub item: Item,
    pub quantity: u32,
}

/// Begin crafting `recipe_name`.
///
/// Ingredients are taken one unit at a time in shape order. When one runs
/// out the call fails with `InsufficientIngredients` and the units already
/// taken are not returned.
pub fn start_craft(survivor: &mut Survivor, recipe_name: &str, catalog: &RecipeCatalog) -> Result<()> {
    let recipe = catalog
        .get(recipe_name)
        .ok_or_else(|| ColonyError::UnknownRecipe(recipe_name.to_string()))?;

    for ingredient in recipe.ingredients() {
        if !survivor.inventory.take_one(ingredient) {
            return Err(ColonyError::InsufficientIngredients {
                recipe: recipe.name.clone(),
                missing: ingredient,
            });
        }
    }

    survivor.action = Action::Crafting(CraftingState::new(recipe.name.clone()));
    Ok(())
}

/// Advance one tick of crafting. Returns the result when the craft completes.
///
/// A recipe that vanished from the catalog mid-craft completes with no output.
pub fn tick_craft(survivor: &mut Survivor, catalog: &RecipeCatalog, duration: u32) -> Option<CraftResult> {
    let Action::Crafting(state) = &mut survivor.action else {
        return None;
    };

    state.progress += 1;
    if state.progress < duration {
        return None;
    }

    let recipe_name = std::mem::take(&mut state.recipe_name);
    survivor.action = Action::Idle;

    let recipe = catalog.get(&recipe_name)?;
    survivor.inventory.add(recipe.output.item, recipe.output.quantity);
    Some(CraftResult {
        recipe_name,
        item: recipe.output.item,
        quantity: recipe.output.quantity,
    })
}
