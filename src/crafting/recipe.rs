//! Crafting recipes
//!
//! Recipes carry a 3x3 shape for display, but consumption only cares about
//! how many of each ingredient the shape holds.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ColonyError, Result};
use crate::entity::item::Item;

/// 3x3 crafting layout, row-major
pub type Shape = [[Option<Item>; 3]; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeOutput {
    pub item: Item,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique, human-readable name used by oracles
    pub name: String,
    pub output: RecipeOutput,
    pub shape: Shape,
}

impl Recipe {
    pub fn new(name: impl Into<String>, item: Item, quantity: u32, shape: Shape) -> Self {
        Self {
            name: name.into(),
            output: RecipeOutput { item, quantity },
            shape,
        }
    }

    /// Shape flattened row-major with empty slots dropped
    pub fn ingredients(&self) -> Vec<Item> {
        self.shape.iter().flatten().flatten().copied().collect()
    }

    /// Units needed per ingredient, in first-appearance order
    pub fn ingredient_counts(&self) -> Vec<(Item, u32)> {
        let mut counts: Vec<(Item, u32)> = Vec::new();
        for item in self.ingredients() {
            match counts.iter_mut().find(|(i, _)| *i == item) {
                Some((_, n)) => *n += 1,
                None => counts.push((item, 1)),
            }
        }
        counts
    }
}

/// Catalog of all available recipes
#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The island's built-in recipes
    pub fn with_defaults() -> Self {
        use Item::{String as Str, Wood, WoodenPlank as Plank};

        let mut catalog = Self::new();
        catalog.add(Recipe::new(
            "Wooden Planks",
            Plank,
            4,
            [[Some(Wood), None, None], [None, None, None], [None, None, None]],
        ));
        catalog.add(Recipe::new(
            "Bed",
            Item::Bed,
            1,
            [
                [Some(Plank), Some(Plank), Some(Plank)],
                [Some(Plank), Some(Plank), Some(Plank)],
                [None, None, None],
            ],
        ));
        catalog.add(Recipe::new(
            "Wooden Sword",
            Item::WoodenSword,
            1,
            [
                [Some(Plank), None, None],
                [Some(Plank), None, None],
                [Some(Wood), None, None],
            ],
        ));
        catalog.add(Recipe::new(
            "Chest",
            Item::ChestItem,
            1,
            [
                [Some(Plank), Some(Plank), Some(Plank)],
                [Some(Plank), None, Some(Plank)],
                [Some(Plank), Some(Plank), Some(Plank)],
            ],
        ));
        catalog.add(Recipe::new(
            "Fishing Rod",
            Item::FishingRod,
            1,
            [
                [Some(Wood), None, Some(Str)],
                [Some(Wood), Some(Str), None],
                [Some(Wood), None, None],
            ],
        ));
        catalog
    }

    /// Add a recipe, replacing any existing recipe with the same name
    pub fn add(&mut self, recipe: Recipe) {
        self.recipes.retain(|r| r.name != recipe.name);
        self.recipes.push(recipe);
    }

    /// Exact-name lookup
    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.name == name)
    }

    pub fn all(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.recipes.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Load recipes from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse recipes from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let toml_data: TomlRecipes = toml::from_str(content)?;

        let mut catalog = Self::new();
        for recipe in toml_data.recipes {
            catalog.add(recipe.into_recipe()?);
        }
        Ok(catalog)
    }
}

/// TOML representation of a recipes file
#[derive(Debug, Deserialize)]
struct TomlRecipes {
    recipes: Vec<TomlRecipe>,
}

/// Shape rows are lists of item names; "" marks an empty slot
#[derive(Debug, Deserialize)]
struct TomlRecipe {
    name: String,
    output: String,
    #[serde(default = "default_quantity")]
    quantity: u32,
    shape: Vec<Vec<String>>,
}

fn default_quantity() -> u32 {
    1
}

impl TomlRecipe {
    fn into_recipe(self) -> Result<Recipe> {
        if self.shape.len() > 3 || self.shape.iter().any(|row| row.len() > 3) {
            return Err(ColonyError::InvalidConfig(format!(
                "recipe {} has a shape larger than 3x3",
                self.name
            )));
        }

        let mut shape: Shape = Default::default();
        for (y, row) in self.shape.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if !cell.trim().is_empty() {
                    shape[y][x] = Some(cell.parse()?);
                }
            }
        }

        Ok(Recipe::new(self.name, self.output.parse()?, self.quantity, shape))
    }
}
