//! Workshop: recipes and the timed crafting queue.

pub mod logic;
pub mod recipes;

pub use logic::*;
pub use recipes::{find_recipe, Recipe, RECIPES};
