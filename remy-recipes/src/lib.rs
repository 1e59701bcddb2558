pub mod interaction;
pub mod recipe;

pub use interaction::{Interaction, RatingError};
pub use recipe::{Ingredient, Recipe};
