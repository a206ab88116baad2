//! Ingredient model definition.

use serde::{Deserialize, Serialize};

/// A single line of a recipe's ingredient list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ingredient {
    /// Unique identifier for the ingredient row
    pub id: u64,

    /// ID of the owning recipe
    pub recipe_id: u64,

    /// Ingredient name, e.g. "Garlic"
    pub name: String,

    /// Free-form quantity text, e.g. "2 cloves"
    pub amount: String,

    /// Position within the recipe's ingredient list (0-indexed)
    pub sort_order: u32,
}
