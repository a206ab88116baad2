//! Recipe model definitions and related views.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Ingredient, Step};

/// A named dish filed under a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    /// Unique identifier for the recipe
    pub id: u64,

    /// Name of the dish
    pub name: String,

    /// ID of the owning category
    pub category_id: u64,

    /// Optional cover photo stored in the image directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_path: Option<String>,

    /// Whether the recipe is marked as a favourite
    pub is_favorite: bool,

    /// How many times the recipe has been opened
    pub view_count: u32,

    /// Timestamp when the recipe was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the recipe was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Recipe {
    /// Every image path referenced by the recipe row itself.
    pub fn image_paths(&self) -> impl Iterator<Item = &str> {
        self.cover_image_path.as_deref().into_iter()
    }
}

/// A recipe list row carrying the owning category's name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeWithCategory {
    #[serde(flatten)]
    pub recipe: Recipe,

    /// Name of the owning category
    pub category_name: String,
}

/// A recipe with its ingredients and steps, both in display order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeDetails {
    #[serde(flatten)]
    pub recipe: Recipe,

    /// Name of the owning category
    pub category_name: String,

    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    #[serde(default)]
    pub steps: Vec<Step>,
}

impl RecipeDetails {
    /// Cover and step image paths referenced by this recipe.
    pub fn image_paths(&self) -> Vec<String> {
        self.recipe
            .image_paths()
            .chain(self.steps.iter().filter_map(|s| s.image_path.as_deref()))
            .map(String::from)
            .collect()
    }
}
