//! Parameter structures for cookbook operations.
//!
//! These structures are shared by every interface that drives the
//! [`Cookbook`](crate::Cookbook) facade. They carry no framework-specific
//! derives: the CLI defines its own clap wrappers and converts them into
//! these types with `From` implementations.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │    Cookbook     │
//! │  (clap derives) │───▶│ (serde derives) │───▶│  (async facade) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    error::{CookbookError, Result},
    models::{CategorySort, RecipeFilter, RecipeSort},
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for operations on a batch of IDs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ids {
    /// IDs of the resources to operate on
    pub ids: Vec<u64>,
}

/// Parameters for creating a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCategory {
    /// Display name, unique across categories
    pub name: String,
}

/// Parameters for renaming a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenameCategory {
    /// Category to rename
    pub id: u64,
    /// New display name
    pub name: String,
}

/// Parameters for arranging categories manually.
///
/// Listed categories move to the front in the given order; the rest follow
/// in their current order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReorderCategories {
    pub ids: Vec<u64>,
}

/// Parameters for listing categories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListCategories {
    #[serde(default)]
    pub sort: CategorySort,
}

/// Parameters for permanently deleting a category and all its recipes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteCategory {
    /// Category to delete
    pub id: u64,
    /// Must be true for the deletion to proceed
    #[serde(default)]
    pub confirmed: bool,
}

/// A single ingredient line supplied by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngredientInput {
    pub name: String,
    pub amount: String,
}

impl IngredientInput {
    pub fn new(name: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
        }
    }
}

/// A single method step supplied by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepInput {
    pub description: String,
    /// Optional image file; imported into the image directory on save
    #[serde(default)]
    pub image: Option<String>,
}

impl StepInput {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            image: None,
        }
    }
}

/// The full editable content of a recipe.
///
/// Used for both creation and updates: an update replaces the recipe's
/// ingredients and steps with exactly the lists given here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeInput {
    /// Name of the dish
    pub name: String,
    /// Owning category
    pub category_id: u64,
    /// Optional cover image file; imported into the image directory on save
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    /// Ingredients in display order
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
    /// Steps in display order
    #[serde(default)]
    pub steps: Vec<StepInput>,
}

impl RecipeInput {
    /// Trim user-supplied text and reject recipes without a name.
    ///
    /// Blank ingredient and step lines are dropped rather than stored.
    pub fn normalized(&self) -> Result<Self> {
        let name = normalize_name("name", &self.name)?;

        let ingredients = self
            .ingredients
            .iter()
            .filter(|i| !i.name.trim().is_empty())
            .map(|i| IngredientInput::new(i.name.trim(), i.amount.trim()))
            .collect();

        let steps = self
            .steps
            .iter()
            .filter(|s| !s.description.trim().is_empty())
            .map(|s| StepInput {
                description: s.description.trim().to_string(),
                image: s.image.clone().filter(|p| !p.trim().is_empty()),
            })
            .collect();

        Ok(Self {
            name,
            category_id: self.category_id,
            cover_image: self.cover_image.clone().filter(|p| !p.trim().is_empty()),
            is_favorite: self.is_favorite,
            ingredients,
            steps,
        })
    }
}

/// Parameters for replacing a recipe's content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRecipe {
    /// Recipe to update
    pub id: u64,
    #[serde(flatten)]
    pub recipe: RecipeInput,
}

/// Parameters for listing recipes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRecipes {
    /// Restrict to one category
    #[serde(default)]
    pub category_id: Option<u64>,
    /// Only favourite recipes
    #[serde(default)]
    pub favorites_only: bool,
    #[serde(default)]
    pub sort: RecipeSort,
}

impl From<&ListRecipes> for RecipeFilter {
    fn from(params: &ListRecipes) -> Self {
        RecipeFilter {
            category_id: params.category_id,
            favorites_only: params.favorites_only,
            keyword: None,
            sort: params.sort,
        }
    }
}

/// Parameters for a keyword search over recipe and ingredient names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRecipes {
    pub keyword: String,
}

/// Parameters for marking or unmarking a favourite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetFavorite {
    pub id: u64,
    pub favorite: bool,
}

/// Parameters for permanently deleting a recipe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteRecipe {
    pub id: u64,
    /// Must be true for the deletion to proceed
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for writing a backup document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportBackup {
    /// Destination JSON file
    pub path: PathBuf,
    /// Embed image files as base64 data URIs instead of paths
    #[serde(default)]
    pub embed_images: bool,
}

/// Parameters for merging a backup document into the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportBackup {
    /// Source JSON file
    pub path: PathBuf,
}

/// Parameters for opening a recipe in cooking mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartCooking {
    pub id: u64,
    /// Step numbers already completed
    #[serde(default)]
    pub completed_steps: Vec<u32>,
}

/// Trim a display name and reject it if nothing is left.
pub(crate) fn normalize_name(field: &str, name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CookbookError::invalid_input(field).with_reason("must not be empty"));
    }
    Ok(trimmed.to_string())
}
