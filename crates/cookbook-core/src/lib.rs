//! Core library for the Cookbook recipe manager.
//!
//! This crate stores categories and recipes (with ingredients, steps and
//! image files) in a local SQLite database and moves collections between
//! machines as JSON backups.
//!
//! # Layout
//!
//! - [`cookbook`]: the async [`Cookbook`] facade every interface goes through
//! - [`db`]: SQLite schema, migrations and queries
//! - [`models`] and [`params`]: stored rows and operation inputs
//! - [`images`]: the image directory and base64 data URIs
//! - [`backup`]: the JSON backup document
//! - [`parse`]: free-text ingredient and step lists
//! - [`cooking`]: step-by-step cooking mode
//! - [`display`]: markdown rendering of all of the above
//!
//! # Quick Start
//!
//! ```rust
//! use cookbook_core::{
//!     parse::{parse_ingredients, parse_steps},
//!     params::{CreateCategory, RecipeInput, SearchRecipes},
//!     CookbookBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let cookbook = CookbookBuilder::new()
//!     .with_database_path(Some(dir.path().join("cookbook.db")))
//!     .build()
//!     .await?;
//!
//! let breakfast = cookbook
//!     .create_category(&CreateCategory { name: "Breakfast".to_string() })
//!     .await?;
//!
//! cookbook
//!     .create_recipe(&RecipeInput {
//!         name: "Pancakes".to_string(),
//!         category_id: breakfast.id,
//!         ingredients: parse_ingredients("flour 200g, milk 300ml, egg 1"),
//!         steps: parse_steps("1. Whisk\n2. Rest 10 minutes\n3. Fry"),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let found = cookbook
//!     .search_recipes(&SearchRecipes { keyword: "milk".to_string() })
//!     .await?;
//! assert_eq!(found.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod backup;
pub mod cookbook;
pub mod cooking;
pub mod db;
pub mod display;
pub mod error;
pub mod images;
pub mod models;
pub mod params;
pub mod parse;

// Re-export commonly used types
pub use backup::{BackupDocument, ExportSummary, ImportReport};
pub use cookbook::{Cookbook, CookbookBuilder};
pub use cooking::CookingSession;
pub use db::Database;
pub use display::{
    CategoryList, CreateResult, DeleteResult, LocalDateTime, OperationStatus, RecipeList,
    UpdateResult,
};
pub use error::{CookbookError, Result};
pub use images::ImageStore;
pub use models::{
    Category, CategorySort, CategoryWithCount, Ingredient, Recipe, RecipeDetails, RecipeFilter,
    RecipeSort, RecipeWithCategory, Step,
};
pub use params::{IngredientInput, RecipeInput, StepInput};
