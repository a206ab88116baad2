//! High-level async API for managing the recipe collection.
//!
//! [`Cookbook`] is the entry point for every interface. Each method opens a
//! fresh [`Database`](crate::db::Database) connection inside
//! `tokio::task::spawn_blocking`, so SQLite and file work never blocks the
//! async runtime:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Cookbook     │    │    Database     │    │     SQLite      │
//! │ (category_ops,  │───▶│ (db/*_queries)  │───▶│   + image dir   │
//! │  recipe_ops,    │    │                 │    │                 │
//! │  backup_ops)    │    │   ImageStore    │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Image files are removed only after the database change that released
//! them has committed. A crash in between leaves orphaned files behind,
//! which [`Cookbook::cleanup_images`] removes.
//!
//! # Example
//!
//! ```rust,no_run
//! use cookbook_core::{
//!     params::{CreateCategory, IngredientInput, RecipeInput, StepInput},
//!     CookbookBuilder,
//! };
//!
//! # async fn example() -> cookbook_core::Result<()> {
//! let cookbook = CookbookBuilder::new().build().await?;
//!
//! let soups = cookbook
//!     .create_category(&CreateCategory { name: "Soups".to_string() })
//!     .await?;
//!
//! let recipe = cookbook
//!     .create_recipe(&RecipeInput {
//!         name: "Miso soup".to_string(),
//!         category_id: soups.id,
//!         ingredients: vec![IngredientInput::new("Miso", "2 tbsp")],
//!         steps: vec![StepInput::new("Dissolve miso in hot dashi")],
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{recipe}");
//! # Ok(())
//! # }
//! ```

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use log::warn;

pub mod backup_ops;
pub mod builder;
pub mod category_ops;
pub mod recipe_ops;


pub use builder::CookbookBuilder;

use crate::{db::Database, images::ImageStore};

/// Main interface for managing categories, recipes and backups.
#[derive(Debug, Clone)]
pub struct Cookbook {
    pub(crate) db_path: PathBuf,
    pub(crate) images: ImageStore,
}

impl Cookbook {
    pub(crate) fn new(db_path: PathBuf, images: ImageStore) -> Self {
        Self { db_path, images }
    }

    /// Path of the SQLite database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Directory holding cover and step images.
    pub fn image_dir(&self) -> &Path {
        self.images.dir()
    }
}

/// Removes the released image files that no recipe or step refers to any
/// more. Backups restored without embedded images can leave two recipes
/// sharing one file.
pub(crate) fn release_images(db: &Database, images: &ImageStore, released: &[String]) {
    if released.is_empty() {
        return;
    }
    match db.referenced_images() {
        Ok(used) => {
            let used: HashSet<&str> = used.iter().map(String::as_str).collect();
            images.delete_all(released.iter().filter(|p| !used.contains(p.as_str())));
        }
        Err(e) => warn!(
            "Keeping {} released images, could not check references: {e}",
            released.len()
        ),
    }
}
