//! Category operations for the Cookbook.

use log::info;
use tokio::task;

use super::{release_images, Cookbook};
use crate::{
    db::Database,
    error::{CookbookError, Result},
    models::{Category, CategoryWithCount},
    params::{CreateCategory, DeleteCategory, Id, Ids, ListCategories, RenameCategory, ReorderCategories},
};

impl Cookbook {
    /// Creates a category placed after all existing ones.
    pub async fn create_category(&self, params: &CreateCategory) -> Result<Category> {
        let db_path = self.db_path.clone();
        let name = params.name.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_category(&name)
        })
        .await
        .map_err(|e| CookbookError::join(&e))?
    }

    /// Retrieves a category by its ID.
    pub async fn get_category(&self, params: &Id) -> Result<Option<Category>> {
        let db_path = self.db_path.clone();
        let id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_category(id)
        })
        .await
        .map_err(|e| CookbookError::join(&e))?
    }

    /// Lists all categories with their recipe counts.
    pub async fn list_categories(&self, params: &ListCategories) -> Result<Vec<CategoryWithCount>> {
        let db_path = self.db_path.clone();
        let sort = params.sort;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_categories(sort)
        })
        .await
        .map_err(|e| CookbookError::join(&e))?
    }

    /// Renames a category, keeping names unique.
    pub async fn rename_category(&self, params: &RenameCategory) -> Result<Category> {
        let db_path = self.db_path.clone();
        let id = params.id;
        let name = params.name.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.rename_category(id, &name)
        })
        .await
        .map_err(|e| CookbookError::join(&e))?
    }

    /// Moves the listed categories to the front in the given order and
    /// returns the resulting manual ordering.
    ///
    /// Categories not listed keep their relative order after the listed
    /// ones.
    pub async fn reorder_categories(
        &self,
        params: &ReorderCategories,
    ) -> Result<Vec<CategoryWithCount>> {
        let db_path = self.db_path.clone();
        let ids = params.ids.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.reorder_categories(&ids)?;
            db.list_categories(Default::default())
        })
        .await
        .map_err(|e| CookbookError::join(&e))?
    }

    /// Permanently deletes a category with all of its recipes and their
    /// image files.
    ///
    /// # Errors
    ///
    /// Returns `CookbookError::InvalidInput` unless `confirmed` is set, and
    /// `CookbookError::CategoryNotFound` if the category does not exist.
    pub async fn delete_category(&self, params: &DeleteCategory) -> Result<Category> {
        if !params.confirmed {
            return Err(CookbookError::invalid_input("confirmed").with_reason(
                "Deleting a category also deletes all of its recipes. Set 'confirmed' to true to proceed.",
            ));
        }

        let db_path = self.db_path.clone();
        let images = self.images.clone();
        let id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let (category, image_paths) = db.delete_category(id)?;
            release_images(&db, &images, &image_paths);
            info!("Deleted category '{}' ({id})", category.name);
            Ok(category)
        })
        .await
        .map_err(|e| CookbookError::join(&e))?
    }

    /// Deletes several categories at once; unknown IDs are ignored.
    pub async fn delete_categories(&self, params: &Ids) -> Result<Vec<Category>> {
        let db_path = self.db_path.clone();
        let images = self.images.clone();
        let ids = params.ids.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let (deleted, image_paths) = db.delete_categories(&ids)?;
            release_images(&db, &images, &image_paths);
            Ok(deleted)
        })
        .await
        .map_err(|e| CookbookError::join(&e))?
    }
}
