//! Recipe operations for the Cookbook.

use std::collections::HashSet;

use log::{debug, info};
use tokio::task;

use super::{release_images, Cookbook};
use crate::{
    cooking::CookingSession,
    db::Database,
    error::{CookbookError, Result},
    images::{ImageStore, COVER_PREFIX, STEP_PREFIX},
    models::{Recipe, RecipeDetails, RecipeFilter, RecipeWithCategory},
    params::{
        DeleteRecipe, Id, Ids, ListRecipes, RecipeInput, SearchRecipes, SetFavorite,
        StartCooking, UpdateRecipe,
    },
};

/// Copies cover and step images that live outside the store into it.
///
/// Paths in `current` are already recorded on the recipe and pass through
/// untouched, even when the file is missing locally. Returns the input
/// rewritten to the stored paths, plus the files this call created so they
/// can be removed if the database write fails.
fn store_images(
    images: &ImageStore,
    current: &HashSet<String>,
    mut input: RecipeInput,
) -> Result<(RecipeInput, Vec<String>)> {
    let mut created = Vec::new();

    let slots = input
        .cover_image
        .iter_mut()
        .map(|path| (path, COVER_PREFIX))
        .chain(
            input
                .steps
                .iter_mut()
                .filter_map(|s| s.image.as_mut())
                .map(|path| (path, STEP_PREFIX)),
        );

    for (path, prefix) in slots {
        if current.contains(path.as_str()) {
            continue;
        }
        match images.adopt(path, prefix) {
            Ok(stored) => {
                if stored != *path {
                    created.push(stored.clone());
                    *path = stored;
                }
            }
            Err(e) => {
                images.delete_all(&created);
                return Err(e);
            }
        }
    }

    Ok((input, created))
}

/// Saves a recipe through `write`, undoing freshly stored images on failure.
fn write_with_images<T>(
    images: &ImageStore,
    current: &HashSet<String>,
    input: RecipeInput,
    write: impl FnOnce(&RecipeInput) -> Result<T>,
) -> Result<T> {
    let (input, created) = store_images(images, current, input)?;
    write(&input).inspect_err(|_| images.delete_all(&created))
}

impl Cookbook {
    /// Creates a recipe with its ingredients and steps.
    ///
    /// Image paths outside the image directory are copied into it.
    pub async fn create_recipe(&self, params: &RecipeInput) -> Result<RecipeDetails> {
        let input = params.normalized()?;
        let db_path = self.db_path.clone();
        let images = self.images.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let details = write_with_images(&images, &HashSet::new(), input, |input| {
                db.create_recipe(input)
            })?;
            info!("Created recipe '{}' ({})", details.recipe.name, details.recipe.id);
            Ok(details)
        })
        .await
        .map_err(|e| CookbookError::join(&e))?
    }

    /// Retrieves a recipe with its ingredients and steps.
    pub async fn get_recipe(&self, params: &Id) -> Result<Option<RecipeDetails>> {
        let db_path = self.db_path.clone();
        let id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_recipe(id)
        })
        .await
        .map_err(|e| CookbookError::join(&e))?
    }

    /// Opens a recipe for reading, counting the view.
    pub async fn view_recipe(&self, params: &Id) -> Result<RecipeDetails> {
        let db_path = self.db_path.clone();
        let id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.increment_view_count(id)?;
            db.get_recipe(id)?
                .ok_or(CookbookError::RecipeNotFound { id })
        })
        .await
        .map_err(|e| CookbookError::join(&e))?
    }

    async fn query_recipes(&self, filter: RecipeFilter) -> Result<Vec<RecipeWithCategory>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_recipes(&filter)
        })
        .await
        .map_err(|e| CookbookError::join(&e))?
    }

    /// Lists recipes, optionally restricted to a category or favourites.
    pub async fn list_recipes(&self, params: &ListRecipes) -> Result<Vec<RecipeWithCategory>> {
        self.query_recipes(RecipeFilter::from(params)).await
    }

    /// Finds recipes whose name or any ingredient name contains the keyword.
    pub async fn search_recipes(&self, params: &SearchRecipes) -> Result<Vec<RecipeWithCategory>> {
        let filter = RecipeFilter::search(&params.keyword);
        if filter.keyword.is_none() {
            return Err(CookbookError::invalid_input("keyword").with_reason("must not be empty"));
        }
        self.query_recipes(filter).await
    }

    /// Lists favourite recipes, newest first.
    pub async fn list_favorites(&self) -> Result<Vec<RecipeWithCategory>> {
        self.query_recipes(RecipeFilter::favorites()).await
    }

    /// Replaces a recipe's content, ingredients and steps.
    ///
    /// Image files referenced by the old version but not the new one are
    /// removed after the update commits.
    pub async fn update_recipe(&self, params: &UpdateRecipe) -> Result<RecipeDetails> {
        let input = params.recipe.normalized()?;
        let db_path = self.db_path.clone();
        let images = self.images.clone();
        let id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let current: HashSet<String> = db
                .get_recipe(id)?
                .ok_or(CookbookError::RecipeNotFound { id })?
                .image_paths()
                .into_iter()
                .collect();
            let (before, after) = write_with_images(&images, &current, input, |input| {
                db.update_recipe(id, input)
            })?;

            let kept: HashSet<String> = after.image_paths().into_iter().collect();
            let released: Vec<String> = before
                .image_paths()
                .into_iter()
                .filter(|p| !kept.contains(p))
                .collect();
            debug!("Recipe {id} released {} images", released.len());
            release_images(&db, &images, &released);

            Ok(after)
        })
        .await
        .map_err(|e| CookbookError::join(&e))?
    }

    /// Marks or unmarks a recipe as favourite.
    pub async fn set_favorite(&self, params: &SetFavorite) -> Result<Recipe> {
        let db_path = self.db_path.clone();
        let id = params.id;
        let favorite = params.favorite;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.set_favorite(id, favorite)
        })
        .await
        .map_err(|e| CookbookError::join(&e))?
    }

    /// Permanently deletes a recipe and its image files.
    ///
    /// # Errors
    ///
    /// Returns `CookbookError::InvalidInput` unless `confirmed` is set, and
    /// `CookbookError::RecipeNotFound` if the recipe does not exist.
    pub async fn delete_recipe(&self, params: &DeleteRecipe) -> Result<RecipeDetails> {
        if !params.confirmed {
            return Err(CookbookError::invalid_input("confirmed").with_reason(
                "Recipe deletion cannot be undone. Set 'confirmed' to true to proceed.",
            ));
        }

        let db_path = self.db_path.clone();
        let images = self.images.clone();
        let id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let details = db.delete_recipe(id)?;
            release_images(&db, &images, &details.image_paths());
            Ok(details)
        })
        .await
        .map_err(|e| CookbookError::join(&e))?
    }

    /// Deletes several recipes at once; unknown IDs are ignored.
    pub async fn delete_recipes(&self, params: &Ids) -> Result<Vec<RecipeDetails>> {
        let db_path = self.db_path.clone();
        let images = self.images.clone();
        let ids = params.ids.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let deleted = db.delete_recipes(&ids)?;
            let released: Vec<String> =
                deleted.iter().flat_map(RecipeDetails::image_paths).collect();
            release_images(&db, &images, &released);
            Ok(deleted)
        })
        .await
        .map_err(|e| CookbookError::join(&e))?
    }

    /// Removes image files that no recipe or step references any more.
    ///
    /// Returns the number of files removed.
    pub async fn cleanup_images(&self) -> Result<usize> {
        let db_path = self.db_path.clone();
        let images = self.images.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let used = db.referenced_images()?;
            images.cleanup_orphans(&used)
        })
        .await
        .map_err(|e| CookbookError::join(&e))?
    }

    /// Opens a recipe in cooking mode with some steps already done.
    pub async fn start_cooking(&self, params: &StartCooking) -> Result<CookingSession> {
        let details = self
            .get_recipe(&Id { id: params.id })
            .await?
            .ok_or(CookbookError::RecipeNotFound { id: params.id })?;
        CookingSession::with_completed(details, &params.completed_steps)
    }
}
