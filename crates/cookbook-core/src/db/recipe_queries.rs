//! Recipe CRUD operations and queries, including ingredients and steps.
//!
//! Ingredients and steps have no identity of their own from the caller's
//! point of view: every save deletes a recipe's lists and inserts them again
//! in the order given.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};

use super::{category_queries::find_category, id_column, like_pattern, now, timestamp_column};
use crate::{
    error::{CookbookError, DatabaseResultExt, Result},
    models::{Ingredient, Recipe, RecipeDetails, RecipeFilter, RecipeWithCategory, Step},
    params::{IngredientInput, RecipeInput, StepInput},
};

const RECIPE_COLUMNS: &str = "r.id, r.name, r.category_id, r.cover_image_path, r.is_favorite, \
                              r.view_count, r.created_at, r.updated_at";
const INSERT_RECIPE_SQL: &str = "INSERT INTO recipes (name, category_id, cover_image_path, is_favorite, view_count, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const UPDATE_RECIPE_SQL: &str = "UPDATE recipes SET name = ?1, category_id = ?2, cover_image_path = ?3, is_favorite = ?4, updated_at = ?5 WHERE id = ?6";
const INSERT_INGREDIENT_SQL: &str =
    "INSERT INTO ingredients (recipe_id, name, amount, sort_order) VALUES (?1, ?2, ?3, ?4)";
const INSERT_STEP_SQL: &str = "INSERT INTO steps (recipe_id, description, image_path, step_number, sort_order) VALUES (?1, ?2, ?3, ?4, ?5)";
const DELETE_INGREDIENTS_SQL: &str = "DELETE FROM ingredients WHERE recipe_id = ?1";
const DELETE_STEPS_SQL: &str = "DELETE FROM steps WHERE recipe_id = ?1";
const DELETE_RECIPE_SQL: &str = "DELETE FROM recipes WHERE id = ?1";
const SELECT_INGREDIENTS_SQL: &str = "SELECT id, recipe_id, name, amount, sort_order FROM ingredients WHERE recipe_id = ?1 ORDER BY sort_order, id";
const SELECT_STEPS_SQL: &str = "SELECT id, recipe_id, description, image_path, step_number, sort_order FROM steps WHERE recipe_id = ?1 ORDER BY step_number, id";
const INCREMENT_VIEW_COUNT_SQL: &str = "UPDATE recipes SET view_count = view_count + 1 WHERE id = ?1";
const UPDATE_FAVORITE_SQL: &str = "UPDATE recipes SET is_favorite = ?1 WHERE id = ?2";

/// Constructs a Recipe from a row selected with [`RECIPE_COLUMNS`].
pub(crate) fn recipe_from_row(row: &Row) -> rusqlite::Result<Recipe> {
    Ok(Recipe {
        id: id_column(row, 0)?,
        name: row.get(1)?,
        category_id: id_column(row, 2)?,
        cover_image_path: row.get(3)?,
        is_favorite: row.get(4)?,
        view_count: row.get::<_, i64>(5)? as u32,
        created_at: timestamp_column(row, 6)?,
        updated_at: timestamp_column(row, 7)?,
    })
}

pub(crate) fn ingredient_from_row(row: &Row) -> rusqlite::Result<Ingredient> {
    Ok(Ingredient {
        id: id_column(row, 0)?,
        recipe_id: id_column(row, 1)?,
        name: row.get(2)?,
        amount: row.get(3)?,
        sort_order: row.get::<_, i64>(4)? as u32,
    })
}

pub(crate) fn step_from_row(row: &Row) -> rusqlite::Result<Step> {
    Ok(Step {
        id: id_column(row, 0)?,
        recipe_id: id_column(row, 1)?,
        description: row.get(2)?,
        image_path: row.get(3)?,
        step_number: row.get::<_, i64>(4)? as u32,
        sort_order: row.get::<_, i64>(5)? as u32,
    })
}

/// Column values for a new recipe row.
pub(crate) struct NewRecipe<'a> {
    pub name: &'a str,
    pub category_id: u64,
    pub cover_image_path: Option<&'a str>,
    pub is_favorite: bool,
    pub view_count: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

pub(crate) fn insert_recipe_row(conn: &Connection, recipe: &NewRecipe<'_>) -> Result<Recipe> {
    conn.execute(
        INSERT_RECIPE_SQL,
        params![
            recipe.name,
            recipe.category_id as i64,
            recipe.cover_image_path,
            recipe.is_favorite,
            recipe.view_count as i64,
            recipe.created_at.as_millisecond(),
            recipe.updated_at.as_millisecond()
        ],
    )
    .db_context("Failed to insert recipe")?;

    Ok(Recipe {
        id: conn.last_insert_rowid() as u64,
        name: recipe.name.to_string(),
        category_id: recipe.category_id,
        cover_image_path: recipe.cover_image_path.map(String::from),
        is_favorite: recipe.is_favorite,
        view_count: recipe.view_count,
        created_at: recipe.created_at,
        updated_at: recipe.updated_at,
    })
}

/// Deletes a recipe's ingredients and steps and inserts the given lists.
///
/// `sort_order` is the index in each list; `step_number` is that index
/// plus one.
pub(crate) fn replace_children(
    conn: &Connection,
    recipe_id: u64,
    ingredients: &[IngredientInput],
    steps: &[StepInput],
) -> Result<()> {
    conn.execute(DELETE_INGREDIENTS_SQL, params![recipe_id as i64])
        .db_context("Failed to delete ingredients")?;
    conn.execute(DELETE_STEPS_SQL, params![recipe_id as i64])
        .db_context("Failed to delete steps")?;

    let mut insert_ingredient = conn
        .prepare_cached(INSERT_INGREDIENT_SQL)
        .db_context("Failed to prepare ingredient insert")?;
    for (index, ingredient) in ingredients.iter().enumerate() {
        insert_ingredient
            .execute(params![
                recipe_id as i64,
                &ingredient.name,
                &ingredient.amount,
                index as i64
            ])
            .db_context("Failed to insert ingredient")?;
    }

    let mut insert_step = conn
        .prepare_cached(INSERT_STEP_SQL)
        .db_context("Failed to prepare step insert")?;
    for (index, step) in steps.iter().enumerate() {
        insert_step
            .execute(params![
                recipe_id as i64,
                &step.description,
                step.image.as_deref(),
                index as i64 + 1,
                index as i64
            ])
            .db_context("Failed to insert step")?;
    }

    Ok(())
}

pub(crate) fn find_recipe(conn: &Connection, id: u64) -> Result<Option<Recipe>> {
    conn.query_row(
        &format!("SELECT {RECIPE_COLUMNS} FROM recipes r WHERE r.id = ?1"),
        params![id as i64],
        recipe_from_row,
    )
    .optional()
    .db_context("Failed to query recipe")
}

pub(crate) fn ingredients_for(conn: &Connection, recipe_id: u64) -> Result<Vec<Ingredient>> {
    let mut stmt = conn
        .prepare_cached(SELECT_INGREDIENTS_SQL)
        .db_context("Failed to prepare query")?;

    let rows = stmt
        .query_map(params![recipe_id as i64], ingredient_from_row)
        .db_context("Failed to query ingredients")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch ingredients")?;
    Ok(rows)
}

pub(crate) fn steps_for(conn: &Connection, recipe_id: u64) -> Result<Vec<Step>> {
    let mut stmt = conn
        .prepare_cached(SELECT_STEPS_SQL)
        .db_context("Failed to prepare query")?;

    let rows = stmt
        .query_map(params![recipe_id as i64], step_from_row)
        .db_context("Failed to query steps")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch steps")?;
    Ok(rows)
}

/// Loads a recipe with its category name, ingredients and steps.
pub(crate) fn find_details(conn: &Connection, id: u64) -> Result<Option<RecipeDetails>> {
    let row = conn
        .query_row(
            &format!(
                "SELECT {RECIPE_COLUMNS}, c.name FROM recipes r \
                 JOIN categories c ON c.id = r.category_id WHERE r.id = ?1"
            ),
            params![id as i64],
            |row| Ok((recipe_from_row(row)?, row.get::<_, String>(8)?)),
        )
        .optional()
        .db_context("Failed to query recipe")?;

    let Some((recipe, category_name)) = row else {
        return Ok(None);
    };

    Ok(Some(RecipeDetails {
        ingredients: ingredients_for(conn, recipe.id)?,
        steps: steps_for(conn, recipe.id)?,
        recipe,
        category_name,
    }))
}

fn require_category(conn: &Connection, category_id: u64) -> Result<()> {
    match find_category(conn, category_id)? {
        Some(_) => Ok(()),
        None => Err(CookbookError::CategoryNotFound { id: category_id }),
    }
}

impl super::Database {
    /// Creates a recipe with its ingredients and steps in one transaction.
    ///
    /// The input is expected to be normalized already (see
    /// [`RecipeInput::normalized`]); image fields are stored as given.
    pub fn create_recipe(&mut self, input: &RecipeInput) -> Result<RecipeDetails> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        require_category(&tx, input.category_id)?;

        let now = now();
        let recipe = insert_recipe_row(
            &tx,
            &NewRecipe {
                name: &input.name,
                category_id: input.category_id,
                cover_image_path: input.cover_image.as_deref(),
                is_favorite: input.is_favorite,
                view_count: 0,
                created_at: now,
                updated_at: now,
            },
        )?;
        replace_children(&tx, recipe.id, &input.ingredients, &input.steps)?;

        let details = find_details(&tx, recipe.id)?.ok_or(CookbookError::RecipeNotFound {
            id: recipe.id,
        })?;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!(
            "Created recipe {} with {} ingredients and {} steps",
            details.recipe.id,
            details.ingredients.len(),
            details.steps.len()
        );
        Ok(details)
    }

    /// Retrieves a recipe with its ingredients and steps.
    pub fn get_recipe(&self, id: u64) -> Result<Option<RecipeDetails>> {
        find_details(&self.connection, id)
    }

    /// Lists recipes matching the filter, with their category names.
    pub fn list_recipes(&self, filter: &RecipeFilter) -> Result<Vec<RecipeWithCategory>> {
        let mut query = format!(
            "SELECT {RECIPE_COLUMNS}, c.name FROM recipes r \
             JOIN categories c ON c.id = r.category_id"
        );

        let mut conditions: Vec<&str> = Vec::new();
        let mut params_vec: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(category_id) = filter.category_id {
            conditions.push("r.category_id = ?");
            params_vec.push(Box::new(category_id as i64));
        }

        if filter.favorites_only {
            conditions.push("r.is_favorite = 1");
        }

        if let Some(keyword) = filter.keyword.as_deref().filter(|k| !k.is_empty()) {
            conditions.push(
                "(r.name LIKE ? ESCAPE '\\' OR EXISTS (SELECT 1 FROM ingredients i \
                 WHERE i.recipe_id = r.id AND i.name LIKE ? ESCAPE '\\'))",
            );
            let pattern = like_pattern(keyword);
            params_vec.push(Box::new(pattern.clone()));
            params_vec.push(Box::new(pattern));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY ");
        query.push_str(filter.sort.order_by());

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|b| &**b).collect();

        let rows = stmt
            .query_map(&params_refs[..], |row| {
                Ok(RecipeWithCategory {
                    recipe: recipe_from_row(row)?,
                    category_name: row.get(8)?,
                })
            })
            .db_context("Failed to query recipes")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch recipes")?;
        Ok(rows)
    }

    /// Replaces a recipe's content, including its ingredient and step lists.
    ///
    /// Returns the recipe as it was before the update and as it is after, so
    /// the caller can tell which images are no longer referenced.
    pub fn update_recipe(
        &mut self,
        id: u64,
        input: &RecipeInput,
    ) -> Result<(RecipeDetails, RecipeDetails)> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let before = find_details(&tx, id)?.ok_or(CookbookError::RecipeNotFound { id })?;
        require_category(&tx, input.category_id)?;

        tx.execute(
            UPDATE_RECIPE_SQL,
            params![
                &input.name,
                input.category_id as i64,
                input.cover_image.as_deref(),
                input.is_favorite,
                now().as_millisecond(),
                id as i64
            ],
        )
        .db_context("Failed to update recipe")?;
        replace_children(&tx, id, &input.ingredients, &input.steps)?;

        let after = find_details(&tx, id)?.ok_or(CookbookError::RecipeNotFound { id })?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok((before, after))
    }

    /// Permanently deletes a recipe, returning what was deleted.
    pub fn delete_recipe(&mut self, id: u64) -> Result<RecipeDetails> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let details = find_details(&tx, id)?.ok_or(CookbookError::RecipeNotFound { id })?;

        // Ingredients and steps go with it via ON DELETE CASCADE
        tx.execute(DELETE_RECIPE_SQL, params![id as i64])
            .db_context("Failed to delete recipe")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(details)
    }

    /// Deletes every listed recipe that exists; unknown IDs are ignored.
    pub fn delete_recipes(&mut self, ids: &[u64]) -> Result<Vec<RecipeDetails>> {
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut deleted = Vec::new();
        for id in ids {
            if let Some(details) = find_details(&tx, id)? {
                tx.execute(DELETE_RECIPE_SQL, params![id as i64])
                    .db_context("Failed to delete recipe")?;
                deleted.push(details);
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(deleted)
    }

    /// Records one more view of a recipe.
    pub fn increment_view_count(&mut self, id: u64) -> Result<()> {
        let updated = self
            .connection
            .execute(INCREMENT_VIEW_COUNT_SQL, params![id as i64])
            .db_context("Failed to update view count")?;
        if updated == 0 {
            return Err(CookbookError::RecipeNotFound { id });
        }
        Ok(())
    }

    /// Marks or unmarks a recipe as favourite.
    pub fn set_favorite(&mut self, id: u64, favorite: bool) -> Result<Recipe> {
        let updated = self
            .connection
            .execute(UPDATE_FAVORITE_SQL, params![favorite, id as i64])
            .db_context("Failed to update favorite flag")?;
        if updated == 0 {
            return Err(CookbookError::RecipeNotFound { id });
        }
        find_recipe(&self.connection, id)?.ok_or(CookbookError::RecipeNotFound { id })
    }

    /// Every image path referenced by any recipe cover or step.
    pub fn referenced_images(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare(
                "SELECT cover_image_path FROM recipes WHERE cover_image_path IS NOT NULL \
                 UNION SELECT image_path FROM steps WHERE image_path IS NOT NULL",
            )
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .db_context("Failed to query image paths")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch image paths")?;
        Ok(rows)
    }
}
