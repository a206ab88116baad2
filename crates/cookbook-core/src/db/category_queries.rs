//! Category CRUD operations and queries.

use log::debug;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use super::{id_column, now, timestamp_column};
use crate::{
    error::{CookbookError, DatabaseResultExt, Result},
    models::{Category, CategorySort, CategoryWithCount},
    params::normalize_name,
};

const CATEGORY_COLUMNS: &str = "id, name, sort_order, created_at, updated_at";
const INSERT_CATEGORY_SQL: &str =
    "INSERT INTO categories (name, sort_order, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)";
const NEXT_SORT_ORDER_SQL: &str = "SELECT COALESCE(MAX(sort_order), 0) + 1 FROM categories";
const UPDATE_CATEGORY_NAME_SQL: &str =
    "UPDATE categories SET name = ?1, updated_at = ?2 WHERE id = ?3";
const UPDATE_CATEGORY_TIMESTAMP_SQL: &str = "UPDATE categories SET updated_at = ?1 WHERE id = ?2";
const UPDATE_SORT_ORDER_SQL: &str = "UPDATE categories SET sort_order = ?1 WHERE id = ?2";
const DELETE_CATEGORY_SQL: &str = "DELETE FROM categories WHERE id = ?1";
const CATEGORY_IMAGES_SQL: &str = "
    SELECT r.cover_image_path FROM recipes r
    WHERE r.category_id = ?1 AND r.cover_image_path IS NOT NULL
    UNION ALL
    SELECT s.image_path FROM steps s JOIN recipes r ON r.id = s.recipe_id
    WHERE r.category_id = ?1 AND s.image_path IS NOT NULL";
const CATEGORIES_WITH_COUNT_SQL: &str = "
    SELECT c.id, c.name, c.sort_order, c.created_at, c.updated_at, COUNT(r.id) AS recipe_count
    FROM categories c
    LEFT JOIN recipes r ON r.category_id = c.id
    GROUP BY c.id";

/// Constructs a Category from a row selected with [`CATEGORY_COLUMNS`].
pub(crate) fn category_from_row(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: id_column(row, 0)?,
        name: row.get(1)?,
        sort_order: row.get(2)?,
        created_at: timestamp_column(row, 3)?,
        updated_at: timestamp_column(row, 4)?,
    })
}

pub(crate) fn find_category(conn: &Connection, id: u64) -> Result<Option<Category>> {
    conn.query_row(
        &format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ?1"),
        params![id as i64],
        category_from_row,
    )
    .optional()
    .db_context("Failed to query category")
}

pub(crate) fn find_category_by_name(conn: &Connection, name: &str) -> Result<Option<Category>> {
    conn.query_row(
        &format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE name = ?1"),
        params![name],
        category_from_row,
    )
    .optional()
    .db_context("Failed to query category by name")
}

pub(crate) fn all_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY sort_order, id"
        ))
        .db_context("Failed to prepare query")?;

    let rows = stmt
        .query_map([], category_from_row)
        .db_context("Failed to query categories")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch categories")?;
    Ok(rows)
}

/// Inserts a category row at the end of the manual ordering.
pub(crate) fn insert_category(
    conn: &Connection,
    name: &str,
    created_at: jiff::Timestamp,
    updated_at: jiff::Timestamp,
) -> Result<Category> {
    let sort_order: i64 = conn
        .query_row(NEXT_SORT_ORDER_SQL, [], |row| row.get(0))
        .db_context("Failed to get next sort order")?;

    conn.execute(
        INSERT_CATEGORY_SQL,
        params![
            name,
            sort_order,
            created_at.as_millisecond(),
            updated_at.as_millisecond()
        ],
    )
    .db_context("Failed to insert category")?;

    Ok(Category {
        id: conn.last_insert_rowid() as u64,
        name: name.to_string(),
        sort_order,
        created_at,
        updated_at,
    })
}

pub(crate) fn touch_category(conn: &Connection, id: u64, updated_at: jiff::Timestamp) -> Result<()> {
    conn.execute(
        UPDATE_CATEGORY_TIMESTAMP_SQL,
        params![updated_at.as_millisecond(), id as i64],
    )
    .db_context("Failed to update category timestamp")?;
    Ok(())
}

/// Image paths owned by every recipe of a category.
fn category_image_paths(conn: &Connection, id: u64) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare(CATEGORY_IMAGES_SQL)
        .db_context("Failed to prepare query")?;

    let rows = stmt
        .query_map(params![id as i64], |row| row.get::<_, String>(0))
        .db_context("Failed to query category images")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch category images")?;
    Ok(rows)
}

impl super::Database {
    /// Creates a category with a unique name, placed after all existing ones.
    pub fn create_category(&mut self, name: &str) -> Result<Category> {
        let name = normalize_name("name", name)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if find_category_by_name(&tx, &name)?.is_some() {
            return Err(CookbookError::DuplicateCategory { name });
        }

        let now = now();
        let category = insert_category(&tx, &name, now, now)?;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Created category {} ({})", category.id, category.name);
        Ok(category)
    }

    /// Retrieves a category by its ID.
    pub fn get_category(&self, id: u64) -> Result<Option<Category>> {
        find_category(&self.connection, id)
    }

    /// Retrieves a category by its exact name.
    pub fn get_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        find_category_by_name(&self.connection, name.trim())
    }

    /// Lists all categories with their recipe counts.
    pub fn list_categories(&self, sort: CategorySort) -> Result<Vec<CategoryWithCount>> {
        let query = format!("{CATEGORIES_WITH_COUNT_SQL} ORDER BY {}", sort.order_by());

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map([], |row| {
                Ok(CategoryWithCount {
                    category: category_from_row(row)?,
                    recipe_count: row.get::<_, i64>(5)? as u32,
                })
            })
            .db_context("Failed to query categories")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch categories")?;
        Ok(rows)
    }

    /// Renames a category. The new name must not belong to another category.
    pub fn rename_category(&mut self, id: u64, name: &str) -> Result<Category> {
        let name = normalize_name("name", name)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut category = find_category(&tx, id)?.ok_or(CookbookError::CategoryNotFound { id })?;

        if let Some(existing) = find_category_by_name(&tx, &name)? {
            if existing.id != id {
                return Err(CookbookError::DuplicateCategory { name });
            }
        }

        let now = now();
        tx.execute(
            UPDATE_CATEGORY_NAME_SQL,
            params![&name, now.as_millisecond(), id as i64],
        )
        .db_context("Failed to rename category")?;

        tx.commit().db_context("Failed to commit transaction")?;

        category.name = name;
        category.updated_at = now;
        Ok(category)
    }

    /// Moves the listed categories to the front, in the given order.
    ///
    /// Unlisted categories follow in their current order, and every category
    /// is renumbered from 1. Fails without changing anything if any ID does
    /// not exist or appears twice.
    pub fn reorder_categories(&mut self, ids: &[u64]) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = ids.iter().find(|id| !seen.insert(**id)) {
            return Err(CookbookError::invalid_input("ids")
                .with_reason(format!("category {dup} is listed more than once")));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current = all_categories(&tx)?;
        if let Some(missing) = ids.iter().find(|id| !current.iter().any(|c| c.id == **id)) {
            return Err(CookbookError::CategoryNotFound { id: *missing });
        }

        let rest = current.iter().map(|c| c.id).filter(|id| !seen.contains(id));
        for (position, id) in ids.iter().copied().chain(rest).enumerate() {
            tx.execute(UPDATE_SORT_ORDER_SQL, params![position as i64 + 1, id as i64])
                .db_context("Failed to update category order")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Permanently deletes a category together with all of its recipes.
    ///
    /// Returns the deleted category and the image paths its recipes
    /// referenced, so the caller can remove the files.
    pub fn delete_category(&mut self, id: u64) -> Result<(Category, Vec<String>)> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let category = find_category(&tx, id)?.ok_or(CookbookError::CategoryNotFound { id })?;
        let images = category_image_paths(&tx, id)?;

        // Recipes, ingredients and steps go with it via ON DELETE CASCADE
        tx.execute(DELETE_CATEGORY_SQL, params![id as i64])
            .db_context("Failed to delete category")?;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Deleted category {id} and {} image references", images.len());
        Ok((category, images))
    }

    /// Deletes every listed category that exists; unknown IDs are ignored.
    pub fn delete_categories(&mut self, ids: &[u64]) -> Result<(Vec<Category>, Vec<String>)> {
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut deleted = Vec::new();
        let mut images = Vec::new();
        for id in &ids {
            if let Some(category) = find_category(&tx, *id)? {
                images.extend(category_image_paths(&tx, *id)?);
                deleted.push(category);
            }
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        tx.execute(
            &format!("DELETE FROM categories WHERE id IN ({placeholders})"),
            params_from_iter(ids.iter().map(|id| *id as i64)),
        )
        .db_context("Failed to delete categories")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok((deleted, images))
    }
}
