//! Whole-store snapshot and backup merge.

use std::collections::HashMap;

use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};

use super::{
    category_queries::{all_categories, insert_category, touch_category},
    recipe_queries::{
        ingredient_from_row, insert_recipe_row, recipe_from_row, replace_children,
        step_from_row, NewRecipe,
    },
};
use crate::{
    backup::{BackupDocument, BackupIngredient, BackupRecipe, BackupStep, ImportReport},
    error::{DatabaseResultExt, Result},
    models::{Category, Ingredient, Recipe, Step},
    params::{IngredientInput, StepInput},
};

const ALL_RECIPES_SQL: &str = "SELECT r.id, r.name, r.category_id, r.cover_image_path, r.is_favorite, r.view_count, r.created_at, r.updated_at FROM recipes r ORDER BY r.id";
const ALL_INGREDIENTS_SQL: &str =
    "SELECT id, recipe_id, name, amount, sort_order FROM ingredients ORDER BY recipe_id, sort_order, id";
const ALL_STEPS_SQL: &str = "SELECT id, recipe_id, description, image_path, step_number, sort_order FROM steps ORDER BY recipe_id, step_number, id";
const RECIPE_BY_NAME_SQL: &str = "SELECT r.id, r.name, r.category_id, r.cover_image_path, r.is_favorite, r.view_count, r.created_at, r.updated_at FROM recipes r WHERE r.category_id = ?1 AND r.name = ?2 ORDER BY r.id LIMIT 1";
const OVERWRITE_RECIPE_SQL: &str = "UPDATE recipes SET cover_image_path = ?1, is_favorite = ?2, view_count = ?3, updated_at = ?4 WHERE id = ?5";

/// Every row in the store, read in one transaction.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub categories: Vec<Category>,
    pub recipes: Vec<Recipe>,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
}

/// Resolves a document image (path, embedded data URI) to the path to store.
pub type ImageResolver<'a> = dyn FnMut(Option<&str>, Option<&str>) -> Option<String> + 'a;

fn collect_rows<T>(
    conn: &Connection,
    sql: &str,
    from_row: fn(&rusqlite::Row) -> rusqlite::Result<T>,
) -> Result<Vec<T>> {
    let mut stmt = conn.prepare(sql).db_context("Failed to prepare query")?;
    let rows = stmt
        .query_map([], from_row)
        .db_context("Failed to query snapshot")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch snapshot rows")?;
    Ok(rows)
}

fn find_recipe_by_name(conn: &Connection, category_id: u64, name: &str) -> Result<Option<Recipe>> {
    conn.query_row(
        RECIPE_BY_NAME_SQL,
        params![category_id as i64, name],
        recipe_from_row,
    )
    .optional()
    .db_context("Failed to query recipe by name")
}

/// The document's children of one recipe, in `sortOrder` order.
struct Children<'d> {
    ingredients: HashMap<u64, Vec<&'d BackupIngredient>>,
    steps: HashMap<u64, Vec<&'d BackupStep>>,
}

impl<'d> Children<'d> {
    fn index(document: &'d BackupDocument) -> Self {
        let mut ingredients: HashMap<u64, Vec<&BackupIngredient>> = HashMap::new();
        for ingredient in &document.ingredients {
            ingredients
                .entry(ingredient.recipe_id)
                .or_default()
                .push(ingredient);
        }
        for list in ingredients.values_mut() {
            list.sort_by_key(|i| i.sort_order);
        }

        let mut steps: HashMap<u64, Vec<&BackupStep>> = HashMap::new();
        for step in &document.steps {
            steps.entry(step.recipe_id).or_default().push(step);
        }
        for list in steps.values_mut() {
            list.sort_by_key(|s| (s.sort_order, s.step_number));
        }

        Self { ingredients, steps }
    }

    fn inputs_for(
        &self,
        recipe_id: u64,
        resolve: &mut ImageResolver<'_>,
    ) -> (Vec<IngredientInput>, Vec<StepInput>) {
        let ingredients = self
            .ingredients
            .get(&recipe_id)
            .map(|list| {
                list.iter()
                    .filter(|i| !i.name.trim().is_empty())
                    .map(|i| IngredientInput::new(i.name.trim(), i.amount.trim()))
                    .collect()
            })
            .unwrap_or_default();

        let steps = self
            .steps
            .get(&recipe_id)
            .map(|list| {
                list.iter()
                    .filter(|s| !s.description.trim().is_empty())
                    .map(|s| StepInput {
                        description: s.description.trim().to_string(),
                        image: resolve(s.image_path.as_deref(), s.image_base64.as_deref()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        (ingredients, steps)
    }
}

fn resolve_cover(recipe: &BackupRecipe, resolve: &mut ImageResolver<'_>) -> Option<String> {
    resolve(
        recipe.cover_image_path.as_deref(),
        recipe.cover_image_base64.as_deref(),
    )
}

impl super::Database {
    /// Reads every category, recipe, ingredient and step consistently.
    pub fn snapshot(&mut self) -> Result<Snapshot> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let snapshot = Snapshot {
            categories: all_categories(&tx)?,
            recipes: collect_rows(&tx, ALL_RECIPES_SQL, recipe_from_row)?,
            ingredients: collect_rows(&tx, ALL_INGREDIENTS_SQL, ingredient_from_row)?,
            steps: collect_rows(&tx, ALL_STEPS_SQL, step_from_row)?,
        };

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(snapshot)
    }

    /// Merges a backup document into the store in a single transaction.
    ///
    /// Categories are matched by name and recipes by name within their
    /// category. A matched record is overwritten only when the document's
    /// `updatedAt` is strictly newer; unmatched records are inserted.
    /// `resolve_image` is called only for images of recipes that are
    /// inserted or overwritten.
    pub fn merge_backup(
        &mut self,
        document: &BackupDocument,
        resolve_image: &mut ImageResolver<'_>,
    ) -> Result<ImportReport> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut report = ImportReport::default();
        let mut by_name: HashMap<String, Category> = all_categories(&tx)?
            .into_iter()
            .map(|c| (c.name.clone(), c))
            .collect();
        let mut category_ids: HashMap<u64, u64> = HashMap::new();

        for imported in &document.categories {
            let name = imported.name.trim();
            if name.is_empty() {
                warn!("Skipping backup category {} without a name", imported.id);
                continue;
            }

            if let Some(existing) = by_name.get_mut(name) {
                if imported.updated_at > existing.updated_at {
                    touch_category(&tx, existing.id, imported.updated_at)?;
                    existing.updated_at = imported.updated_at;
                    report.categories_updated += 1;
                } else {
                    report.categories_unchanged += 1;
                }
                category_ids.insert(imported.id, existing.id);
            } else {
                let created =
                    insert_category(&tx, name, imported.created_at, imported.updated_at)?;
                category_ids.insert(imported.id, created.id);
                by_name.insert(created.name.clone(), created);
                report.categories_created += 1;
            }
        }

        let children = Children::index(document);

        for imported in &document.recipes {
            let name = imported.name.trim();
            let Some(&category_id) = category_ids.get(&imported.category_id) else {
                warn!(
                    "Skipping backup recipe '{}': category {} is not in the backup",
                    imported.name, imported.category_id
                );
                report.recipes_skipped += 1;
                continue;
            };
            if name.is_empty() {
                warn!("Skipping backup recipe {} without a name", imported.id);
                report.recipes_skipped += 1;
                continue;
            }

            match find_recipe_by_name(&tx, category_id, name)? {
                Some(existing) if imported.updated_at > existing.updated_at => {
                    let cover = resolve_cover(imported, resolve_image);
                    tx.execute(
                        OVERWRITE_RECIPE_SQL,
                        params![
                            cover,
                            imported.is_favorite,
                            imported.click_count as i64,
                            imported.updated_at.as_millisecond(),
                            existing.id as i64
                        ],
                    )
                    .db_context("Failed to overwrite recipe")?;

                    let (ingredients, steps) = children.inputs_for(imported.id, resolve_image);
                    replace_children(&tx, existing.id, &ingredients, &steps)?;
                    report.recipes_updated += 1;
                }
                Some(_) => report.recipes_unchanged += 1,
                None => {
                    let cover = resolve_cover(imported, resolve_image);
                    let recipe = insert_recipe_row(
                        &tx,
                        &NewRecipe {
                            name,
                            category_id,
                            cover_image_path: cover.as_deref(),
                            is_favorite: imported.is_favorite,
                            view_count: imported.click_count,
                            created_at: imported.created_at,
                            updated_at: imported.updated_at,
                        },
                    )?;

                    let (ingredients, steps) = children.inputs_for(imported.id, resolve_image);
                    replace_children(&tx, recipe.id, &ingredients, &steps)?;
                    report.recipes_created += 1;
                }
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;

        info!(
            "Merged backup: {} categories created, {} updated; {} recipes created, {} updated, {} skipped",
            report.categories_created,
            report.categories_updated,
            report.recipes_created,
            report.recipes_updated,
            report.recipes_skipped
        );
        Ok(report)
    }
}
