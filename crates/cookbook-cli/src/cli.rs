//! Command-line interface definitions and command handlers
//!
//! Every command has a clap argument struct that converts into the
//! matching core parameter type, so the core crate stays free of clap:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Cookbook → Display → Renderer
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use cookbook_core::{
    display::{
        CategoryList, CreateResult, DeleteResult, OperationStatus, RecipeList, UpdateResult,
    },
    models::{CategorySort, RecipeDetails, RecipeSort},
    params::*,
    parse::{parse_ingredients, parse_steps},
    Cookbook,
};
use log::debug;

use crate::renderer::TerminalRenderer;

// ============================================================================
// Category arguments
// ============================================================================

/// Create a new category
#[derive(Args)]
pub struct AddCategoryArgs {
    /// Name of the category, unique across the cookbook
    pub name: String,
}

impl From<AddCategoryArgs> for CreateCategory {
    fn from(val: AddCategoryArgs) -> Self {
        CreateCategory { name: val.name }
    }
}

/// List categories with their recipe counts
#[derive(Args)]
pub struct ListCategoriesArgs {
    #[arg(short, long, value_enum, default_value_t = CategorySortArg::Manual)]
    pub sort: CategorySortArg,
}

impl From<ListCategoriesArgs> for ListCategories {
    fn from(val: ListCategoriesArgs) -> Self {
        ListCategories {
            sort: val.sort.into(),
        }
    }
}

/// Rename a category
#[derive(Args)]
pub struct RenameCategoryArgs {
    #[arg(help = "Unique identifier of the category to rename")]
    pub id: u64,
    /// New name of the category
    pub name: String,
}

impl From<RenameCategoryArgs> for RenameCategory {
    fn from(val: RenameCategoryArgs) -> Self {
        RenameCategory {
            id: val.id,
            name: val.name,
        }
    }
}

/// Move categories to the front of the manual order
///
/// The listed categories come first in the given order; all others keep
/// their relative order behind them.
#[derive(Args)]
pub struct ReorderCategoriesArgs {
    #[arg(required = true, num_args = 1.., help = "Category IDs in the desired order")]
    pub ids: Vec<u64>,
}

impl From<ReorderCategoriesArgs> for ReorderCategories {
    fn from(val: ReorderCategoriesArgs) -> Self {
        ReorderCategories { ids: val.ids }
    }
}

/// Delete a category together with all of its recipes
#[derive(Args)]
pub struct DeleteCategoryArgs {
    #[arg(help = "Unique identifier of the category to permanently delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteCategoryArgs> for DeleteCategory {
    fn from(val: DeleteCategoryArgs) -> Self {
        DeleteCategory {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

/// Delete several categories (or recipes) at once
#[derive(Args)]
pub struct DeleteManyArgs {
    #[arg(required = true, num_args = 1.., help = "Identifiers to permanently delete")]
    pub ids: Vec<u64>,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteManyArgs> for Ids {
    fn from(val: DeleteManyArgs) -> Self {
        Ids { ids: val.ids }
    }
}

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a new category
    #[command(alias = "a")]
    Add(AddCategoryArgs),
    /// List categories
    #[command(aliases = ["l", "ls"])]
    List(ListCategoriesArgs),
    /// Rename a category
    Rename(RenameCategoryArgs),
    /// Change the manual order of categories
    Reorder(ReorderCategoriesArgs),
    /// Delete a category and all of its recipes
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteCategoryArgs),
    /// Delete several categories and all of their recipes
    DeleteMany(DeleteManyArgs),
}

/// Orderings accepted by `category list --sort`
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum CategorySortArg {
    /// Manual order
    Manual,
    /// Newest first
    Created,
    /// Most recipes first
    Count,
}

impl From<CategorySortArg> for CategorySort {
    fn from(val: CategorySortArg) -> Self {
        match val {
            CategorySortArg::Manual => CategorySort::Manual,
            CategorySortArg::Created => CategorySort::Created,
            CategorySortArg::Count => CategorySort::RecipeCount,
        }
    }
}

// ============================================================================
// Recipe arguments
// ============================================================================

/// Ingredient and step input shared by `recipe add` and `recipe edit`
#[derive(Args)]
pub struct RecipeContentArgs {
    /// Ingredient as "name amount" or "name: amount" (repeatable)
    #[arg(short, long = "ingredient", value_name = "INGREDIENT")]
    pub ingredients: Vec<String>,
    /// Ingredient list as free text, separated by newlines or commas
    #[arg(long, conflicts_with = "ingredients")]
    pub ingredients_text: Option<String>,
    /// Method step (repeatable, in order)
    #[arg(short, long = "step", value_name = "STEP")]
    pub steps: Vec<String>,
    /// Method steps as free text, one per line; leading numbers are dropped
    #[arg(long, conflicts_with = "steps")]
    pub steps_text: Option<String>,
    /// Attach an image to a step, as NUMBER=PATH (repeatable)
    #[arg(long = "step-image", value_name = "NUMBER=PATH", value_parser = parse_step_image)]
    pub step_images: Vec<(u32, String)>,
}

impl RecipeContentArgs {
    /// Ingredients given on the command line, or `None` when none were.
    fn ingredients(&self) -> Option<Vec<IngredientInput>> {
        if let Some(text) = &self.ingredients_text {
            return Some(parse_ingredients(text));
        }
        if self.ingredients.is_empty() {
            return None;
        }
        Some(
            self.ingredients
                .iter()
                .flat_map(|line| parse_ingredients(line))
                .collect(),
        )
    }

    /// Steps given on the command line, or `None` when none were.
    fn steps(&self) -> Option<Vec<StepInput>> {
        if let Some(text) = &self.steps_text {
            return Some(parse_steps(text));
        }
        if self.steps.is_empty() {
            return None;
        }
        Some(self.steps.iter().map(StepInput::new).collect())
    }

    /// Attach `--step-image` files to the numbered steps.
    fn attach_images(&self, steps: &mut [StepInput]) -> Result<()> {
        for (number, path) in &self.step_images {
            let index = usize::try_from(*number)
                .ok()
                .and_then(|n| n.checked_sub(1))
                .filter(|&i| i < steps.len())
                .ok_or_else(|| {
                    anyhow!(
                        "Step {number} does not exist; the recipe has {} steps",
                        steps.len()
                    )
                })?;
            steps[index].image = Some(path.clone());
        }
        Ok(())
    }

    fn has_changes(&self) -> bool {
        self.ingredients_text.is_some()
            || !self.ingredients.is_empty()
            || self.steps_text.is_some()
            || !self.steps.is_empty()
            || !self.step_images.is_empty()
    }
}

fn parse_step_image(value: &str) -> std::result::Result<(u32, String), String> {
    let (number, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected NUMBER=PATH, got '{value}'"))?;
    let number = number
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid step number '{number}': {e}"))?;
    let path = path.trim();
    if path.is_empty() {
        return Err("image path must not be empty".to_string());
    }
    Ok((number, path.to_string()))
}

/// Create a new recipe
#[derive(Args)]
pub struct AddRecipeArgs {
    /// Name of the dish
    pub name: String,
    #[arg(short, long, help = "ID of the category the recipe belongs to")]
    pub category: u64,
    /// Cover image file; copied into the image directory
    #[arg(long)]
    pub cover: Option<String>,
    /// Mark the recipe as a favorite
    #[arg(long)]
    pub favorite: bool,
    #[command(flatten)]
    pub content: RecipeContentArgs,
}

impl TryFrom<AddRecipeArgs> for RecipeInput {
    type Error = anyhow::Error;

    fn try_from(val: AddRecipeArgs) -> Result<Self> {
        let mut steps = val.content.steps().unwrap_or_default();
        val.content.attach_images(&mut steps)?;

        Ok(RecipeInput {
            name: val.name,
            category_id: val.category,
            cover_image: val.cover,
            is_favorite: val.favorite,
            ingredients: val.content.ingredients().unwrap_or_default(),
            steps,
        })
    }
}

/// Show a recipe in full
///
/// Each view is counted; the most viewed recipes head the default listing.
#[derive(Args)]
pub struct ShowRecipeArgs {
    #[arg(help = "Unique identifier of the recipe to show")]
    pub id: u64,
}

impl From<ShowRecipeArgs> for Id {
    fn from(val: ShowRecipeArgs) -> Self {
        Id { id: val.id }
    }
}

/// List recipes
#[derive(Args)]
pub struct ListRecipesArgs {
    #[arg(short, long, help = "Only recipes in this category")]
    pub category: Option<u64>,
    #[arg(short, long, value_enum, default_value_t = RecipeSortArg::Popular)]
    pub sort: RecipeSortArg,
    /// Only favorite recipes
    #[arg(short, long)]
    pub favorites: bool,
}

impl From<ListRecipesArgs> for ListRecipes {
    fn from(val: ListRecipesArgs) -> Self {
        ListRecipes {
            category_id: val.category,
            favorites_only: val.favorites,
            sort: val.sort.into(),
        }
    }
}

/// Search recipes by name or ingredient
#[derive(Args)]
pub struct SearchRecipesArgs {
    /// Text to look for in recipe and ingredient names
    pub keyword: String,
}

impl From<SearchRecipesArgs> for SearchRecipes {
    fn from(val: SearchRecipesArgs) -> Self {
        SearchRecipes {
            keyword: val.keyword,
        }
    }
}

/// Edit a recipe
///
/// Only the given fields change. Passing any ingredient replaces the whole
/// ingredient list, and passing any step replaces the whole method.
#[derive(Args)]
pub struct EditRecipeArgs {
    #[arg(help = "Unique identifier of the recipe to edit")]
    pub id: u64,
    /// New name of the dish
    #[arg(long)]
    pub name: Option<String>,
    #[arg(short, long, help = "Move the recipe to this category")]
    pub category: Option<u64>,
    /// New cover image file
    #[arg(long, conflicts_with = "clear_cover")]
    pub cover: Option<String>,
    /// Remove the cover image
    #[arg(long)]
    pub clear_cover: bool,
    #[command(flatten)]
    pub content: RecipeContentArgs,
}

impl EditRecipeArgs {
    /// Merge the edits into the current recipe, listing what changed.
    fn apply(&self, current: &RecipeDetails) -> Result<(UpdateRecipe, Vec<String>)> {
        let recipe = &current.recipe;
        let mut changes = Vec::new();

        let name = match &self.name {
            Some(name) if name.trim() != recipe.name => {
                changes.push(format!("Renamed from '{}'", recipe.name));
                name.clone()
            }
            _ => recipe.name.clone(),
        };

        let category_id = match self.category {
            Some(id) if id != recipe.category_id => {
                changes.push(format!("Moved from '{}'", current.category_name));
                id
            }
            _ => recipe.category_id,
        };

        let cover_image = if self.clear_cover {
            if recipe.cover_image_path.is_some() {
                changes.push("Cover image removed".to_string());
            }
            None
        } else if let Some(cover) = &self.cover {
            changes.push("Cover image replaced".to_string());
            Some(cover.clone())
        } else {
            recipe.cover_image_path.clone()
        };

        let ingredients = match self.content.ingredients() {
            Some(ingredients) => {
                changes.push(format!("Ingredients replaced ({})", ingredients.len()));
                ingredients
            }
            None => current
                .ingredients
                .iter()
                .map(|i| IngredientInput::new(i.name.clone(), i.amount.clone()))
                .collect(),
        };

        let mut steps = match self.content.steps() {
            Some(steps) => {
                changes.push(format!("Steps replaced ({})", steps.len()));
                steps
            }
            None => current
                .steps
                .iter()
                .map(|s| StepInput {
                    description: s.description.clone(),
                    image: s.image_path.clone(),
                })
                .collect(),
        };
        self.content.attach_images(&mut steps)?;
        if !self.content.step_images.is_empty() {
            changes.push(format!(
                "Step images attached ({})",
                self.content.step_images.len()
            ));
        }

        let params = UpdateRecipe {
            id: self.id,
            recipe: RecipeInput {
                name,
                category_id,
                cover_image,
                is_favorite: recipe.is_favorite,
                ingredients,
                steps,
            },
        };
        Ok((params, changes))
    }

    fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.category.is_some()
            || self.cover.is_some()
            || self.clear_cover
            || self.content.has_changes()
    }
}

/// Mark or unmark a recipe as favorite
#[derive(Args)]
pub struct FavoriteArgs {
    #[arg(help = "Unique identifier of the recipe")]
    pub id: u64,
}

/// Delete a recipe permanently
#[derive(Args)]
pub struct DeleteRecipeArgs {
    #[arg(help = "Unique identifier of the recipe to permanently delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteRecipeArgs> for DeleteRecipe {
    fn from(val: DeleteRecipeArgs) -> Self {
        DeleteRecipe {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum RecipeCommands {
    /// Create a new recipe
    #[command(alias = "a")]
    Add(AddRecipeArgs),
    /// Show a recipe with its ingredients and steps
    #[command(alias = "s")]
    Show(ShowRecipeArgs),
    /// List recipes
    #[command(aliases = ["l", "ls"])]
    List(ListRecipesArgs),
    /// Search recipes by name or ingredient
    #[command(alias = "f")]
    Search(SearchRecipesArgs),
    /// Edit a recipe
    #[command(alias = "e")]
    Edit(EditRecipeArgs),
    /// Mark a recipe as favorite
    Favorite(FavoriteArgs),
    /// Remove a recipe from the favorites
    Unfavorite(FavoriteArgs),
    /// Delete a recipe permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteRecipeArgs),
    /// Delete several recipes permanently
    DeleteMany(DeleteManyArgs),
}

/// Orderings accepted by `recipe list --sort`
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum RecipeSortArg {
    /// Most viewed first
    Popular,
    /// Newest first
    Created,
    /// Alphabetical
    Name,
}

impl From<RecipeSortArg> for RecipeSort {
    fn from(val: RecipeSortArg) -> Self {
        match val {
            RecipeSortArg::Popular => RecipeSort::Popular,
            RecipeSortArg::Created => RecipeSort::Created,
            RecipeSortArg::Name => RecipeSort::Name,
        }
    }
}

// ============================================================================
// Cooking, backup and image arguments
// ============================================================================

#[derive(Args)]
pub struct CookArgs {
    #[arg(help = "Unique identifier of the recipe to cook")]
    pub id: u64,
    /// Step numbers already done, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub done: Vec<u32>,
}

impl From<CookArgs> for StartCooking {
    fn from(val: CookArgs) -> Self {
        StartCooking {
            id: val.id,
            completed_steps: val.done,
        }
    }
}

/// Write the whole cookbook to a JSON file
#[derive(Args)]
pub struct ExportArgs {
    /// Destination file
    pub file: PathBuf,
    /// Embed image files in the backup as base64 data
    #[arg(long)]
    pub embed_images: bool,
}

impl From<ExportArgs> for ExportBackup {
    fn from(val: ExportArgs) -> Self {
        ExportBackup {
            path: val.file,
            embed_images: val.embed_images,
        }
    }
}

/// Merge a JSON backup into the cookbook
///
/// Categories and recipes are matched by name. A matching record is only
/// overwritten when the backup's copy is newer.
#[derive(Args)]
pub struct ImportArgs {
    /// Backup file to read
    pub file: PathBuf,
}

impl From<ImportArgs> for ImportBackup {
    fn from(val: ImportArgs) -> Self {
        ImportBackup { path: val.file }
    }
}

#[derive(Subcommand)]
pub enum BackupCommands {
    /// Write the whole cookbook to a JSON file
    Export(ExportArgs),
    /// Merge a JSON backup into the cookbook
    Import(ImportArgs),
}

#[derive(Subcommand)]
pub enum ImageCommands {
    /// Delete image files no recipe refers to
    Cleanup,
}

// ============================================================================
// Command handlers
// ============================================================================

/// Runs parsed commands against a cookbook and renders the results
pub struct Cli {
    cookbook: Cookbook,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(cookbook: Cookbook, renderer: TerminalRenderer) -> Self {
        Self { cookbook, renderer }
    }

    pub async fn handle_category_command(&self, command: CategoryCommands) -> Result<()> {
        match command {
            CategoryCommands::Add(args) => {
                let category = self
                    .cookbook
                    .create_category(&args.into())
                    .await
                    .context("Failed to create category")?;
                self.renderer
                    .render(&CreateResult::new(category).to_string())
            }
            CategoryCommands::List(args) => self.list_categories(&args.into()).await,
            CategoryCommands::Rename(args) => {
                let params = RenameCategory::from(args);
                let previous = self
                    .cookbook
                    .get_category(&Id { id: params.id })
                    .await?
                    .map(|c| c.name);
                let category = self
                    .cookbook
                    .rename_category(&params)
                    .await
                    .context("Failed to rename category")?;
                let changes = previous
                    .filter(|old| *old != category.name)
                    .map(|old| vec![format!("Renamed from '{old}'")])
                    .unwrap_or_default();
                self.renderer
                    .render(&UpdateResult::with_changes(category, changes).to_string())
            }
            CategoryCommands::Reorder(args) => {
                let categories = self
                    .cookbook
                    .reorder_categories(&args.into())
                    .await
                    .context("Failed to reorder categories")?;
                self.renderer
                    .render(&format!("# Categories\n\n{}", CategoryList(categories)))
            }
            CategoryCommands::Delete(args) => {
                if !args.confirm {
                    let category = self
                        .cookbook
                        .get_category(&Id { id: args.id })
                        .await?
                        .ok_or_else(|| anyhow!("Category with ID {} not found", args.id))?;
                    return self.needs_confirmation(&format!(
                        "Deleting category '{}' also deletes all of its recipes. \
                         Re-run with --confirm to proceed.",
                        category.name
                    ));
                }
                let category = self
                    .cookbook
                    .delete_category(&args.into())
                    .await
                    .context("Failed to delete category")?;
                self.renderer
                    .render(&DeleteResult::new(category).to_string())
            }
            CategoryCommands::DeleteMany(args) => {
                if !args.confirm {
                    return self.needs_confirmation(&format!(
                        "Deleting {} categories also deletes all of their recipes. \
                         Re-run with --confirm to proceed.",
                        args.ids.len()
                    ));
                }
                let deleted = self
                    .cookbook
                    .delete_categories(&args.into())
                    .await
                    .context("Failed to delete categories")?;
                self.renderer
                    .render(&DeleteResult::new(deleted).to_string())
            }
        }
    }

    pub async fn handle_recipe_command(&self, command: RecipeCommands) -> Result<()> {
        match command {
            RecipeCommands::Add(args) => {
                let input = RecipeInput::try_from(args)?;
                let details = self
                    .cookbook
                    .create_recipe(&input)
                    .await
                    .context("Failed to create recipe")?;
                self.renderer
                    .render(&CreateResult::new(details).to_string())
            }
            RecipeCommands::Show(args) => {
                let details = self
                    .cookbook
                    .view_recipe(&args.into())
                    .await
                    .context("Failed to show recipe")?;
                self.renderer.render(&details.to_string())
            }
            RecipeCommands::List(args) => {
                let params = ListRecipes::from(args);
                let title = if params.favorites_only {
                    "Favorite recipes"
                } else {
                    "Recipes"
                };
                let recipes = self
                    .cookbook
                    .list_recipes(&params)
                    .await
                    .context("Failed to list recipes")?;
                self.renderer
                    .render(&format!("# {title}\n\n{}", RecipeList(recipes)))
            }
            RecipeCommands::Search(args) => {
                let params = SearchRecipes::from(args);
                let recipes = self
                    .cookbook
                    .search_recipes(&params)
                    .await
                    .context("Failed to search recipes")?;
                self.renderer.render(&format!(
                    "# Recipes matching '{}'\n\n{}",
                    params.keyword.trim(),
                    RecipeList(recipes)
                ))
            }
            RecipeCommands::Edit(args) => self.edit_recipe(args).await,
            RecipeCommands::Favorite(args) => self.set_favorite(args.id, true).await,
            RecipeCommands::Unfavorite(args) => self.set_favorite(args.id, false).await,
            RecipeCommands::Delete(args) => {
                if !args.confirm {
                    let details = self
                        .cookbook
                        .get_recipe(&Id { id: args.id })
                        .await?
                        .ok_or_else(|| anyhow!("Recipe with ID {} not found", args.id))?;
                    return self.needs_confirmation(&format!(
                        "Deleting recipe '{}' cannot be undone. Re-run with --confirm to proceed.",
                        details.recipe.name
                    ));
                }
                let details = self
                    .cookbook
                    .delete_recipe(&args.into())
                    .await
                    .context("Failed to delete recipe")?;
                self.renderer
                    .render(&DeleteResult::new(details).to_string())
            }
            RecipeCommands::DeleteMany(args) => {
                if !args.confirm {
                    return self.needs_confirmation(&format!(
                        "Deleting {} recipes cannot be undone. Re-run with --confirm to proceed.",
                        args.ids.len()
                    ));
                }
                let deleted = self
                    .cookbook
                    .delete_recipes(&args.into())
                    .await
                    .context("Failed to delete recipes")?;
                self.renderer
                    .render(&DeleteResult::new(deleted).to_string())
            }
        }
    }

    pub async fn handle_backup_command(&self, command: BackupCommands) -> Result<()> {
        match command {
            BackupCommands::Export(args) => {
                let summary = self
                    .cookbook
                    .export_backup(&args.into())
                    .await
                    .context("Failed to export backup")?;
                self.renderer.render(&summary.to_string())
            }
            BackupCommands::Import(args) => {
                let report = self
                    .cookbook
                    .import_backup(&args.into())
                    .await
                    .context("Failed to import backup")?;
                self.renderer.render(&report.to_string())
            }
        }
    }

    pub async fn handle_image_command(&self, command: ImageCommands) -> Result<()> {
        match command {
            ImageCommands::Cleanup => {
                let removed = self
                    .cookbook
                    .cleanup_images()
                    .await
                    .context("Failed to clean up images")?;
                let message = match removed {
                    0 => "No unused images found".to_string(),
                    1 => "Removed 1 unused image".to_string(),
                    n => format!("Removed {n} unused images"),
                };
                self.renderer
                    .render(&OperationStatus::success(message).to_string())
            }
        }
    }

    pub async fn cook(&self, args: CookArgs) -> Result<()> {
        let session = self
            .cookbook
            .start_cooking(&args.into())
            .await
            .context("Failed to start cooking")?;
        self.renderer.render(&session.to_string())
    }

    pub async fn list_categories(&self, params: &ListCategories) -> Result<()> {
        let categories = self
            .cookbook
            .list_categories(params)
            .await
            .context("Failed to list categories")?;
        self.renderer
            .render(&format!("# Categories\n\n{}", CategoryList(categories)))
    }

    async fn edit_recipe(&self, args: EditRecipeArgs) -> Result<()> {
        if !args.has_changes() {
            bail!("Nothing to change; pass at least one field to edit");
        }

        let current = self
            .cookbook
            .get_recipe(&Id { id: args.id })
            .await?
            .ok_or_else(|| anyhow!("Recipe with ID {} not found", args.id))?;
        let (params, changes) = args.apply(&current)?;
        debug!("Editing recipe {}: {:?}", params.id, changes);

        let details = self
            .cookbook
            .update_recipe(&params)
            .await
            .context("Failed to update recipe")?;
        self.renderer
            .render(&UpdateResult::with_changes(details, changes).to_string())
    }

    async fn set_favorite(&self, id: u64, favorite: bool) -> Result<()> {
        let recipe = self
            .cookbook
            .set_favorite(&SetFavorite { id, favorite })
            .await
            .context("Failed to update favorite")?;
        let message = if favorite {
            format!("Added '{}' to favorites", recipe.name)
        } else {
            format!("Removed '{}' from favorites", recipe.name)
        };
        self.renderer
            .render(&OperationStatus::success(message).to_string())
    }

    fn needs_confirmation(&self, message: &str) -> Result<()> {
        self.renderer
            .render(&OperationStatus::failure(message).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_step_image() {
        assert_eq!(
            parse_step_image("2=/tmp/knead.jpg").unwrap(),
            (2, "/tmp/knead.jpg".to_string())
        );
        assert!(parse_step_image("/tmp/knead.jpg").is_err());
        assert!(parse_step_image("two=/tmp/knead.jpg").is_err());
        assert!(parse_step_image("2=  ").is_err());
    }

    #[test]
    fn test_repeated_ingredients_are_parsed() {
        let content = RecipeContentArgs {
            ingredients: vec!["flour 200g".to_string(), "salt".to_string()],
            ingredients_text: None,
            steps: vec![],
            steps_text: None,
            step_images: vec![],
        };
        let ingredients = content.ingredients().unwrap();
        assert_eq!(ingredients[0], IngredientInput::new("flour", "200g"));
        assert_eq!(ingredients[1].amount, "to taste");
        assert!(content.steps().is_none());
        assert!(content.has_changes());
    }

    #[test]
    fn test_step_images_attach_by_number() {
        let content = RecipeContentArgs {
            ingredients: vec![],
            ingredients_text: None,
            steps: vec![],
            steps_text: Some("1. Mix\n2. Bake".to_string()),
            step_images: vec![(2, "bake.jpg".to_string())],
        };
        let mut steps = content.steps().unwrap();
        content.attach_images(&mut steps).unwrap();
        assert_eq!(steps[0].image, None);
        assert_eq!(steps[1].image.as_deref(), Some("bake.jpg"));

        let out_of_range = RecipeContentArgs {
            step_images: vec![(3, "x.jpg".to_string())],
            ..content
        };
        assert!(out_of_range.attach_images(&mut steps).is_err());
    }
}
