//! Display implementations for domain models.
//!
//! All output is markdown so the CLI can render it with a terminal skin or
//! print it as-is.

use std::fmt;

use super::datetime::{LocalDate, LocalDateTime};
use crate::{
    backup::{ExportSummary, ImportReport},
    cooking::CookingSession,
    models::{
        Category, CategorySort, CategoryWithCount, Ingredient, RecipeDetails, RecipeSort,
        RecipeWithCategory, Step,
    },
};

impl fmt::Display for CategorySort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RecipeSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;
        writeln!(f, "- Position: {}", self.sort_order)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))
    }
}

impl fmt::Display for CategoryWithCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recipes = match self.recipe_count {
            1 => "1 recipe".to_string(),
            n => format!("{n} recipes"),
        };
        writeln!(
            f,
            "- **{}** (ID: {}) {recipes}",
            self.category.name, self.category.id
        )
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.amount.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.name, self.amount)
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}. {}", self.step_number, self.description)?;
        if let Some(image) = &self.image_path {
            writeln!(f, "   - Image: {image}")?;
        }
        Ok(())
    }
}

impl fmt::Display for RecipeWithCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recipe = &self.recipe;
        let star = if recipe.is_favorite { " ★" } else { "" };
        writeln!(f, "## {} (ID: {}){star}", recipe.name, recipe.id)?;
        writeln!(f)?;
        writeln!(f, "- **Category**: {}", self.category_name)?;
        writeln!(f, "- **Views**: {}", recipe.view_count)?;
        writeln!(f, "- **Created**: {}", LocalDate(&recipe.created_at))?;
        writeln!(f)
    }
}

impl fmt::Display for RecipeDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recipe = &self.recipe;
        writeln!(f, "# {}. {}", recipe.id, recipe.name)?;
        writeln!(f)?;

        writeln!(f, "- Category: {}", self.category_name)?;
        if recipe.is_favorite {
            writeln!(f, "- Favorite: ★")?;
        }
        writeln!(f, "- Views: {}", recipe.view_count)?;
        if let Some(cover) = &recipe.cover_image_path {
            writeln!(f, "- Cover: {cover}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&recipe.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&recipe.updated_at))?;

        writeln!(f, "\n## Ingredients")?;
        writeln!(f)?;
        if self.ingredients.is_empty() {
            writeln!(f, "No ingredients listed.")?;
        } else {
            for ingredient in &self.ingredients {
                writeln!(f, "- {ingredient}")?;
            }
        }

        writeln!(f, "\n## Steps")?;
        writeln!(f)?;
        if self.steps.is_empty() {
            writeln!(f, "No steps listed.")?;
        } else {
            for step in &self.steps {
                write!(f, "{step}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for CookingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let details = self.recipe();
        let (done, total) = self.progress();

        writeln!(f, "# Cooking: {}", details.recipe.name)?;
        writeln!(f)?;
        writeln!(f, "Progress: {done}/{total} steps")?;

        if !details.ingredients.is_empty() {
            writeln!(f, "\n## Ingredients")?;
            writeln!(f)?;
            for ingredient in &details.ingredients {
                writeln!(f, "- [ ] {ingredient}")?;
            }
        }

        writeln!(f, "\n## Steps")?;
        writeln!(f)?;
        for step in &details.steps {
            let mark = if self.is_completed(step.step_number) {
                "x"
            } else {
                " "
            };
            writeln!(f, "- [{mark}] {}. {}", step.step_number, step.description)?;
        }

        if self.is_finished() {
            writeln!(f, "\nAll steps done. Enjoy your meal!")?;
        } else if let Some(next) = self.next_step() {
            writeln!(f, "\nNext: step {}", next.step_number)?;
        }

        Ok(())
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Backup imported")?;
        writeln!(f)?;
        writeln!(
            f,
            "- Categories: {} created, {} updated, {} unchanged",
            self.categories_created, self.categories_updated, self.categories_unchanged
        )?;
        writeln!(
            f,
            "- Recipes: {} created, {} updated, {} unchanged",
            self.recipes_created, self.recipes_updated, self.recipes_unchanged
        )?;
        if self.recipes_skipped > 0 {
            writeln!(
                f,
                "- Skipped {} recipes with no matching category",
                self.recipes_skipped
            )?;
        }
        if self.images_restored > 0 {
            writeln!(f, "- Images restored: {}", self.images_restored)?;
        }
        Ok(())
    }
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Backup written to {}", self.path.display())?;
        writeln!(f)?;
        writeln!(f, "- Categories: {}", self.categories)?;
        writeln!(f, "- Recipes: {}", self.recipes)?;
        if self.images_embedded > 0 {
            writeln!(f, "- Images embedded: {}", self.images_embedded)?;
        }
        Ok(())
    }
}
