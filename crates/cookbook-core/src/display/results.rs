//! Result wrapper types for displaying operation outcomes.
//!
//! Each wrapper pairs a confirmation line with the affected resource, so
//! create, update and delete commands report consistently.

use std::fmt;

use crate::models::{Category, RecipeDetails};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use cookbook_core::{display::CreateResult, models::Category};
/// use jiff::Timestamp;
///
/// let category = Category {
///     id: 4,
///     name: "Desserts".to_string(),
///     sort_order: 4,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// let output = CreateResult::new(category).to_string();
/// assert!(output.starts_with("Created category with ID: 4"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Category> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created category with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<RecipeDetails> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created recipe with ID: {}", self.resource.recipe.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations.
///
/// Changes, when given, are listed before the updated resource.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }

    fn fmt_changes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for UpdateResult<Category> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated category with ID: {}", self.resource.id)?;
        self.fmt_changes(f)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<RecipeDetails> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated recipe with ID: {}", self.resource.recipe.id)?;
        self.fmt_changes(f)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Category> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted category '{}' (ID: {}) and all of its recipes",
            self.resource.name, self.resource.id
        )
    }
}

impl fmt::Display for DeleteResult<RecipeDetails> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted recipe '{}' (ID: {})",
            self.resource.recipe.name, self.resource.recipe.id
        )
    }
}

impl fmt::Display for DeleteResult<Vec<Category>> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.resource.is_empty() {
            return writeln!(f, "No matching categories to delete.");
        }
        writeln!(f, "Deleted {} categories:", self.resource.len())?;
        for category in &self.resource {
            writeln!(f, "- {} (ID: {})", category.name, category.id)?;
        }
        Ok(())
    }
}

impl fmt::Display for DeleteResult<Vec<RecipeDetails>> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.resource.is_empty() {
            return writeln!(f, "No matching recipes to delete.");
        }
        writeln!(f, "Deleted {} recipes:", self.resource.len())?;
        for details in &self.resource {
            writeln!(f, "- {} (ID: {})", details.recipe.name, details.recipe.id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    fn category(id: u64, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            sort_order: id as i64,
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        }
    }

    #[test]
    fn test_update_result_lists_changes() {
        let result = UpdateResult::with_changes(
            category(2, "Drinks"),
            vec!["Renamed from 'Beverages'".to_string()],
        );
        let output = result.to_string();
        assert!(output.contains("Updated category with ID: 2"));
        assert!(output.contains("- Renamed from 'Beverages'"));
        assert!(output.contains("# 2. Drinks"));
    }

    #[test]
    fn test_batch_delete_result() {
        let output = DeleteResult::new(vec![category(1, "A"), category(2, "B")]).to_string();
        assert!(output.starts_with("Deleted 2 categories:"));
        assert!(output.contains("- B (ID: 2)"));

        let empty: DeleteResult<Vec<Category>> = DeleteResult::new(vec![]);
        assert_eq!(empty.to_string(), "No matching categories to delete.\n");
    }
}
