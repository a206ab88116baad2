//! Filter types for querying recipes.

use super::RecipeSort;

/// Filter options for listing recipes.
///
/// All conditions combine with AND. A keyword matches either the recipe name
/// or the name of any of its ingredients.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Restrict to a single category
    pub category_id: Option<u64>,

    /// Only recipes marked as favourites
    pub favorites_only: bool,

    /// Substring matched against recipe and ingredient names
    pub keyword: Option<String>,

    /// Ordering of the result
    pub sort: RecipeSort,
}

impl RecipeFilter {
    /// Filter for a keyword search across all categories.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cookbook_core::models::RecipeFilter;
    ///
    /// let filter = RecipeFilter::search("  garlic ");
    /// assert_eq!(filter.keyword.as_deref(), Some("garlic"));
    /// assert!(filter.category_id.is_none());
    /// ```
    pub fn search(keyword: &str) -> Self {
        Self {
            keyword: Some(keyword.trim().to_string()).filter(|k| !k.is_empty()),
            ..Default::default()
        }
    }

    /// Filter returning only favourite recipes.
    pub fn favorites() -> Self {
        Self {
            favorites_only: true,
            sort: RecipeSort::Created,
            ..Default::default()
        }
    }
}
