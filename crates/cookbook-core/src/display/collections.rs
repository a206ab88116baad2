//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{CategoryWithCount, RecipeWithCategory};

/// Newtype wrapper for displaying the category list with recipe counts.
///
/// # Examples
///
/// ```rust
/// use cookbook_core::{
///     display::CategoryList,
///     models::{Category, CategoryWithCount},
/// };
/// use jiff::Timestamp;
///
/// let soups = CategoryWithCount {
///     category: Category {
///         id: 1,
///         name: "Soups".to_string(),
///         sort_order: 1,
///         created_at: Timestamp::now(),
///         updated_at: Timestamp::now(),
///     },
///     recipe_count: 2,
/// };
///
/// let output = CategoryList(vec![soups]).to_string();
/// assert!(output.contains("**Soups** (ID: 1) 2 recipes"));
/// ```
pub struct CategoryList(pub Vec<CategoryWithCount>);

impl CategoryList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryWithCount> {
        self.0.iter()
    }
}

impl Index<usize> for CategoryList {
    type Output = CategoryWithCount;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a CategoryList {
    type Item = &'a CategoryWithCount;
    type IntoIter = std::slice::Iter<'a, CategoryWithCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for CategoryList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No categories yet.")
        } else {
            for category in &self.0 {
                write!(f, "{category}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying recipe list rows.
pub struct RecipeList(pub Vec<RecipeWithCategory>);

impl RecipeList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecipeWithCategory> {
        self.0.iter()
    }
}

impl Index<usize> for RecipeList {
    type Output = RecipeWithCategory;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for RecipeList {
    type Item = RecipeWithCategory;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecipeList {
    type Item = &'a RecipeWithCategory;
    type IntoIter = std::slice::Iter<'a, RecipeWithCategory>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for RecipeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No recipes found.")
        } else {
            for recipe in &self.0 {
                write!(f, "{recipe}")?;
            }
            Ok(())
        }
    }
}
