//! Ordering options for category and recipe listings.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of category orderings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CategorySort {
    /// User-arranged order (`sort_order` ascending)
    #[default]
    Manual,

    /// Newest categories first
    Created,

    /// Categories with the most recipes first
    RecipeCount,
}

impl FromStr for CategorySort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "manual" => Ok(CategorySort::Manual),
            "created" => Ok(CategorySort::Created),
            "recipe-count" | "count" => Ok(CategorySort::RecipeCount),
            _ => Err(format!("Invalid category sort: {s}")),
        }
    }
}

impl CategorySort {
    /// Stable string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CategorySort::Manual => "manual",
            CategorySort::Created => "created",
            CategorySort::RecipeCount => "recipe-count",
        }
    }

    /// SQL `ORDER BY` clause over the category-with-count query.
    pub(crate) fn order_by(&self) -> &'static str {
        match self {
            CategorySort::Manual => "c.sort_order ASC, c.created_at ASC",
            CategorySort::Created => "c.created_at DESC, c.id DESC",
            CategorySort::RecipeCount => "recipe_count DESC, c.sort_order ASC",
        }
    }
}

/// Type-safe enumeration of recipe orderings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RecipeSort {
    /// Most viewed recipes first
    #[default]
    Popular,

    /// Newest recipes first
    Created,

    /// Alphabetical by name
    Name,
}

impl FromStr for RecipeSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "popular" | "views" => Ok(RecipeSort::Popular),
            "created" => Ok(RecipeSort::Created),
            "name" => Ok(RecipeSort::Name),
            _ => Err(format!("Invalid recipe sort: {s}")),
        }
    }
}

impl RecipeSort {
    /// Stable string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeSort::Popular => "popular",
            RecipeSort::Created => "created",
            RecipeSort::Name => "name",
        }
    }

    pub(crate) fn order_by(&self) -> &'static str {
        match self {
            RecipeSort::Popular => "r.view_count DESC, r.created_at DESC",
            RecipeSort::Created => "r.created_at DESC, r.id DESC",
            RecipeSort::Name => "r.name COLLATE NOCASE ASC",
        }
    }
}
