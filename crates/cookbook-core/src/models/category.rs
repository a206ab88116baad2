//! Category model definitions.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A user-defined grouping of recipes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique identifier for the category
    pub id: u64,

    /// Display name, unique across all categories
    pub name: String,

    /// Manual position used by the default category ordering
    pub sort_order: i64,

    /// Timestamp when the category was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the category was last modified (UTC)
    pub updated_at: Timestamp,
}

/// A category together with the number of recipes it owns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,

    /// Number of recipes filed under the category
    pub recipe_count: u32,
}
