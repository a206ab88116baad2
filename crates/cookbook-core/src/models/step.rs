//! Step model definition.

use serde::{Deserialize, Serialize};

/// One instruction in a recipe's method.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Step {
    /// Unique identifier for the step row
    pub id: u64,

    /// ID of the owning recipe
    pub recipe_id: u64,

    /// What to do in this step
    pub description: String,

    /// Optional illustration stored in the image directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,

    /// Human-facing step number (1-indexed)
    pub step_number: u32,

    /// Position within the recipe's method (0-indexed)
    pub sort_order: u32,
}
