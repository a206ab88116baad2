//! Data models for categories, recipes, ingredients and steps.
//!
//! These types mirror the rows stored in the database. Display
//! implementations live in [`crate::display::models`] so the structures stay
//! free of presentation concerns.
//!
//! # Ownership
//!
//! ```text
//! Category 1 ──▶ * Recipe 1 ──▶ * Ingredient
//!                         └───▶ * Step
//! ```
//!
//! Every arrow is an `ON DELETE CASCADE` foreign key: removing a category
//! removes its recipes, and removing a recipe removes its ingredients and
//! steps.
//!
//! # Examples
//!
//! ```rust
//! use cookbook_core::models::{Category, RecipeSort};
//! use jiff::Timestamp;
//!
//! let category = Category {
//!     id: 1,
//!     name: "Soups".to_string(),
//!     sort_order: 1,
//!     created_at: Timestamp::now(),
//!     updated_at: Timestamp::now(),
//! };
//! println!("{}", category);
//!
//! let sort: RecipeSort = "name".parse().unwrap();
//! assert_eq!(sort, RecipeSort::Name);
//! ```

pub mod category;
pub mod filters;
pub mod ingredient;
pub mod recipe;
pub mod sort;
pub mod step;


pub use category::{Category, CategoryWithCount};
pub use filters::RecipeFilter;
pub use ingredient::Ingredient;
pub use recipe::{Recipe, RecipeDetails, RecipeWithCategory};
pub use sort::{CategorySort, RecipeSort};
pub use step::Step;
