//! Markdown presentation of models and operation results.
//!
//! Domain models implement [`Display`](std::fmt::Display) directly (see
//! [`models`]). Collections and operation outcomes are wrapped in newtypes
//! so each context gets its own framing:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │  Wrapper Types  │    │    Markdown     │
//! │ (Recipe, Step)  │───▶│ (RecipeList,    │───▶│     Output      │
//! │                 │    │  CreateResult)  │    │   (terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: [`CategoryList`] and [`RecipeList`]
//! - [`results`]: [`CreateResult`], [`UpdateResult`], [`DeleteResult`]
//! - [`status`]: [`OperationStatus`] one-liners
//! - [`datetime`]: local-time formatting of timestamps
//!
//! ```rust
//! use cookbook_core::display::OperationStatus;
//!
//! let status = OperationStatus::failure("Add --confirm to delete this category");
//! assert!(status.to_string().starts_with("Error:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{CategoryList, RecipeList};
pub use datetime::{LocalDate, LocalDateTime};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
