//! Ingredient Admin Core Library
//!
//! Platform-independent logic behind the ingredient create/edit form:
//! - Form state machine (`IngredientForm`): field state, slug derivation,
//!   validation, submit orchestration and post-success navigation
//! - Record loading for edit sessions (`IngredientService`)
//!
//! The record store and navigation are injected through [`ServiceContext`],
//! so any host (CLI, web handler, desktop shell) can drive the same form.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{IngredientForm, IngredientService, ServiceContext};
pub use traits::{Navigator, RecordStore};
pub use utils::slugify;
