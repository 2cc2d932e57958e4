//! Type definitions

mod form;

pub use form::{FormField, FormMode, FormNotice, FormOptions, SubmissionState, SubmitOutcome};

// Re-export record types from the store library
pub use ingredient_admin_store::{
    INGREDIENTS_TABLE, Ingredient, IngredientFields, IngredientId, SafetyLevel,
    UnknownSafetyLevel,
};
