//! Business logic service layer

mod ingredient_form;
mod ingredient_service;

pub use ingredient_form::IngredientForm;
pub use ingredient_service::IngredientService;

use std::sync::Arc;

use crate::traits::{Navigator, RecordStore};

/// Service context - holds all dependencies
///
/// The hosting platform builds this context and injects its own record
/// store and navigation implementations.
#[derive(Clone)]
pub struct ServiceContext {
    /// Record store the form writes to
    pub record_store: Arc<dyn RecordStore>,
    /// Navigation of the hosting shell
    pub navigator: Arc<dyn Navigator>,
}

impl ServiceContext {
    /// Create a service context
    #[must_use]
    pub fn new(record_store: Arc<dyn RecordStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            record_store,
            navigator,
        }
    }
}
