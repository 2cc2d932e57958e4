//! Ingredient lookup service

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::RecordStore;
use crate::types::{Ingredient, IngredientId};

/// Loads existing records to seed edit sessions
pub struct IngredientService {
    store: Arc<dyn RecordStore>,
    table: String,
}

impl IngredientService {
    #[must_use]
    pub fn new(ctx: &ServiceContext, table: impl Into<String>) -> Self {
        Self {
            store: Arc::clone(&ctx.record_store),
            table: table.into(),
        }
    }

    /// Fetch a record, `None` when it does not exist
    pub async fn find(&self, id: &IngredientId) -> CoreResult<Option<Ingredient>> {
        if id.as_str().trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Ingredient id cannot be empty".to_string(),
            ));
        }
        Ok(self.store.find_by_id(&self.table, id).await?)
    }

    /// Fetch the record an edit session starts from
    pub async fn load_for_edit(&self, id: &IngredientId) -> CoreResult<Ingredient> {
        let record = self
            .find(id)
            .await?
            .ok_or_else(|| CoreError::RecordNotFound(id.to_string()))?;
        log::debug!(
            "Loaded ingredient {} ('{}') for editing",
            record.id,
            record.fields.slug
        );
        Ok(record)
    }
}
