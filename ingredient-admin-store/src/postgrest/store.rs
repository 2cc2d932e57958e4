//! PostgREST RecordStore trait implementation

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::traits::{RecordStore, StoreErrorMapper};
use crate::types::{Ingredient, IngredientFields, IngredientId};

use super::{PostgrestStore, STORE_NAME};

#[async_trait]
impl RecordStore for PostgrestStore {
    fn id(&self) -> &'static str {
        STORE_NAME
    }

    async fn insert(&self, table: &str, record: &IngredientFields) -> StoreResult<Ingredient> {
        let rows: Vec<Ingredient> = self.post_rows(table, record).await?;
        let created = rows
            .into_iter()
            .next()
            .ok_or_else(|| self.parse_error("insert returned no rows"))?;
        log::info!(
            "[{STORE_NAME}] Inserted '{}' into '{table}' with id {}",
            created.fields.slug,
            created.id
        );
        Ok(created)
    }

    async fn update_by_id(
        &self,
        table: &str,
        id: &IngredientId,
        record: &IngredientFields,
    ) -> StoreResult<()> {
        let rows: Vec<Ingredient> = self.patch_rows(table, id, record).await?;
        ensure_updated(&rows, table, id)?;
        log::info!("[{STORE_NAME}] Updated '{table}' row {id}");
        Ok(())
    }

    async fn find_by_id(&self, table: &str, id: &IngredientId) -> StoreResult<Option<Ingredient>> {
        let rows: Vec<Ingredient> = self.get_rows(table, id).await?;
        Ok(rows.into_iter().next())
    }
}

/// PATCH with a filter that matches nothing is still a 200 with `[]`
fn ensure_updated(rows: &[Ingredient], table: &str, id: &IngredientId) -> StoreResult<()> {
    if rows.is_empty() {
        Err(StoreError::RecordNotFound {
            table: table.to_string(),
            id: id.to_string(),
        })
    } else {
        Ok(())
    }
}
