use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::types::{Ingredient, IngredientFields, IngredientId};

/// Raw API error (internal)
#[derive(Debug, Clone, Default)]
pub(crate) struct RawApiError {
    /// HTTP status of the failed response
    pub status: u16,
    /// Postgres SQLSTATE or PostgREST `PGRST…` code
    pub code: Option<String>,
    /// Original error message
    pub message: String,
    /// Extra detail, which for constraint violations names the offending key
    pub details: Option<String>,
}

impl RawApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_code(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: Some(code.into()),
            message: message.into(),
            details: None,
        }
    }
}

/// Error context (internal), filled in by the operation that failed
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    pub table: Option<String>,
    pub id: Option<String>,
}

impl ErrorContext {
    pub fn table(table: &str) -> Self {
        Self {
            table: Some(table.to_string()),
            id: None,
        }
    }

    pub fn row(table: &str, id: &IngredientId) -> Self {
        Self {
            table: Some(table.to_string()),
            id: Some(id.to_string()),
        }
    }
}

/// Maps raw backend errors onto [`StoreError`] (internal)
pub(crate) trait StoreErrorMapper {
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> StoreError;

    fn parse_error(&self, detail: impl ToString) -> StoreError {
        StoreError::ParseError {
            detail: detail.to_string(),
        }
    }

    fn unknown_error(&self, raw: RawApiError) -> StoreError {
        StoreError::Unknown {
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Record store capability.
///
/// The form controller only needs `insert` and `update_by_id`; `find_by_id`
/// lets the hosting page seed an edit session. All calls are assumed atomic
/// and strongly consistent from the caller's point of view.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Short identifier used in logs
    fn id(&self) -> &'static str;

    /// Insert a row; the store assigns the identifier.
    async fn insert(&self, table: &str, record: &IngredientFields) -> StoreResult<Ingredient>;

    /// Overwrite the editable columns of the row with the given identifier.
    async fn update_by_id(
        &self,
        table: &str,
        id: &IngredientId,
        record: &IngredientFields,
    ) -> StoreResult<()>;

    /// Fetch a single row, `None` when no row has this identifier.
    async fn find_by_id(&self, table: &str, id: &IngredientId) -> StoreResult<Option<Ingredient>>;
}
