//! Platform-agnostic application bootstrap for the ingredient admin form.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter
//! injection) and `AppConfig` (file and environment configuration).

pub mod adapters;
pub mod config;

use std::sync::Arc;

use ingredient_admin_core::error::{CoreError, CoreResult};
use ingredient_admin_core::services::{IngredientForm, IngredientService, ServiceContext};
use ingredient_admin_core::traits::{Navigator, RecordStore};
use ingredient_admin_core::types::{FormOptions, IngredientId};
use ingredient_admin_store::{PostgrestStore, StoreConfig};

use adapters::LogNavigator;
pub use config::AppConfig;

/// Platform-agnostic application state.
///
/// Holds the `ServiceContext` and the services built on it. Every frontend
/// constructs this once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Service context (record store and navigator)
    pub ctx: Arc<ServiceContext>,
    /// Record lookup for edit sessions
    pub ingredient_service: IngredientService,
    /// Settings every opened form uses
    pub form_options: FormOptions,
}

impl AppState {
    /// Open a form that creates a new ingredient.
    pub fn open_create_form(&self) -> IngredientForm {
        IngredientForm::with_options(&self.ctx, None, self.form_options.clone())
    }

    /// Load `id` and open a form that edits it.
    pub async fn open_edit_form(&self, id: &IngredientId) -> CoreResult<IngredientForm> {
        let record = self.ingredient_service.load_for_edit(id).await?;
        Ok(IngredientForm::with_options(
            &self.ctx,
            Some(record),
            self.form_options.clone(),
        ))
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required
/// - `record_store`, or `store_config` to build a [`PostgrestStore`]
///
/// # Optional
/// - `navigator`: defaults to [`LogNavigator`]
/// - `form_options`: defaults to [`FormOptions::default`]
pub struct AppStateBuilder {
    record_store: Option<Arc<dyn RecordStore>>,
    store_config: Option<StoreConfig>,
    navigator: Option<Arc<dyn Navigator>>,
    form_options: Option<FormOptions>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            record_store: None,
            store_config: None,
            navigator: None,
            form_options: None,
        }
    }

    /// Builder preloaded from application config
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new()
            .store_config(config.store.connection.clone())
            .form_options(config.form_options())
    }

    #[must_use]
    pub fn record_store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.record_store = Some(store);
        self
    }

    /// Connection settings for a [`PostgrestStore`]; ignored when `record_store` is set
    #[must_use]
    pub fn store_config(mut self, config: StoreConfig) -> Self {
        self.store_config = Some(config);
        self
    }

    #[must_use]
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    #[must_use]
    pub fn form_options(mut self, options: FormOptions) -> Self {
        self.form_options = Some(options);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if no record store is configured,
    /// or the store error if the HTTP client cannot be built.
    pub fn build(self) -> CoreResult<AppState> {
        let record_store: Arc<dyn RecordStore> = match (self.record_store, self.store_config) {
            (Some(store), _) => store,
            (None, Some(config)) => Arc::new(PostgrestStore::new(config)?),
            (None, None) => {
                return Err(CoreError::ValidationError(
                    "record_store or store_config is required".to_string(),
                ));
            }
        };
        let navigator = self
            .navigator
            .unwrap_or_else(|| Arc::new(LogNavigator::new()));
        let form_options = self.form_options.unwrap_or_default();

        log::debug!(
            "Using record store '{}' (table '{}')",
            record_store.id(),
            form_options.table
        );

        let ctx = Arc::new(ServiceContext::new(record_store, navigator));
        let ingredient_service = IngredientService::new(&ctx, form_options.table.clone());

        Ok(AppState {
            ctx,
            ingredient_service,
            form_options,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
