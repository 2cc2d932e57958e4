#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `AppStateBuilder` and the forms `AppState` opens.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ingredient_admin_app::adapters::LogNavigator;
use ingredient_admin_app::{AppConfig, AppStateBuilder};
use ingredient_admin_core::error::CoreError;
use ingredient_admin_core::traits::{Navigator, RecordStore};
use ingredient_admin_core::types::{
    FormMode, FormOptions, Ingredient, IngredientFields, IngredientId, SafetyLevel,
    SubmissionState, SubmitOutcome,
};
use ingredient_admin_store::{StoreConfig, StoreError, StoreResult};
use tokio::sync::RwLock;

// ===== Mock Implementations =====

/// In-memory `RecordStore` keyed by table and id.
struct InMemoryStore {
    rows: RwLock<HashMap<(String, IngredientId), Ingredient>>,
    next_id: Mutex<i64>,
}

impl InMemoryStore {
    fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_id: Mutex::new(100),
        }
    }

    async fn row(&self, table: &str, id: &IngredientId) -> Option<Ingredient> {
        self.rows
            .read()
            .await
            .get(&(table.to_string(), id.clone()))
            .cloned()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    fn id(&self) -> &'static str {
        "in-memory"
    }

    async fn insert(&self, table: &str, record: &IngredientFields) -> StoreResult<Ingredient> {
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            IngredientId::from(*next)
        };
        let created = Ingredient::new(id.clone(), record.clone());
        self.rows
            .write()
            .await
            .insert((table.to_string(), id), created.clone());
        Ok(created)
    }

    async fn update_by_id(
        &self,
        table: &str,
        id: &IngredientId,
        record: &IngredientFields,
    ) -> StoreResult<()> {
        let mut rows = self.rows.write().await;
        let row = rows
            .get_mut(&(table.to_string(), id.clone()))
            .ok_or_else(|| StoreError::RecordNotFound {
                table: table.to_string(),
                id: id.to_string(),
            })?;
        row.fields = record.clone();
        Ok(())
    }

    async fn find_by_id(&self, table: &str, id: &IngredientId) -> StoreResult<Option<Ingredient>> {
        Ok(self.row(table, id).await)
    }
}

/// Records every route requested.
struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
    refreshes: Mutex<usize>,
}

impl RecordingNavigator {
    fn new() -> Self {
        Self {
            routes: Mutex::new(Vec::new()),
            refreshes: Mutex::new(0),
        }
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, path: &str) {
        self.routes.lock().unwrap().push(path.to_string());
    }

    fn refresh_current_route(&self) {
        *self.refreshes.lock().unwrap() += 1;
    }
}

fn fast_options() -> FormOptions {
    FormOptions {
        navigation_delay: Duration::from_millis(5),
        ..FormOptions::default()
    }
}

// ===== Builder =====

#[test]
fn build_without_store_fails() {
    let result = AppStateBuilder::new().build();
    assert!(matches!(result, Err(CoreError::ValidationError(_))));
}

#[test]
fn build_with_store_config_creates_http_store() {
    let state = AppStateBuilder::new()
        .store_config(StoreConfig::new("https://example.supabase.co", "anon"))
        .build()
        .unwrap();
    assert_eq!(state.ctx.record_store.id(), "postgrest");
    assert_eq!(state.form_options, FormOptions::default());
}

#[test]
fn injected_store_wins_over_config() {
    let state = AppStateBuilder::new()
        .store_config(StoreConfig::new("https://example.supabase.co", "anon"))
        .record_store(Arc::new(InMemoryStore::new()))
        .build()
        .unwrap();
    assert_eq!(state.ctx.record_store.id(), "in-memory");
}

#[test]
fn from_config_carries_form_settings() {
    let config = AppConfig::from_toml_str(
        r#"
        [store]
        url = "https://example.supabase.co"
        api_key = "anon"
        table = "cosmetic_ingredients"

        [form]
        listing_path = "/admin/ingredients"
        navigation_delay_ms = 250
        "#,
    )
    .unwrap();

    let state = AppStateBuilder::from_config(&config)
        .navigator(Arc::new(LogNavigator::new()))
        .build()
        .unwrap();
    assert_eq!(state.form_options.table, "cosmetic_ingredients");
    assert_eq!(state.form_options.listing_path, "/admin/ingredients");
    assert_eq!(
        state.form_options.navigation_delay,
        Duration::from_millis(250)
    );
}

// ===== Forms =====

#[tokio::test]
async fn create_form_saves_and_returns_to_listing() {
    let store = Arc::new(InMemoryStore::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let state = AppStateBuilder::new()
        .record_store(store.clone())
        .navigator(navigator.clone())
        .form_options(fast_options())
        .build()
        .unwrap();

    let form = state.open_create_form();
    assert_eq!(form.mode(), &FormMode::Create);
    form.set_name("Salicylic Acid");
    form.set_description("BHA exfoliant");
    form.set_benefits("Unclogs pores");
    form.set_safety_level(SafetyLevel::CautionSensitiveSkin);

    let outcome = form.submit().await.unwrap();
    let SubmitOutcome::Created(created) = outcome else {
        panic!("expected Created, got {outcome:?}");
    };
    assert_eq!(created.fields.slug, "salicylic-acid");

    assert!(form.wait_for_navigation().await);
    assert_eq!(
        *navigator.routes.lock().unwrap(),
        vec!["/dashboard/ingredients".to_string()]
    );
    assert_eq!(*navigator.refreshes.lock().unwrap(), 1);

    let stored = store.row("ingredients", &created.id).await.unwrap();
    assert_eq!(stored.fields.safety_level, SafetyLevel::CautionSensitiveSkin);
}

#[tokio::test]
async fn edit_form_is_seeded_from_store() {
    let store = Arc::new(InMemoryStore::new());
    let state = AppStateBuilder::new()
        .record_store(store.clone())
        .navigator(Arc::new(RecordingNavigator::new()))
        .form_options(fast_options())
        .build()
        .unwrap();

    let created = {
        let form = state.open_create_form();
        form.set_name("Retinol");
        form.set_description("Vitamin A");
        form.set_benefits("Cell turnover");
        match form.submit().await.unwrap() {
            SubmitOutcome::Created(record) => record,
            other => panic!("expected Created, got {other:?}"),
        }
    };

    let form = state.open_edit_form(&created.id).await.unwrap();
    assert!(form.is_slug_editable());
    assert_eq!(form.fields(), created.fields);

    form.set_name("Retinol A");
    form.set_benefits("Anti-aging");
    assert_eq!(form.fields().slug, "retinol");
    assert_eq!(form.submit().await.unwrap(), SubmitOutcome::Updated);
    assert_eq!(form.submission(), SubmissionState::Succeeded);

    let stored = store.row("ingredients", &created.id).await.unwrap();
    assert_eq!(stored.fields.name, "Retinol A");
    assert_eq!(stored.fields.slug, "retinol");
    assert_eq!(stored.fields.benefits, "Anti-aging");
}

#[tokio::test]
async fn edit_form_for_missing_record_fails() {
    let state = AppStateBuilder::new()
        .record_store(Arc::new(InMemoryStore::new()))
        .build()
        .unwrap();

    let result = state.open_edit_form(&IngredientId::from(404)).await;
    assert!(matches!(result, Err(CoreError::RecordNotFound(ref id)) if id == "404"));
}
