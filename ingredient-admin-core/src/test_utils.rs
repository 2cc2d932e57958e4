//! Test helper module
//!
//! Provides mock implementations and convenient test factory methods.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use ingredient_admin_store::{StoreError, StoreResult};
use tokio::sync::{Notify, RwLock};

use crate::services::ServiceContext;
use crate::traits::{Navigator, RecordStore};
use crate::types::{Ingredient, IngredientFields, IngredientId, SafetyLevel};
use crate::utils::slugify;

// ===== MockRecordStore =====

/// A call received by [`MockRecordStore`]
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Insert {
        table: String,
        record: IngredientFields,
    },
    Update {
        table: String,
        id: IngredientId,
        record: IngredientFields,
    },
    Find {
        table: String,
        id: IngredientId,
    },
}

/// Holds write calls inside the store until released
pub struct CallGate {
    /// Notified once a write call has been recorded and is waiting
    pub entered: Notify,
    /// Notify to let the waiting call finish
    pub release: Notify,
}

pub struct MockRecordStore {
    rows: RwLock<HashMap<IngredientId, Ingredient>>,
    calls: RwLock<Vec<StoreCall>>,
    /// If Some, every call returns this error
    failure: RwLock<Option<StoreError>>,
    gate: RwLock<Option<Arc<CallGate>>>,
    next_id: AtomicI64,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            calls: RwLock::new(Vec::new()),
            failure: RwLock::new(None),
            gate: RwLock::new(None),
            next_id: AtomicI64::new(1),
        }
    }

    pub async fn seed(&self, record: Ingredient) {
        self.rows.write().await.insert(record.id.clone(), record);
    }

    pub async fn fail_with(&self, error: StoreError) {
        *self.failure.write().await = Some(error);
    }

    pub async fn clear_failure(&self) {
        *self.failure.write().await = None;
    }

    /// Hold subsequent writes until `release` is notified
    pub async fn install_gate(&self) -> Arc<CallGate> {
        let gate = Arc::new(CallGate {
            entered: Notify::new(),
            release: Notify::new(),
        });
        *self.gate.write().await = Some(Arc::clone(&gate));
        gate
    }

    pub async fn calls(&self) -> Vec<StoreCall> {
        self.calls.read().await.clone()
    }

    pub async fn row(&self, id: &IngredientId) -> Option<Ingredient> {
        self.rows.read().await.get(id).cloned()
    }

    async fn record_call(&self, call: StoreCall) -> StoreResult<()> {
        self.calls.write().await.push(call);
        match self.failure.read().await.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn pass_gate(&self) {
        let gate = self.gate.read().await.clone();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn insert(&self, table: &str, record: &IngredientFields) -> StoreResult<Ingredient> {
        self.pass_gate().await;
        self.record_call(StoreCall::Insert {
            table: table.to_string(),
            record: record.clone(),
        })
        .await?;

        let id = IngredientId::from(self.next_id.fetch_add(1, Ordering::SeqCst));
        let created = Ingredient::new(id.clone(), record.clone());
        self.rows.write().await.insert(id, created.clone());
        Ok(created)
    }

    async fn update_by_id(
        &self,
        table: &str,
        id: &IngredientId,
        record: &IngredientFields,
    ) -> StoreResult<()> {
        self.pass_gate().await;
        self.record_call(StoreCall::Update {
            table: table.to_string(),
            id: id.clone(),
            record: record.clone(),
        })
        .await?;

        let mut rows = self.rows.write().await;
        let row = rows.get_mut(id).ok_or_else(|| StoreError::RecordNotFound {
            table: table.to_string(),
            id: id.to_string(),
        })?;
        row.fields = record.clone();
        Ok(())
    }

    async fn find_by_id(&self, table: &str, id: &IngredientId) -> StoreResult<Option<Ingredient>> {
        self.record_call(StoreCall::Find {
            table: table.to_string(),
            id: id.clone(),
        })
        .await?;
        Ok(self.rows.read().await.get(id).cloned())
    }
}

// ===== MockNavigator =====

/// A navigation request received by [`MockNavigator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    NavigateTo(String),
    Refresh,
}

pub struct MockNavigator {
    events: Mutex<Vec<NavEvent>>,
}

impl MockNavigator {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<NavEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push(&self, event: NavEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl Navigator for MockNavigator {
    fn navigate_to(&self, path: &str) {
        self.push(NavEvent::NavigateTo(path.to_string()));
    }

    fn refresh_current_route(&self) {
        self.push(NavEvent::Refresh);
    }
}

// ===== Factories =====

/// Context over the given store plus a fresh navigator
pub fn service_context(store: &Arc<MockRecordStore>) -> (ServiceContext, Arc<MockNavigator>) {
    let navigator = Arc::new(MockNavigator::new());
    let ctx = ServiceContext::new(
        Arc::clone(store) as Arc<dyn RecordStore>,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
    );
    (ctx, navigator)
}

pub fn sample_fields(name: &str) -> IngredientFields {
    IngredientFields {
        name: name.to_string(),
        slug: slugify(name),
        description: format!("{name} description"),
        benefits: format!("{name} benefits"),
        safety_level: SafetyLevel::Safe,
    }
}

pub fn sample_ingredient(id: i64, name: &str) -> Ingredient {
    Ingredient::new(id, sample_fields(name))
}
