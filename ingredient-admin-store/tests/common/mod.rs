//! Shared test helpers

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use ingredient_admin_store::{
    INGREDIENTS_TABLE, IngredientFields, PostgrestStore, RecordStore, SafetyLevel, StoreConfig,
};

pub const STORE_URL_VAR: &str = "INGREDIENT_ADMIN_STORE_URL";
pub const API_KEY_VAR: &str = "INGREDIENT_ADMIN_API_KEY";
pub const ACCESS_TOKEN_VAR: &str = "INGREDIENT_ADMIN_ACCESS_TOKEN";

/// Return early from the test when an environment variable is missing
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert that an `Option` is `Some` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert that a `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Unique slug for a test row
pub fn generate_test_slug() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// Fields for a throwaway test row
pub fn test_fields() -> IngredientFields {
    let slug = generate_test_slug();
    IngredientFields {
        name: format!("Integration {slug}"),
        slug,
        description: "integration-test".to_string(),
        benefits: "none".to_string(),
        safety_level: SafetyLevel::Safe,
    }
}

/// Live store plus the table under test
pub struct TestContext {
    pub store: Arc<dyn RecordStore>,
    pub table: String,
}

impl TestContext {
    /// Build a context from environment variables, `None` when any is missing
    pub fn postgrest() -> Option<Self> {
        let url = env::var(STORE_URL_VAR).ok()?;
        let api_key = env::var(API_KEY_VAR).ok()?;

        let mut config = StoreConfig::new(url, api_key);
        if let Ok(token) = env::var(ACCESS_TOKEN_VAR) {
            config = config.with_access_token(token);
        }
        let store = PostgrestStore::new(config).ok()?;

        Some(Self {
            store: Arc::new(store),
            table: INGREDIENTS_TABLE.to_string(),
        })
    }
}
