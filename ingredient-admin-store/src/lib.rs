//! # ingredient-admin-store
//!
//! Record store abstraction for skincare ingredient records, with an HTTP
//! backend for PostgREST endpoints (Supabase-style hosted tables).
//!
//! ## TLS Backend
//!
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ingredient_admin_store::{
//!     IngredientFields, PostgrestStore, RecordStore, SafetyLevel, StoreConfig, INGREDIENTS_TABLE,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = PostgrestStore::new(StoreConfig::new(
//!         "https://xyzcompany.supabase.co",
//!         "public-anon-key",
//!     ))?;
//!
//!     let fields = IngredientFields {
//!         name: "Niacinamide".to_string(),
//!         slug: "niacinamide".to_string(),
//!         description: "Vitamin B3".to_string(),
//!         benefits: "Brightening".to_string(),
//!         safety_level: SafetyLevel::Safe,
//!     };
//!     let created = store.insert(INGREDIENTS_TABLE, &fields).await?;
//!     println!("created {}", created.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`StoreResult<T>`](StoreResult). Writes are sent
//! exactly once; only reads are retried on transient failures
//! (`NetworkError`, `Timeout`, `RateLimited`).

mod config;
mod error;
mod http_client;
mod postgrest;
mod traits;
mod types;
mod utils;

pub use config::StoreConfig;

pub use error::{StoreError, StoreResult};

// Internal mapping traits stay private
pub use traits::RecordStore;

pub use types::{
    INGREDIENTS_TABLE, Ingredient, IngredientFields, IngredientId, SafetyLevel,
    UnknownSafetyLevel,
};

pub use utils::datetime;
pub use utils::log_sanitizer::mask_secret;

pub use postgrest::PostgrestStore;
