//! Application configuration
//!
//! Read from a TOML file, then overridden by environment variables:
//!
//! ```toml
//! [store]
//! url = "https://xyzcompany.supabase.co"
//! api_key = "public-anon-key"
//! table = "ingredients"
//!
//! [form]
//! listing_path = "/dashboard/ingredients"
//! navigation_delay_ms = 1000
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use ingredient_admin_core::types::{FormOptions, INGREDIENTS_TABLE};
use ingredient_admin_store::StoreConfig;
use serde::{Deserialize, Serialize};

pub const ENV_STORE_URL: &str = "INGREDIENT_ADMIN_STORE_URL";
pub const ENV_API_KEY: &str = "INGREDIENT_ADMIN_API_KEY";
pub const ENV_ACCESS_TOKEN: &str = "INGREDIENT_ADMIN_ACCESS_TOKEN";

/// `<config_dir>/ingredient-admin/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ingredient-admin").join("config.toml"))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreSection,
    pub form: FormSection,
}

/// `[store]`: connection settings plus the table the form writes to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    #[serde(flatten)]
    pub connection: StoreConfig,
    pub table: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            connection: StoreConfig::default(),
            table: INGREDIENTS_TABLE.to_string(),
        }
    }
}

/// `[form]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSection {
    pub listing_path: String,
    pub navigation_delay_ms: u64,
}

impl Default for FormSection {
    fn default() -> Self {
        let defaults = FormOptions::default();
        Self {
            listing_path: defaults.listing_path,
            navigation_delay_ms: u64::try_from(defaults.navigation_delay.as_millis())
                .unwrap_or(u64::MAX),
        }
    }
}

impl AppConfig {
    /// Load from `path` (or the default location) and apply environment overrides.
    ///
    /// An explicit path must exist; a missing default file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with an injectable environment lookup
    pub fn load_with(path: Option<&Path>, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    log::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_env(env);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Environment variables win over the file
    pub fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(url) = env(ENV_STORE_URL) {
            self.store.connection.url = url;
        }
        if let Some(api_key) = env(ENV_API_KEY) {
            self.store.connection.api_key = api_key;
        }
        if let Some(token) = env(ENV_ACCESS_TOKEN) {
            self.store.connection.access_token = Some(token);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.store.connection.url.trim().is_empty() {
            bail!("Store URL is not configured (set [store].url or {ENV_STORE_URL})");
        }
        if self.store.connection.api_key.trim().is_empty() {
            bail!("Store API key is not configured (set [store].api_key or {ENV_API_KEY})");
        }
        if self.store.table.trim().is_empty() {
            bail!("[store].table cannot be empty");
        }
        Ok(())
    }

    pub fn form_options(&self) -> FormOptions {
        FormOptions {
            listing_path: self.form.listing_path.clone(),
            table: self.store.table.clone(),
            navigation_delay: Duration::from_millis(self.form.navigation_delay_ms),
        }
    }
}
