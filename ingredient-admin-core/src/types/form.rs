//! Form session types

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use super::{INGREDIENTS_TABLE, Ingredient, IngredientId};

/// Default listing view the form returns to
pub const DEFAULT_LISTING_PATH: &str = "/dashboard/ingredients";

/// Default delay between a successful save and navigation
pub const DEFAULT_NAVIGATION_DELAY: Duration = Duration::from_millis(1000);

/// Whether the form creates a new record or edits an existing one.
///
/// Decided once from the initial record and fixed for the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum FormMode {
    Create,
    Edit { id: IngredientId },
}

impl FormMode {
    pub fn from_initial(initial: Option<&Ingredient>) -> Self {
        match initial {
            Some(record) => Self::Edit {
                id: record.id.clone(),
            },
            None => Self::Create,
        }
    }

    /// Slug is typed by the user when editing, derived from the name when creating
    pub fn is_slug_editable(&self) -> bool {
        matches!(self, Self::Edit { .. })
    }
}

/// Required form fields, used to report validation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    Slug,
    Description,
    Benefits,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Slug => "slug",
            Self::Description => "description",
            Self::Benefits => "benefits",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Submit progress.
///
/// `Idle -> InFlight -> Succeeded`, or back to `Idle` when the store call
/// fails so the user can retry. `Succeeded` is terminal for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
}

/// Transient user-facing message set by the last submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "camelCase")]
pub enum FormNotice {
    Success(String),
    Error(String),
}

impl FormNotice {
    pub const SAVED: &'static str = "Ingredient saved successfully!";
    pub const SAVE_FAILED: &'static str = "Failed to save ingredient.";

    pub fn saved() -> Self {
        Self::Success(Self::SAVED.to_string())
    }

    pub fn save_failed() -> Self {
        Self::Error(Self::SAVE_FAILED.to_string())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success(msg) | Self::Error(msg) => msg,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Result of a submit call
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A new record was inserted
    Created(Ingredient),
    /// The existing record was overwritten
    Updated,
    /// Nothing was sent: a submit was already in flight or the session already succeeded
    Skipped,
}

/// Host-provided form settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOptions {
    /// Route of the record listing view
    pub listing_path: String,
    /// Table the form writes to
    pub table: String,
    /// Delay between a successful save and navigation to the listing
    pub navigation_delay: Duration,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            listing_path: DEFAULT_LISTING_PATH.to_string(),
            table: INGREDIENTS_TABLE.to_string(),
            navigation_delay: DEFAULT_NAVIGATION_DELAY,
        }
    }
}
