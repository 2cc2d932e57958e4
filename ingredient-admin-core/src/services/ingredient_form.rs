//! Ingredient create/edit form controller

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::{Navigator, RecordStore};
use crate::types::{
    FormField, FormMode, FormNotice, FormOptions, Ingredient, IngredientFields, SafetyLevel,
    SubmissionState, SubmitOutcome,
};
use crate::utils::slugify;

/// Mutable session state, guarded by a short-held lock
#[derive(Debug, Default)]
struct FormSession {
    fields: IngredientFields,
    submission: SubmissionState,
    notice: Option<FormNotice>,
    /// Set by `cancel`; later submits are skipped and no navigation is scheduled
    closed: bool,
}

/// Create/edit form for one ingredient.
///
/// The mode is fixed at construction: `Edit` when an initial record is
/// supplied, `Create` otherwise. While creating, the slug follows the name;
/// while editing, the slug is typed directly and the name never touches it.
///
/// All methods take `&self` so a host can share the form behind an `Arc`.
/// The session lock is never held across the store call. The post-success
/// navigation task belongs to the form and is aborted when the form is
/// dropped or cancelled.
pub struct IngredientForm {
    store: Arc<dyn RecordStore>,
    navigator: Arc<dyn Navigator>,
    options: FormOptions,
    mode: FormMode,
    session: Mutex<FormSession>,
    navigation: Mutex<Option<JoinHandle<()>>>,
}

impl IngredientForm {
    /// Create a form with default options
    #[must_use]
    pub fn new(ctx: &ServiceContext, initial: Option<Ingredient>) -> Self {
        Self::with_options(ctx, initial, FormOptions::default())
    }

    #[must_use]
    pub fn with_options(
        ctx: &ServiceContext,
        initial: Option<Ingredient>,
        options: FormOptions,
    ) -> Self {
        let mode = FormMode::from_initial(initial.as_ref());
        // Edit sessions keep the stored slug as-is
        let fields = initial.map(|record| record.fields).unwrap_or_default();

        Self {
            store: Arc::clone(&ctx.record_store),
            navigator: Arc::clone(&ctx.navigator),
            options,
            mode,
            session: Mutex::new(FormSession {
                fields,
                ..FormSession::default()
            }),
            navigation: Mutex::new(None),
        }
    }

    fn session(&self) -> MutexGuard<'_, FormSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn navigation(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.navigation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // ===== Presentation state =====

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Snapshot of the current field values
    pub fn fields(&self) -> IngredientFields {
        self.session().fields.clone()
    }

    pub fn submission(&self) -> SubmissionState {
        self.session().submission
    }

    /// The submit trigger must be disabled while this is true
    pub fn is_submitting(&self) -> bool {
        self.submission() == SubmissionState::InFlight
    }

    pub fn is_slug_editable(&self) -> bool {
        self.mode.is_slug_editable()
    }

    pub fn notice(&self) -> Option<FormNotice> {
        self.session().notice.clone()
    }

    pub fn dismiss_notice(&self) {
        self.session().notice = None;
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            "Saving..."
        } else if self.mode.is_slug_editable() {
            "Update Ingredient"
        } else {
            "Save Ingredient"
        }
    }

    pub fn status_badge(&self) -> &'static str {
        match self.mode {
            FormMode::Edit { .. } => "Editing",
            FormMode::Create => "Draft",
        }
    }

    // ===== Field mutation =====

    /// Set the name; while creating, the slug is re-derived from it
    pub fn set_name(&self, name: impl Into<String>) {
        let name = name.into();
        let mut session = self.session();
        if !self.mode.is_slug_editable() {
            session.fields.slug = slugify(&name);
        }
        session.fields.name = name;
    }

    /// Set the slug directly; only allowed while editing
    pub fn set_slug(&self, slug: impl Into<String>) -> CoreResult<()> {
        if !self.mode.is_slug_editable() {
            return Err(CoreError::SlugReadOnly);
        }
        self.session().fields.slug = slug.into();
        Ok(())
    }

    pub fn set_description(&self, description: impl Into<String>) {
        self.session().fields.description = description.into();
    }

    pub fn set_benefits(&self, benefits: impl Into<String>) {
        self.session().fields.benefits = benefits.into();
    }

    pub fn set_safety_level(&self, level: SafetyLevel) {
        self.session().fields.safety_level = level;
    }

    // ===== Validation =====

    /// Check the required fields, reporting every empty one
    pub fn validate(&self) -> CoreResult<()> {
        validate_fields(&self.session().fields)
    }

    // ===== Submit =====

    /// Save the form.
    ///
    /// Inserts when creating and updates by id when editing, with exactly
    /// one store call per accepted submit. Returns `Skipped` without calling
    /// the store while another submit is in flight, after the session has
    /// succeeded, or after it was cancelled. On store failure the state
    /// returns to `Idle`, the fields are kept for a retry, and the error
    /// notice is set.
    pub async fn submit(&self) -> CoreResult<SubmitOutcome> {
        let fields = {
            let mut session = self.session();
            if session.closed {
                log::debug!("Submit ignored: form was cancelled");
                return Ok(SubmitOutcome::Skipped);
            }
            if session.submission != SubmissionState::Idle {
                log::debug!(
                    "Submit ignored: submission is {:?}",
                    session.submission
                );
                return Ok(SubmitOutcome::Skipped);
            }
            validate_fields(&session.fields)?;
            session.submission = SubmissionState::InFlight;
            session.notice = None;
            session.fields.clone()
        };

        // Back to Idle if this future is dropped mid-call
        let guard = InFlightGuard::new(&self.session);

        let result = match &self.mode {
            FormMode::Create => self
                .store
                .insert(&self.options.table, &fields)
                .await
                .map(SubmitOutcome::Created),
            FormMode::Edit { id } => self
                .store
                .update_by_id(&self.options.table, id, &fields)
                .await
                .map(|()| SubmitOutcome::Updated),
        };

        match result {
            Ok(outcome) => {
                let closed = {
                    let mut session = guard.finish(SubmissionState::Succeeded);
                    session.notice = Some(FormNotice::saved());
                    session.closed
                };
                match &outcome {
                    SubmitOutcome::Created(record) => {
                        log::info!("Ingredient created: {} ('{}')", record.id, fields.slug);
                    }
                    _ => log::info!("Ingredient updated: '{}'", fields.slug),
                }
                if !closed {
                    self.schedule_navigation();
                }
                Ok(outcome)
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("Failed to save ingredient '{}': {e}", fields.slug);
                } else {
                    log::error!("Failed to save ingredient '{}': {e}", fields.slug);
                }
                let mut session = guard.finish(SubmissionState::Idle);
                session.notice = Some(FormNotice::save_failed());
                Err(CoreError::Store(e))
            }
        }
    }

    // ===== Navigation =====

    fn schedule_navigation(&self) {
        let navigator = Arc::clone(&self.navigator);
        let path = self.options.listing_path.clone();
        let delay = self.options.navigation_delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.navigate_to(&path);
            navigator.refresh_current_route();
        });

        if let Some(previous) = self.navigation().replace(handle) {
            previous.abort();
        }
    }

    /// Whether a post-success navigation is scheduled and still pending
    pub fn has_pending_navigation(&self) -> bool {
        self.navigation()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Wait for the scheduled navigation.
    ///
    /// Returns `true` if it ran, `false` if none was scheduled or it was
    /// aborted.
    pub async fn wait_for_navigation(&self) -> bool {
        let Some(handle) = self.navigation().take() else {
            return false;
        };
        match handle.await {
            Ok(()) => true,
            Err(e) => {
                if !e.is_cancelled() {
                    log::error!("Navigation task failed: {e}");
                }
                false
            }
        }
    }

    /// Leave the form without saving.
    ///
    /// Aborts any scheduled navigation, discards the field values and routes
    /// to the listing view immediately. The session is closed: later submits
    /// are skipped, and a submit still in flight will not schedule another
    /// navigation.
    pub fn cancel(&self) {
        if let Some(handle) = self.navigation().take() {
            handle.abort();
        }
        {
            let mut session = self.session();
            session.closed = true;
            session.fields = IngredientFields::default();
            session.notice = None;
        }
        log::debug!("Form cancelled, returning to {}", self.options.listing_path);
        self.navigator.navigate_to(&self.options.listing_path);
    }
}

impl Drop for IngredientForm {
    fn drop(&mut self) {
        let pending = self
            .navigation
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = pending {
            handle.abort();
        }
    }
}

/// Resets `InFlight` to `Idle` unless finished explicitly
struct InFlightGuard<'a> {
    session: &'a Mutex<FormSession>,
    armed: bool,
}

impl<'a> InFlightGuard<'a> {
    fn new(session: &'a Mutex<FormSession>) -> Self {
        Self {
            session,
            armed: true,
        }
    }

    fn finish(mut self, state: SubmissionState) -> MutexGuard<'a, FormSession> {
        self.armed = false;
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        session.submission = state;
        session
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.session
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .submission = SubmissionState::Idle;
        }
    }
}

fn validate_fields(fields: &IngredientFields) -> CoreResult<()> {
    let missing: Vec<FormField> = [
        (FormField::Name, &fields.name),
        (FormField::Slug, &fields.slug),
        (FormField::Description, &fields.description),
        (FormField::Benefits, &fields.benefits),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::MissingRequiredFields(missing))
    }
}
