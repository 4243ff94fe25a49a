//! Submission controller: one editing session over a single resume.
//!
//! The session moves Idle -> Submitting -> Done. Validation failures and
//! store failures both land back in Idle with the model untouched, so the
//! user can fix things and resubmit. Nothing is retried automatically.

use thiserror::Error;
use tracing::{error, info, warn};

use crate::form::dates::hydrate;
use crate::form::fields::ScalarField;
use crate::form::sections::Section;
use crate::form::suggestions::TagList;
use crate::form::validation::{validate, ValidationErrors};
use crate::form::FormError;
use crate::models::Resume;
use crate::navigation::{Navigator, Notifier, Route};
use crate::store::{ResumeStore, StoreError};

pub const FIX_ERRORS_MESSAGE: &str = "Please fix validation errors.";
pub const CREATED_MESSAGE: &str = "Resume created successfully!";
pub const UPDATED_MESSAGE: &str = "Resume updated successfully!";
pub const SAVE_FAILED_MESSAGE: &str = "Error saving resume.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created { id: String },
    Updated { id: String },
}

impl SubmitOutcome {
    pub fn id(&self) -> &str {
        match self {
            SubmitOutcome::Created { id } | SubmitOutcome::Updated { id } => id,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            SubmitOutcome::Created { .. } => CREATED_MESSAGE,
            SubmitOutcome::Updated { .. } => UPDATED_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Done(SubmitOutcome),
}

impl SubmissionState {
    fn describe(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "a submission is in flight",
            SubmissionState::Done(_) => "the resume has been saved",
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Resume failed validation:\n{0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Cannot submit while {0}")]
    NotIdle(&'static str),
}

/// Holds the edit model and the submission state for one editing session.
#[derive(Debug)]
pub struct FormSession {
    resume: Resume,
    state: SubmissionState,
    errors: ValidationErrors,
}

impl FormSession {
    /// Create flow: a blank resume seeded with one entry per section.
    pub fn create() -> Self {
        Self::with_resume(Resume::blank())
    }

    /// Update flow: a stored resume with its dates normalised for editing.
    pub fn edit(stored: Resume) -> Self {
        Self::with_resume(hydrate(stored))
    }

    /// Opens the editor the way the dashboard hands it over: with the
    /// current resume if there is one, blank otherwise.
    pub fn open(initial: Option<Resume>) -> Self {
        match initial {
            Some(resume) => Self::edit(resume),
            None => Self::create(),
        }
    }

    fn with_resume(resume: Resume) -> Self {
        Self {
            resume,
            state: SubmissionState::Idle,
            errors: ValidationErrors::default(),
        }
    }

    pub fn resume(&self) -> &Resume {
        &self.resume
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Messages from the last rejected submit, for inline display.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_update(&self) -> bool {
        self.resume.id.is_some()
    }

    /// Mutable access to the model. Only allowed while Idle.
    pub fn model_mut(&mut self) -> Result<&mut Resume, FormError> {
        match self.state {
            SubmissionState::Idle => Ok(&mut self.resume),
            ref other => Err(FormError::NotEditable(other.describe())),
        }
    }

    pub fn set_field(&mut self, field: ScalarField, value: &str) -> Result<(), FormError> {
        self.model_mut()?.set_field(field, value);
        Ok(())
    }

    pub fn set_tags(&mut self, list: TagList, values: Vec<String>) -> Result<(), FormError> {
        self.model_mut()?.set_tags(list, values);
        Ok(())
    }

    pub fn add_entry(&mut self, section: Section) -> Result<(), FormError> {
        self.model_mut()?.add_entry(section);
        Ok(())
    }

    pub fn remove_entry(&mut self, section: Section, index: usize) -> Result<(), FormError> {
        self.model_mut()?.remove_entry(section, index)
    }

    pub fn update_entry_field(
        &mut self,
        section: Section,
        index: usize,
        key: &str,
        value: &str,
    ) -> Result<(), FormError> {
        self.model_mut()?
            .update_entry_field(section, index, key, value)
    }

    /// Validates, then creates or updates the resume depending on whether it
    /// already carries an identifier. On success the user is sent to the
    /// dashboard.
    pub async fn submit(
        &mut self,
        store: &dyn ResumeStore,
        navigator: &dyn Navigator,
        notifier: &dyn Notifier,
    ) -> Result<SubmitOutcome, SubmitError> {
        if self.state != SubmissionState::Idle {
            return Err(SubmitError::NotIdle(self.state.describe()));
        }

        let errors = validate(&self.resume);
        if !errors.is_empty() {
            warn!("Resume rejected with {} validation error(s)", errors.len());
            notifier.notify_error(FIX_ERRORS_MESSAGE);
            self.errors = errors.clone();
            return Err(SubmitError::Validation(errors));
        }
        self.errors = ValidationErrors::default();

        self.state = SubmissionState::Submitting;
        let result = match self.resume.id.clone() {
            Some(id) => {
                info!("Updating resume {id}");
                store
                    .update_resume(&id, &self.resume)
                    .await
                    .map(|()| SubmitOutcome::Updated { id: id.clone() })
            }
            None => {
                info!("Creating resume");
                store
                    .create_resume(&self.resume)
                    .await
                    .map(|id| SubmitOutcome::Created { id })
            }
        };

        match result {
            Ok(outcome) => {
                self.resume.id = Some(outcome.id().to_string());
                self.state = SubmissionState::Done(outcome.clone());
                notifier.notify_success(outcome.message());
                navigator.go_to(Route::Dashboard, None);
                Ok(outcome)
            }
            Err(e) => {
                error!("Failed to save resume: {e}");
                self.state = SubmissionState::Idle;
                notifier.notify_error(SAVE_FAILED_MESSAGE);
                Err(SubmitError::Store(e))
            }
        }
    }
}
