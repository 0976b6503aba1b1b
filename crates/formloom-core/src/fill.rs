#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

//! Fill session: page navigation and submission assembly.
//!
//! ```text
//! Filling(0) --advance--> Filling(1) --advance--> ... Filling(last) --submit--> Submitted
//!     ^                        |                            |
//!     +-------retreat----------+                            +-- invalid: stays, errors surfaced
//! ```
//!
//! - **Advance** validates the current page and moves forward only when it passes
//! - **Retreat** never validates and floors at page 0
//! - **Submit** is only legal on the last page; it re-validates that page,
//!   assembles the response map and becomes terminal
//!
//! A form with no pages is immediately submittable with an empty map. The
//! session owns no storage; [`FillSession::submit_to`] hands the map to a
//! [`FormStore`] and stays put if that fails so the user can retry.

use serde::Serialize;

use crate::collaborators::FormStore;
use crate::error::StructuralError;
use crate::field::{FieldId, FieldSpec, Value};
use crate::form::{FormDefinition, FormId, FormSubmission, Responses};
use crate::pages::{segment, Page, Pagination};
use crate::validation::{retain_known, validate_page, FieldErrors};
use crate::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════════
// STATES & OUTCOMES
// ═══════════════════════════════════════════════════════════════════════════

/// Where a fill session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum FillState {
    /// Collecting answers on a page
    Filling { page: usize },
    /// Terminal for this session
    Submitted,
}

/// Result of an advance attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Moved to this page
    Moved { page: usize },
    /// Current page failed validation; still on it
    Blocked(FieldErrors),
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Submission assembled; the session is now terminal
    Submitted(FormSubmission),
    /// Last page failed validation; still filling
    Rejected(FieldErrors),
}

// ═══════════════════════════════════════════════════════════════════════════
// FILL SESSION
// ═══════════════════════════════════════════════════════════════════════════

/// One person filling one form.
#[derive(Debug, Clone)]
pub struct FillSession {
    form_id: FormId,
    pagination: Pagination,
    state: FillState,
    responses: Responses,
    errors: FieldErrors,
}

impl FillSession {
    /// Start a session at the first page.
    #[must_use]
    pub fn new(form: &FormDefinition) -> Self {
        Self {
            form_id: form.id.clone(),
            pagination: segment(&form.elements),
            state: FillState::Filling { page: 0 },
            responses: Responses::new(),
            errors: FieldErrors::new(),
        }
    }

    /// Get current state
    #[must_use]
    pub const fn state(&self) -> FillState {
        self.state
    }

    /// Id of the form being filled.
    #[must_use]
    pub const fn form_id(&self) -> &FormId {
        &self.form_id
    }

    /// Current page index (the last page once submitted).
    #[must_use]
    pub fn page_index(&self) -> usize {
        match self.state {
            FillState::Filling { page } => page,
            FillState::Submitted => self.page_count().saturating_sub(1),
        }
    }

    /// Number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pagination.page_count()
    }

    /// Page being filled, if the form has any.
    #[must_use]
    pub fn current_page(&self) -> Option<&Page> {
        self.pagination.page(self.page_index())
    }

    /// Whether submit (rather than advance) is the next forward action.
    #[must_use]
    pub fn is_last_page(&self) -> bool {
        self.page_index().saturating_add(1) >= self.page_count()
    }

    /// Terminal thank-you screen, if the form defines one.
    #[must_use]
    pub const fn thank_you(&self) -> Option<&FieldSpec> {
        self.pagination.thank_you.as_ref()
    }

    /// Answers collected so far.
    #[must_use]
    pub const fn responses(&self) -> &Responses {
        &self.responses
    }

    /// Answer for one field.
    #[must_use]
    pub fn value(&self, id: &FieldId) -> Option<&Value> {
        self.responses.get(id)
    }

    /// Errors from the last failed advance or submit.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Fraction of pages completed, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        match (self.state, self.page_count()) {
            (FillState::Submitted, _) => 1.0,
            (FillState::Filling { .. }, 0) => 0.0,
            (FillState::Filling { page }, count) => page as f64 / count as f64,
        }
    }

    /// Record an answer. Clears any error shown for that field.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` once submitted
    /// - `UnknownField` if no page holds the field
    /// - `LayoutField` for layout-only fields
    pub fn set_value(&mut self, id: &FieldId, value: Value) -> Result<()> {
        self.ensure_filling("set a value")?;
        let field = self.find_field(id)?;
        if !field.takes_value() {
            return Err(StructuralError::LayoutField(id.clone()).into());
        }
        self.responses.insert(id.clone(), value);
        self.errors.remove(id);
        Ok(())
    }

    /// Remove an answer.
    ///
    /// # Errors
    ///
    /// Same as [`FillSession::set_value`].
    pub fn clear_value(&mut self, id: &FieldId) -> Result<()> {
        self.ensure_filling("clear a value")?;
        self.find_field(id)?;
        self.responses.remove(id);
        Ok(())
    }

    /// Validate the current page and move forward if it passes.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` on the last page (use submit) or once submitted.
    pub fn advance(&mut self) -> Result<Step> {
        let page = self.ensure_filling("advance")?;
        if self.is_last_page() {
            return Err(Error::invalid_transition(
                "cannot advance past the last page; submit instead",
            ));
        }

        let errors = self.current_page_errors();
        if !errors.is_empty() {
            tracing::debug!(page, errors = errors.len(), "page blocked by validation");
            self.errors = errors.clone();
            return Ok(Step::Blocked(errors));
        }

        let next = page.saturating_add(1);
        self.state = FillState::Filling { page: next };
        self.errors = FieldErrors::new();
        tracing::debug!(from = page, to = next, "advanced page");
        Ok(Step::Moved { page: next })
    }

    /// Move back one page without validating. Floors at 0.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` once submitted.
    pub fn retreat(&mut self) -> Result<usize> {
        let page = self.ensure_filling("retreat")?;
        let previous = page.saturating_sub(1);
        self.state = FillState::Filling { page: previous };
        self.errors = FieldErrors::new();
        tracing::debug!(from = page, to = previous, "retreated page");
        Ok(previous)
    }

    /// Validate the last page and, if it passes, assemble the submission and
    /// become terminal. The caller hands the submission to storage.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` when not on the last page or already submitted.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        match self.prepare_submit()? {
            Err(errors) => Ok(SubmitOutcome::Rejected(errors)),
            Ok(responses) => {
                let submission = FormSubmission::new(self.form_id.clone(), responses);
                Ok(self.finish(submission))
            }
        }
    }

    /// Like [`FillSession::submit`], but records the responses through
    /// `store` first. If the store fails the session stays on the last page
    /// with every answer intact.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` as for submit; collaborator errors as returned by
    /// the store.
    pub async fn submit_to(&mut self, store: &dyn FormStore) -> Result<SubmitOutcome> {
        let responses = match self.prepare_submit()? {
            Err(errors) => return Ok(SubmitOutcome::Rejected(errors)),
            Ok(responses) => responses,
        };

        let id = store
            .record_submission(&self.form_id, &responses)
            .await
            .map_err(|e| {
                tracing::warn!(form = %self.form_id, "recording submission failed: {e}");
                e
            })?;

        let submission = FormSubmission {
            id,
            ..FormSubmission::new(self.form_id.clone(), responses)
        };
        Ok(self.finish(submission))
    }

    /// Start over on the same form with no answers.
    pub fn restart(&mut self) {
        self.state = FillState::Filling { page: 0 };
        self.responses = Responses::new();
        self.errors = FieldErrors::new();
    }

    // ═══════════════════════════════════════════════════════════════════════
    // INTERNALS
    // ═══════════════════════════════════════════════════════════════════════

    fn ensure_filling(&self, action: &str) -> Result<usize> {
        match self.state {
            FillState::Filling { page } => Ok(page),
            FillState::Submitted => Err(Error::invalid_transition(format!(
                "cannot {action}: form already submitted"
            ))),
        }
    }

    fn find_field(&self, id: &FieldId) -> Result<&FieldSpec> {
        self.pagination
            .pages
            .iter()
            .flat_map(|page| page.fields.iter())
            .find(|field| &field.id == id)
            .ok_or_else(|| StructuralError::UnknownField(id.clone()).into())
    }

    fn current_page_errors(&self) -> FieldErrors {
        self.current_page()
            .map(|page| validate_page(page, &self.responses))
            .unwrap_or_default()
    }

    fn prepare_submit(&mut self) -> Result<std::result::Result<Responses, FieldErrors>> {
        self.ensure_filling("submit")?;
        if !self.is_last_page() {
            return Err(Error::invalid_transition(
                "submit is only available on the last page",
            ));
        }

        let errors = self.current_page_errors();
        if !errors.is_empty() {
            tracing::debug!(errors = errors.len(), "submission blocked by validation");
            self.errors = errors.clone();
            return Ok(Err(errors));
        }

        let all_fields = self.pagination.pages.iter().flat_map(|page| page.fields.iter());
        Ok(Ok(retain_known(all_fields, &self.responses)))
    }

    fn finish(&mut self, submission: FormSubmission) -> SubmitOutcome {
        self.state = FillState::Submitted;
        self.errors = FieldErrors::new();
        tracing::info!(
            form = %self.form_id,
            fields = submission.responses.len(),
            pages = self.page_count(),
            "form submitted"
        );
        SubmitOutcome::Submitted(submission)
    }
}
