use std::sync::Arc;

use tracing::info;

use super::domain::{PersonRecord, PersonSubmission};
use super::repository::{NewPerson, PersonRepository, RepositoryError};
use super::sanitize::escape_html;
use super::validation::{validate, FieldViolation};

/// Service composing validation, sanitization, and the person repository.
///
/// The repository is passed in explicitly rather than held as process-wide
/// state, so entry points and tests construct exactly the storage they need.
pub struct PersonIntakeService<R> {
    repository: Arc<R>,
}

impl<R> PersonIntakeService<R>
where
    R: PersonRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validates, sanitizes, and persists one submission.
    ///
    /// Storage is untouched when validation fails; the error carries every
    /// field-level reason so callers can report them individually.
    pub fn submit(&self, submission: PersonSubmission) -> Result<PersonRecord, IntakeError> {
        let valid = validate(&submission).map_err(IntakeError::Rejected)?;

        let person = NewPerson {
            first_name: escape_html(&valid.first_name),
            last_name: escape_html(&valid.last_name),
            email: escape_html(&valid.email),
        };

        let stored = self.repository.insert(person)?;
        info!(id = stored.id.0, "person record stored");
        Ok(stored)
    }

    /// Returns every stored record in insertion order.
    pub fn list(&self) -> Result<Vec<PersonRecord>, IntakeError> {
        Ok(self.repository.list()?)
    }

    /// Exact-match lookup on the first name; a miss is an empty vec, not an
    /// error.
    pub fn find_by_first_name(&self, name: &str) -> Result<Vec<PersonRecord>, IntakeError> {
        Ok(self.repository.find_by_first_name(name)?)
    }
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("submission rejected: {0:?}")]
    Rejected(Vec<FieldViolation>),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
