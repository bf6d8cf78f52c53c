//! Person record intake: validation, sanitization, persistence, and lookup.
//!
//! The intake path is strictly validate → sanitize → insert; nothing reaches
//! storage unless every field constraint holds, and stored records are never
//! updated or deleted.

pub mod domain;
pub mod repository;
pub mod router;
pub mod sanitize;
pub mod service;
pub mod sqlite;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{PersonId, PersonRecord, PersonSubmission, SubmissionField};
pub use repository::{NewPerson, PersonRepository, RepositoryError};
pub use router::person_router;
pub use sanitize::escape_html;
pub use service::{IntakeError, PersonIntakeService};
pub use sqlite::SqlitePersonRepository;
pub use validation::{validate, FieldViolation, ValidSubmission, ViolationKind};
