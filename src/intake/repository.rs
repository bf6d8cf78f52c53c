use super::domain::{PersonRecord, PersonSubmission};

/// Validated, sanitized values ready for insertion. Only the service's
/// intake path constructs these, so everything a repository stores has
/// already passed the field checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewPerson {
    pub fn into_submission(self) -> PersonSubmission {
        PersonSubmission {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
///
/// The contract is append-only: there is no update or delete, and `insert`
/// either commits one full row or leaves storage unchanged.
pub trait PersonRepository: Send + Sync {
    /// Inserts one record and returns it with its storage-assigned id.
    fn insert(&self, person: NewPerson) -> Result<PersonRecord, RepositoryError>;
    /// Returns every record in insertion (id) order.
    fn list(&self) -> Result<Vec<PersonRecord>, RepositoryError>;
    /// Exact-match lookup on the first name; empty result on a miss.
    fn find_by_first_name(&self, name: &str) -> Result<Vec<PersonRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("stored row violates the record contract: {0}")]
    Corrupt(String),
}
