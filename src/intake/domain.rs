use serde::{Deserialize, Serialize};

/// Identifier assigned by storage; unique and increasing in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(pub i64);

/// Raw candidate input as received from the entry point, before any checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// A stored person record. Field values are trimmed and markup-neutralized;
/// records are never mutated after insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl PersonRecord {
    /// One-line rendering used by the plain-text search output.
    pub fn display_line(&self) -> String {
        format!("{} {} ({})", self.first_name, self.last_name, self.email)
    }
}

/// The fields a submission carries, used to attribute validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionField {
    FirstName,
    LastName,
    Email,
}

impl SubmissionField {
    pub const fn label(self) -> &'static str {
        match self {
            SubmissionField::FirstName => "first_name",
            SubmissionField::LastName => "last_name",
            SubmissionField::Email => "email",
        }
    }
}
