use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::domain::{PersonSubmission, SubmissionField};

pub(crate) const NAME_MIN_LEN: usize = 2;
pub(crate) const NAME_MAX_LEN: usize = 100;
pub(crate) const EMAIL_MAX_LEN: usize = 200;

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z ]+$").expect("name pattern compiles"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Pragmatic syntax check: one @, non-empty local part, dotted domain,
    // no whitespace anywhere.
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
    })
}

/// The specific constraint a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Missing,
    TooShort,
    TooLong,
    DisallowedCharacters,
    MalformedEmail,
}

/// A single field-level rejection reason, reportable to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{field:?}: {message}")]
pub struct FieldViolation {
    pub field: SubmissionField,
    pub kind: ViolationKind,
    pub message: String,
}

impl FieldViolation {
    fn new(field: SubmissionField, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

/// A submission whose fields have all passed validation. Values are trimmed
/// but not yet sanitized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Validates a raw submission, collecting every field failure rather than
/// stopping at the first one so the caller can report per-field reasons.
pub fn validate(submission: &PersonSubmission) -> Result<ValidSubmission, Vec<FieldViolation>> {
    let mut violations = Vec::new();

    let first_name = check_name(SubmissionField::FirstName, &submission.first_name)
        .map_err(|violation| violations.push(violation))
        .ok();
    let last_name = check_name(SubmissionField::LastName, &submission.last_name)
        .map_err(|violation| violations.push(violation))
        .ok();
    let email = check_email(&submission.email)
        .map_err(|violation| violations.push(violation))
        .ok();

    match (first_name, last_name, email) {
        (Some(first_name), Some(last_name), Some(email)) => Ok(ValidSubmission {
            first_name,
            last_name,
            email,
        }),
        _ => Err(violations),
    }
}

fn check_name(field: SubmissionField, raw: &str) -> Result<String, FieldViolation> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldViolation::new(
            field,
            ViolationKind::Missing,
            "value is required",
        ));
    }
    let length = value.chars().count();
    if length < NAME_MIN_LEN {
        return Err(FieldViolation::new(
            field,
            ViolationKind::TooShort,
            format!("must be at least {NAME_MIN_LEN} characters"),
        ));
    }
    if length > NAME_MAX_LEN {
        return Err(FieldViolation::new(
            field,
            ViolationKind::TooLong,
            format!("must be at most {NAME_MAX_LEN} characters"),
        ));
    }
    if !name_pattern().is_match(value) {
        return Err(FieldViolation::new(
            field,
            ViolationKind::DisallowedCharacters,
            "only letters and spaces allowed",
        ));
    }
    Ok(value.to_string())
}

fn check_email(raw: &str) -> Result<String, FieldViolation> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldViolation::new(
            SubmissionField::Email,
            ViolationKind::Missing,
            "value is required",
        ));
    }
    if value.chars().count() > EMAIL_MAX_LEN {
        return Err(FieldViolation::new(
            SubmissionField::Email,
            ViolationKind::TooLong,
            format!("must be at most {EMAIL_MAX_LEN} characters"),
        ));
    }
    if !email_pattern().is_match(value) {
        return Err(FieldViolation::new(
            SubmissionField::Email,
            ViolationKind::MalformedEmail,
            "must be a valid email address",
        ));
    }
    Ok(value.to_string())
}
