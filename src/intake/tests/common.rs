use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::intake::domain::{PersonId, PersonRecord, PersonSubmission};
use crate::intake::repository::{NewPerson, PersonRepository, RepositoryError};
use crate::intake::service::PersonIntakeService;

pub(super) fn submission() -> PersonSubmission {
    PersonSubmission {
        first_name: "Robert".to_string(),
        last_name: "Smith".to_string(),
        email: "robert.smith@example.com".to_string(),
    }
}

pub(super) fn submission_with(first: &str, last: &str, email: &str) -> PersonSubmission {
    PersonSubmission {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
    }
}

pub(super) fn build_service() -> (PersonIntakeService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = PersonIntakeService::new(repository.clone());
    (service, repository)
}

/// In-memory repository mirroring the append-only SQLite contract.
#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<Vec<PersonRecord>>>,
}

impl PersonRepository for MemoryRepository {
    fn insert(&self, person: NewPerson) -> Result<PersonRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let id = PersonId(guard.len() as i64 + 1);
        let record = PersonRecord {
            id,
            first_name: person.first_name,
            last_name: person.last_name,
            email: person.email,
        };
        guard.push(record.clone());
        Ok(record)
    }

    fn list(&self) -> Result<Vec<PersonRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.clone())
    }

    fn find_by_first_name(&self, name: &str) -> Result<Vec<PersonRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| record.first_name == name)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl PersonRepository for UnavailableRepository {
    fn insert(&self, _person: NewPerson) -> Result<PersonRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<PersonRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_first_name(&self, _name: &str) -> Result<Vec<PersonRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 payload")
}
