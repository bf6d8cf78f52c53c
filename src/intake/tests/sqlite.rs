use crate::intake::repository::{NewPerson, PersonRepository};
use crate::intake::sqlite::SqlitePersonRepository;

fn new_person(first: &str, last: &str, email: &str) -> NewPerson {
    NewPerson {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
    }
}

#[test]
fn insert_and_list_preserve_insertion_order() {
    let repository = SqlitePersonRepository::open_in_memory().expect("store opens");

    for first in ["Alice", "Brenda", "Carol"] {
        repository
            .insert(new_person(first, "Jones", "a@example.com"))
            .expect("insert succeeds");
    }

    let people = repository.list().expect("list succeeds");
    assert_eq!(people.len(), 3);
    let ids: Vec<_> = people.iter().map(|record| record.id.0).collect();
    assert!(
        ids.windows(2).all(|pair| pair[0] < pair[1]),
        "ids must increase in insertion order"
    );
    assert_eq!(people[0].first_name, "Alice");
    assert_eq!(people[2].first_name, "Carol");
}

#[test]
fn find_by_first_name_is_exact() {
    let repository = SqlitePersonRepository::open_in_memory().expect("store opens");
    repository
        .insert(new_person("Robert", "Smith", "robert@example.com"))
        .expect("insert succeeds");
    repository
        .insert(new_person("Roberta", "Smith", "roberta@example.com"))
        .expect("insert succeeds");

    let matches = repository
        .find_by_first_name("Robert")
        .expect("lookup succeeds");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].email, "robert@example.com");

    let misses = repository
        .find_by_first_name("Bob")
        .expect("lookup succeeds");
    assert!(misses.is_empty());
}

#[test]
fn sql_syntax_in_lookup_name_cannot_alter_the_query() {
    let repository = SqlitePersonRepository::open_in_memory().expect("store opens");
    repository
        .insert(new_person("Robert", "Smith", "robert@example.com"))
        .expect("insert succeeds");

    for crafted in [
        "Robert'; DROP TABLE people; --",
        "' OR '1'='1",
        "Robert\" OR 1=1",
    ] {
        let matches = repository
            .find_by_first_name(crafted)
            .expect("crafted name is just data");
        assert!(matches.is_empty(), "crafted name must not match extra rows");
    }

    // Table intact, record still present.
    let people = repository.list().expect("list succeeds");
    assert_eq!(people.len(), 1);
}

#[test]
fn file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("people.db");

    {
        let repository = SqlitePersonRepository::open(&path).expect("store opens");
        repository
            .insert(new_person("Diane", "Keaton", "diane@example.com"))
            .expect("insert succeeds");
    }

    let reopened = SqlitePersonRepository::open(&path).expect("store reopens");
    let people = reopened.list().expect("list succeeds");
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].first_name, "Diane");
}
