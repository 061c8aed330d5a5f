//! Integration tests for `DieselStudentRepository` against PostgreSQL.
//!
//! Set `ROSTER_TEST_DATABASE_URL` to a disposable database to run them;
//! without it each test prints a skip marker and returns. Tests share the
//! table, so every record uses a unique email and is removed afterwards.

use roster::domain::ports::{StudentRepository, StudentRepositoryError};
use roster::domain::{Age, Email, PhotoRef, StudentDetails, StudentName};
use roster::outbound::persistence::{DbPool, DieselStudentRepository, PoolConfig, run_migrations};
use rstest::rstest;
use tokio::sync::OnceCell;
use uuid::Uuid;

mod support;

use support::test_database_url;

static MIGRATED: OnceCell<()> = OnceCell::const_new();

async fn repository() -> Option<DieselStudentRepository> {
    let url = test_database_url()?;
    MIGRATED
        .get_or_init(|| async {
            run_migrations(&url).await.expect("migrations apply");
        })
        .await;
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(2))
        .await
        .expect("pool builds");
    Some(DieselStudentRepository::new(pool))
}

fn details(name: &str, email: &str) -> StudentDetails {
    StudentDetails {
        name: StudentName::new(name).expect("valid name"),
        age: Age::new(30).expect("valid age"),
        email: Email::new(email).expect("valid email"),
        photo: PhotoRef::placeholder(),
    }
}

fn unique_email(tag: &str) -> String {
    format!("{tag}-{}@example.com", Uuid::new_v4().simple())
}

#[rstest]
#[tokio::test]
async fn insert_then_find_round_trips_the_record() {
    let Some(repo) = repository().await else {
        return;
    };
    let email = unique_email("ada");
    let created = repo
        .insert(&details("Ada", &email))
        .await
        .expect("insert succeeds");

    let by_id = repo.find_by_id(created.id()).await.expect("find by id");
    assert_eq!(by_id.as_ref(), Some(&created));
    let by_email = repo
        .find_by_email(created.email())
        .await
        .expect("find by email");
    assert_eq!(by_email, Some(created.clone()));
    assert!(created.photo().is_placeholder());

    assert!(repo.delete(created.id()).await.expect("delete"));
}

#[rstest]
#[tokio::test]
async fn unique_index_rejects_a_second_insert() {
    let Some(repo) = repository().await else {
        return;
    };
    let email = unique_email("dup");
    let first = repo.insert(&details("First", &email)).await.expect("insert");

    let err = repo
        .insert(&details("Second", &email))
        .await
        .expect_err("duplicate refused");
    assert!(matches!(err, StudentRepositoryError::DuplicateEmail { .. }));

    repo.delete(first.id()).await.expect("cleanup");
}

#[rstest]
#[tokio::test]
async fn update_replaces_fields_and_delete_reports_absence() {
    let Some(repo) = repository().await else {
        return;
    };
    let created = repo
        .insert(&details("Grace", &unique_email("grace")))
        .await
        .expect("insert");

    let mut changed = created.details().clone();
    changed.name = StudentName::new("Grace Hopper").expect("valid name");
    changed.photo = PhotoRef::new("students/photos/grace.png").expect("valid photo");
    let updated = roster::domain::Student::new(created.id(), changed);
    repo.update(&updated).await.expect("update");

    let stored = repo
        .find_by_id(created.id())
        .await
        .expect("find")
        .expect("present");
    assert_eq!(stored.name().as_ref(), "Grace Hopper");
    assert_eq!(stored.photo().as_ref(), "students/photos/grace.png");

    assert!(repo.delete(created.id()).await.expect("delete"));
    assert!(!repo.delete(created.id()).await.expect("second delete"));
    let err = repo.update(&updated).await.expect_err("row is gone");
    assert!(matches!(err, StudentRepositoryError::NotFound { .. }));
}

#[rstest]
#[tokio::test]
async fn list_returns_rows_in_insertion_order() {
    let Some(repo) = repository().await else {
        return;
    };
    let first = repo
        .insert(&details("One", &unique_email("one")))
        .await
        .expect("insert");
    let second = repo
        .insert(&details("Two", &unique_email("two")))
        .await
        .expect("insert");

    let ids: Vec<_> = repo
        .list()
        .await
        .expect("list")
        .into_iter()
        .map(|student| student.id())
        .filter(|id| *id == first.id() || *id == second.id())
        .collect();
    assert_eq!(ids, [first.id(), second.id()]);

    repo.delete(first.id()).await.expect("cleanup");
    repo.delete(second.id()).await.expect("cleanup");
}
