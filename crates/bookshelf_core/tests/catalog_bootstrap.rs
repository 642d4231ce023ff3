use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{
    bootstrap_catalog, seed_catalog, Book, BookRepository, BootstrapError, CatalogService,
    SqliteBookRepository, SEED_BOOKS,
};
use rusqlite::Connection;

#[test]
fn fresh_database_lists_exactly_the_seed_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.db");

    let report = bootstrap_catalog(&path).unwrap();
    assert_eq!(report.inserted, 3);
    assert_eq!(report.total, 3);

    let conn = Connection::open(&path).unwrap();
    let service = CatalogService::new(SqliteBookRepository::new(&conn));
    let books = service.list_all().unwrap();

    assert_eq!(
        books,
        vec![
            Book::new(
                0,
                "A Fire Upon the Deep",
                "Vernor Vinge",
                "The coldsleep itself was dreamless.",
                1992,
            ),
            Book::new(
                1,
                "The Ones Who Walk Away From Omelas",
                "Ursula K. Le Guin",
                "With a clamor of bells that set the swallows soaring, the Festival",
                1973,
            ),
            Book::new(
                2,
                "Dhalgren",
                "Samuel R. Delany",
                "to wound the autumnal city.",
                1975,
            ),
        ]
    );
}

#[test]
fn rerunning_bootstrap_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.db");

    bootstrap_catalog(&path).unwrap();
    let second = bootstrap_catalog(&path).unwrap();
    let third = bootstrap_catalog(&path).unwrap();

    assert_eq!(second.inserted, 0);
    assert_eq!(second.total, 3);
    assert_eq!(third.total, 3);
}

#[test]
fn seeding_keeps_existing_row_with_same_id() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO books VALUES (1, 'Local Copy', 'Someone', 'It began.', 2020);",
        [],
    )
    .unwrap();

    let report = seed_catalog(&mut conn).unwrap();
    assert_eq!(report.inserted, SEED_BOOKS.len() - 1);
    assert_eq!(report.total, 3);

    let title: String = conn
        .query_row("SELECT title FROM books WHERE id = 1;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(title, "Local Copy");
}

#[test]
fn text_years_from_legacy_seed_read_as_integers() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO books VALUES (2, 'Dhalgren', 'Samuel R. Delany',
            'to wound the autumnal city.', '1975');",
        [],
    )
    .unwrap();

    let books = SqliteBookRepository::new(&conn).list_books().unwrap();
    assert_eq!(books[0].year_published, Some(1975));
}

#[test]
fn non_numeric_year_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO books VALUES (5, 'T', 'A', 'S', 'circa 1900');",
        [],
    )
    .unwrap();

    let err = SqliteBookRepository::new(&conn).list_books().unwrap_err();
    assert!(err.to_string().contains("circa 1900"));
}

#[test]
fn bootstrap_reports_open_failure_as_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("books.db");

    let err = bootstrap_catalog(&path).unwrap_err();
    assert!(matches!(err, BootstrapError::Open(_)));
    assert!(err.is_fatal());
}

#[test]
fn bootstrap_reports_schema_failure_as_non_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = bootstrap_catalog(&path).unwrap_err();
    assert!(matches!(err, BootstrapError::Schema(_)));
    assert!(!err.is_fatal());
}
