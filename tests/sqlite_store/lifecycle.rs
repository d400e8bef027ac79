//! Open, close, and reopen an on-disk catalog.

use library_catalog::{Book, CatalogExt, Fixtures, Reservation, SqliteStore, User};

#[test]
fn data_survives_close_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.db");

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.location(), path.display().to_string());
    Fixtures {
        books: vec![Book::new("LB001", "Dune", "Herbert", "123", "Available")],
        users: vec![User::new("LU001", "Alice", "a@x.com")],
        reservations: vec![Reservation::new("LR001", "LB001", "LU001", "2024-01-01")],
    }
    .apply(&store)
    .unwrap();
    store
        .mutations()
        .update_status("LB001", "Checked Out")
        .unwrap();
    store.close().unwrap();

    let reopened = SqliteStore::open(&path).unwrap();
    let detail = reopened.queries().book_detail("LB001").unwrap();
    assert_eq!(detail.book.status, "Checked Out");
    assert_eq!(detail.reserved_by.unwrap().user_id, "LU001");
    reopened.close().unwrap();
}

#[test]
fn reopening_keeps_existing_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.db");

    let store = SqliteStore::open(&path).unwrap();
    store
        .mutations()
        .add_book(&Book::new("LB001", "Dune", "Herbert", "123", "Available"))
        .unwrap();
    drop(store);

    // Schema creation is idempotent; rows from the first session remain.
    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.queries().list_books().unwrap().len(), 1);
}
