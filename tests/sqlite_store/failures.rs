//! Storage failures abort one operation and leave the store usable.

use library_catalog::{Book, CatalogError, CatalogExt, SqliteStore};

#[test]
fn storage_failure_is_terminal_for_one_call_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.db");
    let store = SqliteStore::open(&path).unwrap();
    store
        .mutations()
        .add_book(&Book::new("LB001", "Dune", "Herbert", "123", "Available"))
        .unwrap();

    // Break the join target behind the store's back.
    let saboteur = rusqlite::Connection::open(&path).unwrap();
    saboteur.execute_batch("DROP TABLE Reservations;").unwrap();
    drop(saboteur);

    let err = store.queries().book_detail("LB001").unwrap_err();
    assert!(matches!(err, CatalogError::StorageFailure(_)), "got {:?}", err);

    // Operations that do not touch the missing table still work.
    store
        .mutations()
        .add_book(&Book::new("LB002", "Emma", "Austen", "456", "Available"))
        .unwrap();
    let resolved = store.resolver().resolve("LB002").unwrap();
    assert_eq!(
        resolved,
        library_catalog::Resolution::Status {
            status: "Available".into()
        }
    );
}

#[test]
fn unopenable_path_is_a_storage_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("library.db");
    let err = SqliteStore::open(&path).unwrap_err();
    assert!(matches!(err, CatalogError::StorageFailure(_)), "got {:?}", err);
}
