//! The reference walk-through: add, reserve, resolve, update, delete.

use library_catalog::{CatalogError, CatalogExt, EntityKind, EntityStore, Resolution};

use crate::support::{dune, each_backend, seed_alice_reservation};
use crate::with_store;

fn status(s: &str) -> Resolution {
    Resolution::Status { status: s.into() }
}

fn walkthrough<S: EntityStore>(store: &S) {
    store.mutations().add_book(&dune()).unwrap();

    let detail = store.queries().book_detail("LB001").unwrap();
    assert_eq!(detail.book, dune());
    assert!(!detail.is_reserved());

    seed_alice_reservation(store);
    let detail = store.queries().book_detail("LB001").unwrap();
    let reserver = detail.reserved_by.expect("reservation should be joined");
    assert_eq!(reserver.name, "Alice");
    assert_eq!(reserver.email, "a@x.com");

    let resolver = store.resolver();
    assert_eq!(resolver.resolve("LB001").unwrap(), status("Available"));
    assert_eq!(resolver.resolve("LU001").unwrap(), status("Available"));
    assert_eq!(resolver.resolve("LR001").unwrap(), status("Available"));

    store
        .mutations()
        .update_status("LB001", "Checked Out")
        .unwrap();
    assert_eq!(resolver.resolve("LB001").unwrap(), status("Checked Out"));

    store.mutations().delete_book("LB001").unwrap();
    assert_eq!(
        resolver.resolve("LR001").unwrap_err(),
        CatalogError::not_found(EntityKind::Reservation, "LR001")
    );
    assert!(store.queries().book_detail("LB001").unwrap_err().is_not_found());
}

#[test]
fn reference_walkthrough() {
    each_backend(|backend| with_store!(backend(), |store| walkthrough(store)));
}

#[test]
fn title_resolution_returns_joined_rows() {
    each_backend(|backend| {
        with_store!(backend(), |store| {
            store.mutations().add_book(&dune()).unwrap();
            seed_alice_reservation(store);

            match store.resolver().resolve("Dune").unwrap() {
                Resolution::Matches { books } => {
                    assert_eq!(books.len(), 1);
                    assert_eq!(books[0].reserved_by.as_ref().unwrap().name, "Alice");
                }
                other => panic!("expected title matches, got {:?}", other),
            }
            assert_eq!(
                store.resolver().resolve("Unknown Title").unwrap(),
                Resolution::Matches { books: vec![] }
            );
        })
    });
}

#[test]
fn empty_catalog_reads_are_empty_not_errors() {
    each_backend(|backend| {
        with_store!(backend(), |store| {
            assert!(store.queries().list_books().unwrap().is_empty());
            assert!(store.queries().search_by_title("Dune").unwrap().is_empty());
        })
    });
}
