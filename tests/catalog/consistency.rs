//! Status consistency and atomicity across Book and Reservation.

use library_catalog::{Book, CatalogError, CatalogExt, EntityStore, Resolution};

use crate::support::{dune, each_backend, seed_alice_reservation};
use crate::with_store;

fn reserved<S: EntityStore>(store: &S) {
    store.mutations().add_book(&dune()).unwrap();
    seed_alice_reservation(store);
}

#[test]
fn status_update_is_visible_everywhere() {
    each_backend(|backend| {
        with_store!(backend(), |store| {
            reserved(store);
            let change = store.mutations().update_status("LB001", "Lost").unwrap();
            assert_eq!(change.reservations_updated, 1);

            assert_eq!(store.queries().book_detail("LB001").unwrap().book.status, "Lost");
            let reservation = store
                .read(|rows| rows.reservation("LR001"))
                .unwrap()
                .unwrap();
            assert_eq!(reservation.status, "Lost");
            assert_eq!(
                store.resolver().resolve("LR001").unwrap(),
                Resolution::Status {
                    status: "Lost".into()
                }
            );
        })
    });
}

#[test]
fn delete_leaves_no_orphaned_reservation() {
    each_backend(|backend| {
        with_store!(backend(), |store| {
            reserved(store);
            let deleted = store.mutations().delete_book("LB001").unwrap();
            assert_eq!(deleted.reservations_removed, 1);

            let orphans = store
                .read(|rows| rows.reservations_for_book("LB001"))
                .unwrap();
            assert!(orphans.is_empty());
            // The user is reference data and survives the cascade.
            assert!(store.read(|rows| rows.user("LU001")).unwrap().is_some());
        })
    });
}

#[test]
fn second_delete_is_not_found() {
    each_backend(|backend| {
        with_store!(backend(), |store| {
            store.mutations().add_book(&dune()).unwrap();
            store.mutations().delete_book("LB001").unwrap();

            let err = store.mutations().delete_book("LB001").unwrap_err();
            assert!(err.is_not_found(), "got {:?}", err);
        })
    });
}

#[test]
fn duplicate_add_is_a_constraint_violation() {
    each_backend(|backend| {
        with_store!(backend(), |store| {
            store.mutations().add_book(&dune()).unwrap();
            let err = store
                .mutations()
                .add_book(&Book::new("LB001", "Other", "Someone", "999", "Lost"))
                .unwrap_err();
            assert!(err.is_constraint_violation());
            // The original row is untouched.
            assert_eq!(store.queries().book_detail("LB001").unwrap().book, dune());
        })
    });
}

#[test]
fn aborted_transaction_applies_nothing() {
    each_backend(|backend| {
        with_store!(backend(), |store| {
            reserved(store);
            let result: library_catalog::Result<()> = store.transaction(|rows| {
                rows.delete_reservations_for_book("LB001")?;
                rows.delete_book("LB001")?;
                Err(CatalogError::StorageFailure("simulated crash".into()))
            });
            assert!(result.is_err());

            let detail = store.queries().book_detail("LB001").unwrap();
            assert!(detail.is_reserved());
        })
    });
}
