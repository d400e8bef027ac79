//! Shared fixtures for catalog tests.

use library_catalog::{Book, EntityStore, Fixtures, InMemoryStore, Reservation, SqliteStore, User};

/// Run `check` once per store backend.
pub fn each_backend(check: impl Fn(&dyn Fn() -> Backend)) {
    check(&|| Backend::Memory(InMemoryStore::new()));
    check(&|| Backend::Sqlite(SqliteStore::open_in_memory().unwrap()));
}

pub enum Backend {
    Memory(InMemoryStore),
    Sqlite(SqliteStore),
}

/// Dispatch a generic body to whichever backend is held.
#[macro_export]
macro_rules! with_store {
    ($backend:expr, |$store:ident| $body:expr) => {
        match $backend {
            $crate::support::Backend::Memory(ref $store) => $body,
            $crate::support::Backend::Sqlite(ref $store) => $body,
        }
    };
}

pub fn dune() -> Book {
    Book::new("LB001", "Dune", "Herbert", "123", "Available")
}

/// Alice (LU001) and her reservation LR001 of LB001. The book must already exist.
pub fn seed_alice_reservation<S: EntityStore>(store: &S) {
    Fixtures {
        books: vec![],
        users: vec![User::new("LU001", "Alice", "a@x.com")],
        reservations: vec![Reservation::new("LR001", "LB001", "LU001", "2024-01-01")],
    }
    .apply(store)
    .unwrap();
}
