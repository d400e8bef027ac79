//! Entity Store - durable storage for Books, Users and Reservations.
//!
//! Two backends share one contract:
//! - [`InMemoryStore`] for tests and development,
//! - [`SqliteStore`] for a persistent relational database.
//!
//! Rows are read through [`StoreRead`] and written through [`StoreWrite`].
//! A backend hands those out via [`EntityStore::read`] and
//! [`EntityStore::transaction`]; everything done inside one transaction
//! closure commits or rolls back as a unit.
//!
//! ## Example
//!
//! ```ignore
//! use library_catalog::{Book, EntityStore, InMemoryStore};
//!
//! let store = InMemoryStore::new();
//! store.transaction(|rows| rows.insert_book(&Book::new("LB001", "Dune", "Herbert", "123", "Available")))?;
//! let book = store.read(|rows| rows.book("LB001"))?;
//! ```

mod in_memory;
mod sqlite;

use crate::error::Result;
use crate::model::{Book, BookDetail, Reservation, User};

/// Predicate for the Book ⋈ Reservation ⋈ User join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    /// Every book in the catalog.
    All,
    /// Exactly one book by primary key.
    Id(String),
    /// Books whose title equals the given text exactly.
    Title(String),
}

impl BookFilter {
    pub(crate) fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::All => true,
            BookFilter::Id(id) => book.book_id == *id,
            BookFilter::Title(title) => book.title == *title,
        }
    }
}

/// Row-level reads. Keyed reads return `None` when nothing matches;
/// multi-row reads are ordered by primary key.
pub trait StoreRead {
    fn book(&self, book_id: &str) -> Result<Option<Book>>;

    fn user(&self, user_id: &str) -> Result<Option<User>>;

    fn reservation(&self, reservation_id: &str) -> Result<Option<Reservation>>;

    fn reservations_for_book(&self, book_id: &str) -> Result<Vec<Reservation>>;

    fn reservations_for_user(&self, user_id: &str) -> Result<Vec<Reservation>>;

    /// Books matching `filter`, each left-joined with its reservation and user.
    fn book_details(&self, filter: &BookFilter) -> Result<Vec<BookDetail>>;
}

/// Row-level writes. Every write enforces key and referential constraints and
/// fails with `ConstraintViolation` instead of leaving an orphan behind.
pub trait StoreWrite: StoreRead {
    fn insert_book(&mut self, book: &Book) -> Result<()>;

    fn insert_user(&mut self, user: &User) -> Result<()>;

    /// Inserts a reservation. Its status is copied from the referenced book.
    fn insert_reservation(&mut self, reservation: &Reservation) -> Result<()>;

    /// Returns `false` if the book does not exist.
    fn set_book_status(&mut self, book_id: &str, status: &str) -> Result<bool>;

    /// Returns the number of reservation rows rewritten.
    fn set_reservation_status_for_book(&mut self, book_id: &str, status: &str) -> Result<usize>;

    /// Returns `false` if the book does not exist. Fails while reservations still
    /// reference the book.
    fn delete_book(&mut self, book_id: &str) -> Result<bool>;

    /// Returns the number of reservation rows removed.
    fn delete_reservations_for_book(&mut self, book_id: &str) -> Result<usize>;
}

/// A store that can be read from and written to in atomic units.
pub trait EntityStore: Send + Sync {
    /// Run `f` against a consistent view of the store.
    fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&dyn StoreRead) -> Result<T>;

    /// Run `f` inside a transaction. `Ok` commits every write made by `f`,
    /// `Err` discards all of them.
    fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn StoreWrite) -> Result<T>;
}

pub use in_memory::InMemoryStore;
pub use sqlite::SqliteStore;
