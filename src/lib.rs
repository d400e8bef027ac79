//! Library catalog: books, users, and the reservations linking them.
//!
//! - [`store`] holds the three relations behind the [`EntityStore`] trait, with an
//!   in-memory backend and a SQLite backend.
//! - [`identifier`] classifies free-text tokens (`LB…`, `LU…`, `LR…`, titles) and
//!   resolves them to a status or a set of books.
//! - [`catalog`] provides the typed read ([`CatalogQueries`]) and write
//!   ([`StatusMutations`]) services.
//! - [`dispatch`] and [`handlers`] expose those services as named commands.

pub mod catalog;
pub mod cli;
pub mod dispatch;
mod error;
pub mod fixtures;
pub mod handlers;
pub mod identifier;
mod model;
pub mod store;

pub use catalog::{CatalogExt, CatalogQueries, DeletedBook, StatusChange, StatusMutations};
pub use error::{CatalogError, EntityKind, Result};
pub use fixtures::{Fixtures, SeedStats};
pub use identifier::{classify, Resolution, Resolver, Token};
pub use model::{Book, BookDetail, Record, Reservation, Reserver, User};
pub use store::{BookFilter, EntityStore, InMemoryStore, SqliteStore, StoreRead, StoreWrite};
