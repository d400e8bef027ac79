//! Fixture loading for externally seeded reference data.
//!
//! Users and Reservations have no creation operation of their own; they enter
//! the catalog through a fixture document applied in a single transaction:
//!
//! ```json
//! {
//!   "books": [{ "book_id": "LB001", "title": "Dune", "author": "Herbert", "isbn": "123", "status": "Available" }],
//!   "users": [{ "user_id": "LU001", "name": "Alice", "email": "a@x.com" }],
//!   "reservations": [{ "reservation_id": "LR001", "book_id": "LB001", "user_id": "LU001", "reservation_date": "2024-01-01" }]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CatalogError, Result};
use crate::model::{Book, Reservation, User};
use crate::store::EntityStore;

/// Rows to seed into a store. Books go in first, then users, then reservations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

/// Counts of rows written by [`Fixtures::apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedStats {
    pub books: usize,
    pub users: usize,
    pub reservations: usize,
}

impl Fixtures {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CatalogError::StorageFailure(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Write every row in one transaction; any constraint failure seeds nothing.
    pub fn apply<S: EntityStore>(&self, store: &S) -> Result<SeedStats> {
        let stats = store.transaction(|rows| {
            for book in &self.books {
                rows.insert_book(book)?;
            }
            for user in &self.users {
                rows.insert_user(user)?;
            }
            for reservation in &self.reservations {
                rows.insert_reservation(reservation)?;
            }
            Ok(SeedStats {
                books: self.books.len(),
                users: self.users.len(),
                reservations: self.reservations.len(),
            })
        })?;

        info!(
            books = stats.books,
            users = stats.users,
            reservations = stats.reservations,
            "fixtures applied"
        );
        Ok(stats)
    }
}
