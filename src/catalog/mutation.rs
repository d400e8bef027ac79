//! StatusMutations - writes that keep a book and its reservation consistent.
//!
//! Each operation runs as one store transaction, so a failure partway through
//! never leaves the Books and Reservations relations disagreeing.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CatalogError, EntityKind, Result};
use crate::model::Book;
use crate::store::EntityStore;

/// Result of a status update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub book_id: String,
    pub previous: String,
    pub current: String,
    /// Reservation rows whose status was rewritten alongside the book.
    pub reservations_updated: usize,
}

/// Result of a cascading delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedBook {
    pub book: Book,
    pub reservations_removed: usize,
}

/// Typed write access to the catalog.
pub struct StatusMutations<'a, S> {
    store: &'a S,
}

impl<'a, S: EntityStore> StatusMutations<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Insert a new book. Fails with `ConstraintViolation` if the id is taken.
    pub fn add_book(&self, book: &Book) -> Result<()> {
        self.store.transaction(|rows| {
            if rows.book(&book.book_id)?.is_some() {
                return Err(CatalogError::ConstraintViolation(format!(
                    "book {} already exists",
                    book.book_id
                )));
            }
            rows.insert_book(book)
        })?;

        info!(book_id = %book.book_id, status = %book.status, "book added");
        Ok(())
    }

    /// Set a book's status and propagate it to the book's reservation.
    pub fn update_status(&self, book_id: &str, new_status: &str) -> Result<StatusChange> {
        let change = self.store.transaction(|rows| {
            let book = rows
                .book(book_id)?
                .ok_or_else(|| CatalogError::not_found(EntityKind::Book, book_id))?;

            rows.set_book_status(book_id, new_status)?;
            let reservations_updated = rows.set_reservation_status_for_book(book_id, new_status)?;

            Ok(StatusChange {
                book_id: book_id.to_string(),
                previous: book.status,
                current: new_status.to_string(),
                reservations_updated,
            })
        })?;

        info!(
            book_id,
            previous = %change.previous,
            current = %change.current,
            reservations = change.reservations_updated,
            "book status updated"
        );
        Ok(change)
    }

    /// Remove a book together with every reservation referencing it.
    pub fn delete_book(&self, book_id: &str) -> Result<DeletedBook> {
        let deleted = self.store.transaction(|rows| {
            let book = rows
                .book(book_id)?
                .ok_or_else(|| CatalogError::not_found(EntityKind::Book, book_id))?;

            // Children first so the foreign key holds after every statement.
            let reservations_removed = rows.delete_reservations_for_book(book_id)?;
            rows.delete_book(book_id)?;

            Ok(DeletedBook {
                book,
                reservations_removed,
            })
        })?;

        info!(
            book_id,
            reservations = deleted.reservations_removed,
            "book deleted"
        );
        Ok(deleted)
    }
}
