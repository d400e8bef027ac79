//! InMemoryStore - BTreeMap-backed entity store for testing and development.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use super::{BookFilter, EntityStore, StoreRead, StoreWrite};
use crate::error::{CatalogError, Result};
use crate::model::{Book, BookDetail, Record, Reservation, Reserver, User};

/// The three relations, keyed by primary key.
#[derive(Debug, Clone, Default)]
struct Tables {
    books: BTreeMap<String, Book>,
    users: BTreeMap<String, User>,
    reservations: BTreeMap<String, Reservation>,
}

fn insert_row<R: Record>(table: &mut BTreeMap<String, R>, row: &R) -> Result<()> {
    if table.contains_key(row.id()) {
        return Err(CatalogError::ConstraintViolation(format!(
            "{}.{} '{}' already exists",
            R::TABLE,
            R::KEY,
            row.id()
        )));
    }
    table.insert(row.id().to_string(), row.clone());
    Ok(())
}

impl StoreRead for Tables {
    fn book(&self, book_id: &str) -> Result<Option<Book>> {
        Ok(self.books.get(book_id).cloned())
    }

    fn user(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.users.get(user_id).cloned())
    }

    fn reservation(&self, reservation_id: &str) -> Result<Option<Reservation>> {
        Ok(self.reservations.get(reservation_id).cloned())
    }

    fn reservations_for_book(&self, book_id: &str) -> Result<Vec<Reservation>> {
        Ok(self
            .reservations
            .values()
            .filter(|r| r.book_id == book_id)
            .cloned()
            .collect())
    }

    fn reservations_for_user(&self, user_id: &str) -> Result<Vec<Reservation>> {
        Ok(self
            .reservations
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    fn book_details(&self, filter: &BookFilter) -> Result<Vec<BookDetail>> {
        let details = self
            .books
            .values()
            .filter(|book| filter.matches(book))
            .map(|book| {
                let reserved_by = self
                    .reservations
                    .values()
                    .find(|r| r.book_id == book.book_id)
                    .and_then(|r| {
                        self.users.get(&r.user_id).map(|user| Reserver {
                            reservation_id: r.reservation_id.clone(),
                            user_id: user.user_id.clone(),
                            name: user.name.clone(),
                            email: user.email.clone(),
                            reservation_date: r.reservation_date.clone(),
                        })
                    });
                BookDetail {
                    book: book.clone(),
                    reserved_by,
                }
            })
            .collect();
        Ok(details)
    }
}

impl StoreWrite for Tables {
    fn insert_book(&mut self, book: &Book) -> Result<()> {
        insert_row(&mut self.books, book)
    }

    fn insert_user(&mut self, user: &User) -> Result<()> {
        insert_row(&mut self.users, user)
    }

    fn insert_reservation(&mut self, reservation: &Reservation) -> Result<()> {
        let book = self.books.get(&reservation.book_id).ok_or_else(|| {
            CatalogError::ConstraintViolation(format!(
                "reservation {} references missing book {}",
                reservation.reservation_id, reservation.book_id
            ))
        })?;
        if !self.users.contains_key(&reservation.user_id) {
            return Err(CatalogError::ConstraintViolation(format!(
                "reservation {} references missing user {}",
                reservation.reservation_id, reservation.user_id
            )));
        }
        if self
            .reservations
            .values()
            .any(|r| r.book_id == reservation.book_id)
        {
            return Err(CatalogError::ConstraintViolation(format!(
                "book {} already has a reservation",
                reservation.book_id
            )));
        }

        let mut row = reservation.clone();
        row.status = book.status.clone();
        insert_row(&mut self.reservations, &row)
    }

    fn set_book_status(&mut self, book_id: &str, status: &str) -> Result<bool> {
        match self.books.get_mut(book_id) {
            Some(book) => {
                book.status = status.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn set_reservation_status_for_book(&mut self, book_id: &str, status: &str) -> Result<usize> {
        let mut updated = 0;
        for reservation in self
            .reservations
            .values_mut()
            .filter(|r| r.book_id == book_id)
        {
            reservation.status = status.to_string();
            updated += 1;
        }
        Ok(updated)
    }

    fn delete_book(&mut self, book_id: &str) -> Result<bool> {
        if self.reservations.values().any(|r| r.book_id == book_id) {
            return Err(CatalogError::ConstraintViolation(format!(
                "book {} is still referenced by a reservation",
                book_id
            )));
        }
        Ok(self.books.remove(book_id).is_some())
    }

    fn delete_reservations_for_book(&mut self, book_id: &str) -> Result<usize> {
        let before = self.reservations.len();
        self.reservations.retain(|_, r| r.book_id != book_id);
        Ok(before - self.reservations.len())
    }
}

/// In-memory entity store.
///
/// Transactions stage their writes on a copy of the tables and swap it in only
/// on success. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntityStore for InMemoryStore {
    fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&dyn StoreRead) -> Result<T>,
    {
        let tables = self
            .tables
            .read()
            .map_err(|_| CatalogError::StorageFailure("lock poisoned".into()))?;
        f(&*tables)
    }

    fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn StoreWrite) -> Result<T>,
    {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| CatalogError::StorageFailure("lock poisoned".into()))?;

        let mut staged = tables.clone();
        match f(&mut staged) {
            Ok(value) => {
                *tables = staged;
                Ok(value)
            }
            Err(err) => {
                debug!(error = %err, "in-memory transaction rolled back");
                Err(err)
            }
        }
    }
}
