//! CatalogQueries - side-effect free reads over the joined catalog view.

use tracing::debug;

use crate::error::{CatalogError, EntityKind, Result};
use crate::model::BookDetail;
use crate::store::{BookFilter, EntityStore};

/// Typed read access to the catalog.
pub struct CatalogQueries<'a, S> {
    store: &'a S,
}

impl<'a, S: EntityStore> CatalogQueries<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// A book with its reservation and reserving user, if any.
    ///
    /// An unreserved book is a valid result; only a missing book is `NotFound`.
    pub fn book_detail(&self, book_id: &str) -> Result<BookDetail> {
        debug!(book_id, "fetching book detail");
        self.store
            .read(|rows| rows.book_details(&BookFilter::Id(book_id.to_string())))?
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::not_found(EntityKind::Book, book_id))
    }

    /// Every book, ordered by id. Empty when the catalog is empty.
    pub fn list_books(&self) -> Result<Vec<BookDetail>> {
        self.store.read(|rows| rows.book_details(&BookFilter::All))
    }

    /// Books whose title matches exactly, ordered by id.
    pub fn search_by_title(&self, title: &str) -> Result<Vec<BookDetail>> {
        debug!(title, "searching by title");
        self.store
            .read(|rows| rows.book_details(&BookFilter::Title(title.to_string())))
    }
}
