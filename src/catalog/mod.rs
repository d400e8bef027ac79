//! Catalog services - typed read and write operations on top of an entity store.
//!
//! ## Example
//!
//! ```ignore
//! use library_catalog::{Book, CatalogExt, InMemoryStore};
//!
//! let store = InMemoryStore::new();
//! store.mutations().add_book(&Book::new("LB001", "Dune", "Herbert", "123", "Available"))?;
//! store.mutations().update_status("LB001", "Checked Out")?;
//! let detail = store.queries().book_detail("LB001")?;
//! let status = store.resolver().resolve("LB001")?;
//! ```

mod mutation;
mod query;

pub use mutation::{DeletedBook, StatusChange, StatusMutations};
pub use query::CatalogQueries;

use crate::identifier::Resolver;
use crate::store::EntityStore;

/// Extension trait handing out the catalog services for any entity store.
pub trait CatalogExt: EntityStore + Sized {
    /// Read operations: detail, list, title search.
    fn queries(&self) -> CatalogQueries<'_, Self> {
        CatalogQueries::new(self)
    }

    /// Write operations: add, status update, cascading delete.
    fn mutations(&self) -> StatusMutations<'_, Self> {
        StatusMutations::new(self)
    }

    /// Free-text identifier resolution.
    fn resolver(&self) -> Resolver<'_, Self> {
        Resolver::new(self)
    }
}

impl<S: EntityStore> CatalogExt for S {}
