//! Command handlers, one file per catalog operation.
//!
//! | Command | Operation |
//! |---|---|
//! | `book.add` | add a book |
//! | `book.detail` | book with its reservation and reserving user |
//! | `status.resolve` | classify a token and resolve it to a status or title matches |
//! | `book.list` | every book |
//! | `book.search` | exact title search |
//! | `book.update_status` | status update propagated to the reservation |
//! | `book.delete` | cascading delete |
//! | `catalog.seed` | apply a fixture document |

pub mod book_add;
pub mod book_delete;
pub mod book_detail;
pub mod book_list;
pub mod book_search;
pub mod book_update_status;
pub mod catalog_seed;
pub mod status_resolve;

use crate::dispatch::Service;
use crate::store::EntityStore;

/// A service with every catalog command registered.
pub fn catalog_service<S: EntityStore + 'static>(store: S) -> Service<S> {
    crate::register_handlers!(
        Service::new(store),
        book_add,
        book_detail,
        status_resolve,
        book_list,
        book_search,
        book_update_status,
        book_delete,
        catalog_seed,
    )
}
