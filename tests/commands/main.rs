//! Integration tests for the command surface (dispatch + handlers).

mod lifecycle;
mod validation;

use library_catalog::dispatch::Service;
use library_catalog::{handlers, InMemoryStore};

pub fn service() -> Service<InMemoryStore> {
    handlers::catalog_service(InMemoryStore::new())
}
