//! Handler: book.list

use serde_json::{json, Value};

use crate::catalog::CatalogExt;
use crate::dispatch::{Context, HandlerError};
use crate::store::EntityStore;

pub const COMMAND: &str = "book.list";

pub fn guard<S: EntityStore>(_ctx: &Context<'_, S>) -> bool {
    true
}

pub fn handle<S: EntityStore>(ctx: &Context<'_, S>) -> Result<Value, HandlerError> {
    let books = ctx.store().queries().list_books()?;
    Ok(json!({ "books": books }))
}
