//! Handler: book.search

use serde::Deserialize;
use serde_json::{json, Value};

use crate::catalog::CatalogExt;
use crate::dispatch::{Context, HandlerError};
use crate::store::EntityStore;

pub const COMMAND: &str = "book.search";

#[derive(Deserialize)]
pub struct Input {
    pub title: String,
}

pub fn guard<S: EntityStore>(ctx: &Context<'_, S>) -> bool {
    ctx.has_field("title")
}

pub fn handle<S: EntityStore>(ctx: &Context<'_, S>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let books = ctx.store().queries().search_by_title(&input.title)?;
    Ok(json!({ "books": books }))
}
