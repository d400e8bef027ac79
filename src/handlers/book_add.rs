//! Handler: book.add

use serde::Deserialize;
use serde_json::{json, Value};

use crate::catalog::CatalogExt;
use crate::dispatch::{Context, HandlerError};
use crate::model::Book;
use crate::store::EntityStore;

pub const COMMAND: &str = "book.add";

#[derive(Deserialize)]
pub struct Input {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub status: String,
}

pub fn guard<S: EntityStore>(ctx: &Context<'_, S>) -> bool {
    ctx.has_fields(&["book_id", "title", "author", "isbn", "status"])
}

pub fn handle<S: EntityStore>(ctx: &Context<'_, S>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let book = Book::new(
        input.book_id,
        input.title,
        input.author,
        input.isbn,
        input.status,
    );
    ctx.store().mutations().add_book(&book)?;
    Ok(json!({ "book_id": book.book_id }))
}
