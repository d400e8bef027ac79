//! Handler: book.detail

use serde::Deserialize;
use serde_json::Value;

use crate::catalog::CatalogExt;
use crate::dispatch::{Context, HandlerError};
use crate::store::EntityStore;

pub const COMMAND: &str = "book.detail";

#[derive(Deserialize)]
pub struct Input {
    pub book_id: String,
}

pub fn guard<S: EntityStore>(ctx: &Context<'_, S>) -> bool {
    ctx.has_field("book_id")
}

pub fn handle<S: EntityStore>(ctx: &Context<'_, S>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let detail = ctx.store().queries().book_detail(&input.book_id)?;
    Ok(serde_json::to_value(detail)?)
}
