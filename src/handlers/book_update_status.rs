//! Handler: book.update_status

use serde::Deserialize;
use serde_json::Value;

use crate::catalog::CatalogExt;
use crate::dispatch::{Context, HandlerError};
use crate::store::EntityStore;

pub const COMMAND: &str = "book.update_status";

#[derive(Deserialize)]
pub struct Input {
    pub book_id: String,
    pub status: String,
}

pub fn guard<S: EntityStore>(ctx: &Context<'_, S>) -> bool {
    ctx.has_fields(&["book_id", "status"])
}

pub fn handle<S: EntityStore>(ctx: &Context<'_, S>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let change = ctx
        .store()
        .mutations()
        .update_status(&input.book_id, &input.status)?;
    Ok(serde_json::to_value(change)?)
}
