//! Handler: status.resolve
//!
//! Accepts a book id, user id, reservation id or title in `token`.

use serde::Deserialize;
use serde_json::Value;

use crate::catalog::CatalogExt;
use crate::dispatch::{Context, HandlerError};
use crate::store::EntityStore;

pub const COMMAND: &str = "status.resolve";

#[derive(Deserialize)]
pub struct Input {
    pub token: String,
}

pub fn guard<S: EntityStore>(ctx: &Context<'_, S>) -> bool {
    ctx.has_field("token")
}

pub fn handle<S: EntityStore>(ctx: &Context<'_, S>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let resolution = ctx.store().resolver().resolve(&input.token)?;
    Ok(serde_json::to_value(resolution)?)
}
