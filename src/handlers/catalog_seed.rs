//! Handler: catalog.seed
//!
//! The input is a fixture document (see [`crate::fixtures`]).

use serde_json::Value;

use crate::dispatch::{Context, HandlerError};
use crate::fixtures::Fixtures;
use crate::store::EntityStore;

pub const COMMAND: &str = "catalog.seed";

pub fn guard<S: EntityStore>(ctx: &Context<'_, S>) -> bool {
    ctx.raw_input().is_object()
}

pub fn handle<S: EntityStore>(ctx: &Context<'_, S>) -> Result<Value, HandlerError> {
    let fixtures = ctx.input::<Fixtures>()?;
    let stats = fixtures.apply(ctx.store())?;
    Ok(serde_json::to_value(stats)?)
}
