//! dispatch: named command surface over the catalog services.
//!
//! Callers (the command line, or any other front end) send structured requests
//! and receive structured responses. Each handler receives a `Context<S>` with
//! the input payload and the entity store.
//!
//! ## Handler Convention
//!
//! Each handler file exports:
//!
//! ```ignore
//! pub const COMMAND: &str = "book.detail";
//!
//! pub fn guard<S: EntityStore>(ctx: &Context<'_, S>) -> bool {
//!     ctx.has_fields(&["book_id"])
//! }
//!
//! pub fn handle<S: EntityStore>(ctx: &Context<'_, S>) -> Result<Value, HandlerError> {
//!     let input = ctx.input::<Input>()?;
//!     let detail = ctx.store().queries().book_detail(&input.book_id)?;
//!     Ok(serde_json::to_value(detail)?)
//! }
//! ```

mod context;
mod error;
mod service;

pub use context::Context;
pub use error::HandlerError;
pub use service::{CommandRequest, CommandResponse, Service};

/// Register handler modules with a service using the convention pattern.
///
/// Each handler module must export:
/// - `COMMAND: &str`: the command name
/// - `guard(ctx) -> bool`: input validation
/// - `handle(ctx) -> Result<Value, HandlerError>`: the handler
///
/// # Example
/// ```ignore
/// let service = library_catalog::register_handlers!(
///     dispatch::Service::new(InMemoryStore::new()),
///     handlers::book_add,
///     handlers::book_detail,
/// );
/// ```
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .command_guarded(
                $($seg)::+::COMMAND,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}
