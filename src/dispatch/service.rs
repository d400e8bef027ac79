//! Service - command handler registry and dispatch.
//!
//! `Service<S>` owns an entity store and a set of named command handlers.
//! Each handler receives a `Context<S>` and returns `Result<Value, HandlerError>`.
//! The store is acquired when the service is built and handed back by
//! [`Service::into_store`] so the caller can release it.
//!
//! ## Example
//!
//! ```ignore
//! use library_catalog::{handlers, InMemoryStore};
//! use serde_json::json;
//!
//! let service = handlers::catalog_service(InMemoryStore::new());
//! let result = service.dispatch("book.detail", json!({ "book_id": "LB001" }));
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::context::Context;
use super::error::HandlerError;

type Guard<S> = Box<dyn Fn(&Context<'_, S>) -> bool + Send + Sync>;
type Handle<S> = Box<dyn Fn(&Context<'_, S>) -> Result<Value, HandlerError> + Send + Sync>;

/// A registered command handler and its guard.
struct CommandHandler<S> {
    guard: Guard<S>,
    handle: Handle<S>,
}

/// Routes named commands to handler functions over a shared store.
pub struct Service<S> {
    store: S,
    handlers: HashMap<String, CommandHandler<S>>,
}

impl<S: Send + Sync + 'static> Service<S> {
    /// Create a new service around the given store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            handlers: HashMap::new(),
        }
    }

    /// Register a command handler with a guard function.
    ///
    /// The guard is called before the handler. If it returns `false`,
    /// the command is rejected with `HandlerError::GuardRejected`.
    pub fn command_guarded<G, F>(mut self, name: &str, guard: G, handler: F) -> Self
    where
        G: Fn(&Context<'_, S>) -> bool + Send + Sync + 'static,
        F: Fn(&Context<'_, S>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: Box::new(guard),
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Dispatch a command by name.
    ///
    /// Looks up the handler, runs its guard, then calls the handler.
    /// A failed command never affects later ones.
    pub fn dispatch(&self, command: &str, input: Value) -> Result<Value, HandlerError> {
        let handler = self
            .handlers
            .get(command)
            .ok_or_else(|| HandlerError::UnknownCommand(command.to_string()))?;

        let ctx = Context::new(input, &self.store);

        if !(handler.guard)(&ctx) {
            warn!(command, "guard rejected command");
            return Err(HandlerError::GuardRejected(command.to_string()));
        }

        debug!(command, "dispatching command");
        (handler.handle)(&ctx).map_err(|e| {
            if e.is_expected() {
                debug!(command, error = %e, "command rejected");
            } else {
                warn!(command, error = %e, "command failed");
            }
            e
        })
    }

    /// Dispatch a `CommandRequest`, returning a `CommandResponse`.
    pub fn dispatch_request(&self, request: &CommandRequest) -> CommandResponse {
        match self.dispatch(&request.command, request.input.clone()) {
            Ok(value) => CommandResponse {
                status: 200,
                body: value,
            },
            Err(e) => CommandResponse {
                status: e.status_code(),
                body: serde_json::json!({ "error": e.to_string() }),
            },
        }
    }

    /// List registered command names.
    pub fn commands(&self) -> Vec<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }

    /// Tear the service down and hand the store back to the caller.
    pub fn into_store(self) -> S {
        self.store
    }
}

/// A command request as received from a caller.
///
/// ```json
/// { "command": "book.detail", "input": { "book_id": "LB001" } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    /// Command name.
    pub command: String,
    /// JSON input payload.
    #[serde(default)]
    pub input: Value,
}

impl CommandRequest {
    pub fn new(command: impl Into<String>, input: Value) -> Self {
        Self {
            command: command.into(),
            input,
        }
    }
}

/// Response from dispatching a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Response body (handler result or error).
    pub body: Value,
}

impl CommandResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// The error message carried by a failed response.
    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}
