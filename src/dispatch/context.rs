//! Context passed to command handlers.
//!
//! Carries the parsed input and a reference to the entity store. Handlers
//! access everything they need through the context.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::HandlerError;

/// The context passed to every command handler.
///
/// Generic over `S` (the store type) so handlers run unchanged against any
/// backend the service is configured with.
pub struct Context<'a, S> {
    /// Raw JSON input from the request.
    input: Value,
    /// Reference to the store.
    store: &'a S,
}

impl<'a, S> Context<'a, S> {
    pub(crate) fn new(input: Value, store: &'a S) -> Self {
        Self { input, store }
    }

    /// Deserialize the input payload into a typed struct.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        serde_json::from_value(self.input.clone())
            .map_err(|e| HandlerError::DecodeFailed(e.to_string()))
    }

    /// Get the raw JSON input.
    pub fn raw_input(&self) -> &Value {
        &self.input
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        self.store
    }

    /// Check if the raw input contains a string field.
    pub fn has_field(&self, field: &str) -> bool {
        self.input.get(field).map_or(false, Value::is_string)
    }

    /// Check if the raw input contains all specified string fields.
    pub fn has_fields(&self, fields: &[&str]) -> bool {
        fields.iter().all(|f| self.has_field(f))
    }
}
