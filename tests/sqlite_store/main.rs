//! Integration tests for the SQLite backend: lifecycle, persistence, failures.

mod failures;
mod lifecycle;
