//! Integration tests for the catalog services, run against both store backends.

mod consistency;
mod scenario;
mod support;
