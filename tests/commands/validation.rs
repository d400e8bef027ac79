//! Guards and decoding on the command surface.

use serde_json::json;
use library_catalog::dispatch::HandlerError;

use crate::service;

#[test]
fn missing_fields_are_rejected_by_the_guard() {
    let service = service();
    let err = service
        .dispatch("book.add", json!({ "book_id": "LB001", "title": "Dune" }))
        .unwrap_err();
    assert_eq!(err, HandlerError::GuardRejected("book.add".into()));
    assert_eq!(err.status_code(), 422);

    // Nothing was written.
    let listed = service.dispatch("book.list", json!({})).unwrap();
    assert_eq!(listed, json!({ "books": [] }));
}

#[test]
fn non_string_fields_are_rejected() {
    let service = service();
    let err = service
        .dispatch("book.detail", json!({ "book_id": 1 }))
        .unwrap_err();
    assert_eq!(err, HandlerError::GuardRejected("book.detail".into()));
}

#[test]
fn unknown_commands_are_reported() {
    let service = service();
    let err = service.dispatch("book.checkout", json!({})).unwrap_err();
    assert_eq!(err, HandlerError::UnknownCommand("book.checkout".into()));
    assert_eq!(err.status_code(), 404);
}

#[test]
fn malformed_seed_payload_fails_to_decode() {
    let service = service();
    let err = service
        .dispatch("catalog.seed", json!({ "users": "not a list" }))
        .unwrap_err();
    assert!(matches!(err, HandlerError::DecodeFailed(_)));
    assert_eq!(err.status_code(), 400);
}
