//! Full book lifecycle through named commands.

use serde_json::json;
use library_catalog::dispatch::{CommandRequest, HandlerError};
use library_catalog::CatalogError;

use crate::service;

#[test]
fn every_menu_operation_is_registered() {
    let service = service();
    let mut commands = service.commands();
    commands.sort();
    assert_eq!(
        commands,
        vec![
            "book.add",
            "book.delete",
            "book.detail",
            "book.list",
            "book.search",
            "book.update_status",
            "catalog.seed",
            "status.resolve",
        ]
    );
}

#[test]
fn add_reserve_update_delete() {
    let service = service();

    let result = service
        .dispatch(
            "book.add",
            json!({
                "book_id": "LB001",
                "title": "Dune",
                "author": "Herbert",
                "isbn": "123",
                "status": "Available"
            }),
        )
        .unwrap();
    assert_eq!(result, json!({ "book_id": "LB001" }));

    let detail = service
        .dispatch("book.detail", json!({ "book_id": "LB001" }))
        .unwrap();
    assert_eq!(detail["title"], "Dune");
    assert_eq!(detail["isbn"], "123");
    assert!(detail["reserved_by"].is_null());

    let stats = service
        .dispatch(
            "catalog.seed",
            json!({
                "users": [{ "user_id": "LU001", "name": "Alice", "email": "a@x.com" }],
                "reservations": [{
                    "reservation_id": "LR001",
                    "book_id": "LB001",
                    "user_id": "LU001",
                    "reservation_date": "2024-01-01"
                }]
            }),
        )
        .unwrap();
    assert_eq!(stats, json!({ "books": 0, "users": 1, "reservations": 1 }));

    let detail = service
        .dispatch("book.detail", json!({ "book_id": "LB001" }))
        .unwrap();
    assert_eq!(detail["reserved_by"]["name"], "Alice");

    let change = service
        .dispatch(
            "book.update_status",
            json!({ "book_id": "LB001", "status": "Checked Out" }),
        )
        .unwrap();
    assert_eq!(change["previous"], "Available");
    assert_eq!(change["current"], "Checked Out");

    for token in ["LB001", "LU001", "LR001"] {
        let resolved = service
            .dispatch("status.resolve", json!({ "token": token }))
            .unwrap();
        assert_eq!(resolved, json!({ "kind": "status", "status": "Checked Out" }));
    }

    let deleted = service
        .dispatch("book.delete", json!({ "book_id": "LB001" }))
        .unwrap();
    assert_eq!(deleted["reservations_removed"], 1);

    let err = service
        .dispatch("status.resolve", json!({ "token": "LR001" }))
        .unwrap_err();
    assert!(matches!(
        err,
        HandlerError::Catalog(CatalogError::NotFound { .. })
    ));
    assert_eq!(err.to_string(), "reservation not found: LR001");
}

#[test]
fn list_and_search_return_book_arrays() {
    let service = service();
    let listed = service.dispatch("book.list", json!({})).unwrap();
    assert_eq!(listed, json!({ "books": [] }));

    for (id, title) in [("LB002", "Emma"), ("LB001", "Dune")] {
        service
            .dispatch(
                "book.add",
                json!({
                    "book_id": id,
                    "title": title,
                    "author": "Someone",
                    "isbn": "0",
                    "status": "Available"
                }),
            )
            .unwrap();
    }

    let listed = service.dispatch("book.list", json!({})).unwrap();
    let ids: Vec<_> = listed["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["book_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["LB001", "LB002"]);

    let found = service
        .dispatch("book.search", json!({ "title": "Emma" }))
        .unwrap();
    assert_eq!(found["books"].as_array().unwrap().len(), 1);

    let resolved = service
        .dispatch("status.resolve", json!({ "token": "Persuasion" }))
        .unwrap();
    assert_eq!(resolved, json!({ "kind": "matches", "books": [] }));
}

#[test]
fn responses_carry_distinct_status_codes() {
    let service = service();
    let add = CommandRequest::new(
        "book.add",
        json!({
            "book_id": "LB001",
            "title": "Dune",
            "author": "Herbert",
            "isbn": "123",
            "status": "Available"
        }),
    );

    assert_eq!(service.dispatch_request(&add).status, 200);

    let duplicate = service.dispatch_request(&add);
    assert_eq!(duplicate.status, 409);

    let missing = service.dispatch_request(&CommandRequest::new(
        "book.update_status",
        json!({ "book_id": "LB404", "status": "Lost" }),
    ));
    assert_eq!(missing.status, 404);
    assert_eq!(missing.error(), Some("book not found: LB404"));

    let missing_user = service.dispatch_request(&CommandRequest::new(
        "status.resolve",
        json!({ "token": "LU404" }),
    ));
    assert_eq!(missing_user.error(), Some("user not found: LU404"));
}
