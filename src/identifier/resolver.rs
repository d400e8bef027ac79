//! Resolver - routes a classified token to its lookup path.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{classify, Token};
use crate::error::{CatalogError, EntityKind, Result};
use crate::model::BookDetail;
use crate::store::{BookFilter, EntityStore, StoreRead};

/// Outcome of resolving a free-text token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    /// Book, user or reservation id: the status of the single matching book.
    Status { status: String },
    /// Title search: every book with that exact title (possibly none).
    Matches { books: Vec<BookDetail> },
}

/// Resolves search tokens against an entity store.
pub struct Resolver<'a, S> {
    store: &'a S,
}

impl<'a, S: EntityStore> Resolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Classify `raw` and resolve it.
    pub fn resolve(&self, raw: &str) -> Result<Resolution> {
        let token = classify(raw);
        debug!(?token, "resolving search token");
        self.resolve_token(&token)
    }

    /// Resolve an already classified token.
    pub fn resolve_token(&self, token: &Token) -> Result<Resolution> {
        self.store.read(|rows| match token {
            Token::Book(id) => rows
                .book(id.as_str())?
                .map(|book| Resolution::Status {
                    status: book.status,
                })
                .ok_or_else(|| CatalogError::not_found(EntityKind::Book, id.as_str())),
            Token::User(id) => status_for_user(rows, id.as_str()),
            Token::Reservation(id) => status_for_reservation(rows, id.as_str()),
            Token::Title(title) => Ok(Resolution::Matches {
                books: rows.book_details(&BookFilter::Title(title.clone()))?,
            }),
        })
    }
}

/// The user's reservation with the lowest id decides the reported status.
fn status_for_user(rows: &dyn StoreRead, user_id: &str) -> Result<Resolution> {
    let not_found = || CatalogError::not_found(EntityKind::User, user_id);

    if rows.user(user_id)?.is_none() {
        return Err(not_found());
    }
    for reservation in rows.reservations_for_user(user_id)? {
        if let Some(book) = rows.book(&reservation.book_id)? {
            return Ok(Resolution::Status {
                status: book.status,
            });
        }
    }
    Err(not_found())
}

fn status_for_reservation(rows: &dyn StoreRead, reservation_id: &str) -> Result<Resolution> {
    rows.reservation(reservation_id)?
        .map(|reservation| rows.book(&reservation.book_id))
        .transpose()?
        .flatten()
        .map(|book| Resolution::Status {
            status: book.status,
        })
        .ok_or_else(|| CatalogError::not_found(EntityKind::Reservation, reservation_id))
}
