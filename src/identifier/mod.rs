//! Free-text identifier classification.
//!
//! Catalog identifiers follow a prefix convention: `LB…` for books, `LU…` for
//! users, `LR…` for reservations. Anything else is treated as a title.
//! [`classify`] is the single place that convention is interpreted.

mod resolver;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use resolver::{Resolution, Resolver};

pub const BOOK_ID_PREFIX: &str = "LB";
pub const USER_ID_PREFIX: &str = "LU";
pub const RESERVATION_ID_PREFIX: &str = "LR";

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier!(
    /// A book primary key (`LB…`).
    BookId
);
identifier!(
    /// A user primary key (`LU…`).
    UserId
);
identifier!(
    /// A reservation primary key (`LR…`).
    ReservationId
);

/// A classified search token. Every input maps to exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Book(BookId),
    User(UserId),
    Reservation(ReservationId),
    Title(String),
}

/// Classify a raw search token by its prefix.
///
/// Ids are trimmed before the prefix check. Titles are kept exactly as entered,
/// since title search is an exact match. Prefix checks are case-sensitive, so
/// `"lb001"` is a title, not a book id.
pub fn classify(raw: &str) -> Token {
    let token = raw.trim();
    if token.starts_with(BOOK_ID_PREFIX) {
        Token::Book(BookId(token.to_string()))
    } else if token.starts_with(USER_ID_PREFIX) {
        Token::User(UserId(token.to_string()))
    } else if token.starts_with(RESERVATION_ID_PREFIX) {
        Token::Reservation(ReservationId(token.to_string()))
    } else {
        Token::Title(raw.to_string())
    }
}
