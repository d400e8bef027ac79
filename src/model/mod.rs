//! Catalog entities and the joined view the query layer returns.
//!
//! `Book`, `User` and `Reservation` mirror the three relations one to one.
//! `BookDetail` is a Book left-joined with its reservation and the reserving user.

use serde::{Deserialize, Serialize};

/// A row type stored in one of the catalog relations.
pub trait Record: Clone + Send + Sync {
    /// Relation name (maps to the SQL table).
    const TABLE: &'static str;
    /// Primary key column name.
    const KEY: &'static str;

    /// Returns the primary key of this row.
    fn id(&self) -> &str;
}

/// A catalog entry. `status` is the authoritative availability signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub status: String,
}

impl Book {
    pub fn new(
        book_id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            book_id: book_id.into(),
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            status: status.into(),
        }
    }
}

impl Record for Book {
    const TABLE: &'static str = "Books";
    const KEY: &'static str = "BookID";

    fn id(&self) -> &str {
        &self.book_id
    }
}

/// A registered library user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Record for User {
    const TABLE: &'static str = "Users";
    const KEY: &'static str = "UserID";

    fn id(&self) -> &str {
        &self.user_id
    }
}

/// Link between a book and the user holding it.
///
/// `status` mirrors the book's status. Stores fill it from the book on insert and
/// the mutation service rewrites it together with the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_id: String,
    pub book_id: String,
    pub user_id: String,
    pub reservation_date: String,
    #[serde(default)]
    pub status: String,
}

impl Reservation {
    pub fn new(
        reservation_id: impl Into<String>,
        book_id: impl Into<String>,
        user_id: impl Into<String>,
        reservation_date: impl Into<String>,
    ) -> Self {
        Self {
            reservation_id: reservation_id.into(),
            book_id: book_id.into(),
            user_id: user_id.into(),
            reservation_date: reservation_date.into(),
            status: String::new(),
        }
    }
}

impl Record for Reservation {
    const TABLE: &'static str = "Reservations";
    const KEY: &'static str = "ReservationID";

    fn id(&self) -> &str {
        &self.reservation_id
    }
}

/// The user behind a reservation, as reported alongside a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reserver {
    pub reservation_id: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub reservation_date: String,
}

/// Book ⋈ Reservation ⋈ User. `reserved_by` is `None` for an unreserved book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: Book,
    pub reserved_by: Option<Reserver>,
}

impl BookDetail {
    pub fn is_reserved(&self) -> bool {
        self.reserved_by.is_some()
    }
}
