//! SqliteStore - relational entity store backed by SQLite.
//!
//! The connection is opened once, held for the lifetime of the store, and
//! released by [`SqliteStore::close`] or when the store is dropped.
//! Foreign keys are enforced by SQLite itself (`PRAGMA foreign_keys = ON`).

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use super::{BookFilter, EntityStore, StoreRead, StoreWrite};
use crate::error::{CatalogError, Result};
use crate::model::{Book, BookDetail, Reservation, Reserver, User};

const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS Books (
    BookID TEXT PRIMARY KEY NOT NULL,
    Title  TEXT NOT NULL,
    Author TEXT NOT NULL,
    ISBN   TEXT NOT NULL,
    Status TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS Users (
    UserID TEXT PRIMARY KEY NOT NULL,
    Name   TEXT NOT NULL,
    Email  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS Reservations (
    ReservationID   TEXT PRIMARY KEY NOT NULL,
    BookID          TEXT NOT NULL UNIQUE,
    UserID          TEXT NOT NULL,
    ReservationDate TEXT NOT NULL,
    Status          TEXT NOT NULL,
    FOREIGN KEY(BookID) REFERENCES Books(BookID),
    FOREIGN KEY(UserID) REFERENCES Users(UserID)
);

CREATE INDEX IF NOT EXISTS idx_reservations_user ON Reservations(UserID);
CREATE INDEX IF NOT EXISTS idx_books_title ON Books(Title);
";

const BOOK_COLUMNS: &str = "BookID, Title, Author, ISBN, Status";
const RESERVATION_COLUMNS: &str = "ReservationID, BookID, UserID, ReservationDate, Status";

const DETAIL_SELECT: &str = "
SELECT b.BookID, b.Title, b.Author, b.ISBN, b.Status,
       r.ReservationID, r.ReservationDate, u.UserID, u.Name, u.Email
FROM Books b
LEFT JOIN Reservations r ON b.BookID = r.BookID
LEFT JOIN Users u ON r.UserID = u.UserID";

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        book_id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        isbn: row.get(3)?,
        status: row.get(4)?,
    })
}

fn reservation_from_row(row: &Row<'_>) -> rusqlite::Result<Reservation> {
    Ok(Reservation {
        reservation_id: row.get(0)?,
        book_id: row.get(1)?,
        user_id: row.get(2)?,
        reservation_date: row.get(3)?,
        status: row.get(4)?,
    })
}

fn detail_from_row(row: &Row<'_>) -> rusqlite::Result<BookDetail> {
    let book = book_from_row(row)?;
    let reservation_id: Option<String> = row.get(5)?;
    let reservation_date: Option<String> = row.get(6)?;
    let user_id: Option<String> = row.get(7)?;

    let reserved_by = match (reservation_id, user_id) {
        (Some(reservation_id), Some(user_id)) => Some(Reserver {
            reservation_id,
            user_id,
            name: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
            email: row.get::<_, Option<String>>(9)?.unwrap_or_default(),
            reservation_date: reservation_date.unwrap_or_default(),
        }),
        _ => None,
    };

    Ok(BookDetail { book, reserved_by })
}

/// Row access over a borrowed connection or open transaction.
struct SqliteRows<'c> {
    conn: &'c Connection,
}

impl SqliteRows<'_> {
    fn reservations_where(&self, column: &str, value: &str) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {} FROM Reservations WHERE {} = ?1 ORDER BY ReservationID",
            RESERVATION_COLUMNS, column
        );
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let rows = stmt.query_map(params![value], reservation_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

impl StoreRead for SqliteRows<'_> {
    fn book(&self, book_id: &str) -> Result<Option<Book>> {
        let sql = format!("SELECT {} FROM Books WHERE BookID = ?1", BOOK_COLUMNS);
        Ok(self
            .conn
            .query_row(&sql, params![book_id], book_from_row)
            .optional()?)
    }

    fn user(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self
            .conn
            .query_row(
                "SELECT UserID, Name, Email FROM Users WHERE UserID = ?1",
                params![user_id],
                |row| {
                    Ok(User {
                        user_id: row.get(0)?,
                        name: row.get(1)?,
                        email: row.get(2)?,
                    })
                },
            )
            .optional()?)
    }

    fn reservation(&self, reservation_id: &str) -> Result<Option<Reservation>> {
        let sql = format!(
            "SELECT {} FROM Reservations WHERE ReservationID = ?1",
            RESERVATION_COLUMNS
        );
        Ok(self
            .conn
            .query_row(&sql, params![reservation_id], reservation_from_row)
            .optional()?)
    }

    fn reservations_for_book(&self, book_id: &str) -> Result<Vec<Reservation>> {
        self.reservations_where("BookID", book_id)
    }

    fn reservations_for_user(&self, user_id: &str) -> Result<Vec<Reservation>> {
        self.reservations_where("UserID", user_id)
    }

    fn book_details(&self, filter: &BookFilter) -> Result<Vec<BookDetail>> {
        let (clause, param) = match filter {
            BookFilter::All => ("", None),
            BookFilter::Id(id) => ("WHERE b.BookID = ?1", Some(id.as_str())),
            BookFilter::Title(title) => ("WHERE b.Title = ?1", Some(title.as_str())),
        };
        let sql = format!("{} {} ORDER BY b.BookID", DETAIL_SELECT, clause);

        let mut stmt = self.conn.prepare_cached(&sql)?;
        let rows = stmt.query_map(params_from_iter(param), detail_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

impl StoreWrite for SqliteRows<'_> {
    fn insert_book(&mut self, book: &Book) -> Result<()> {
        let sql = format!("INSERT INTO Books ({}) VALUES (?1, ?2, ?3, ?4, ?5)", BOOK_COLUMNS);
        self.conn.execute(
            &sql,
            params![book.book_id, book.title, book.author, book.isbn, book.status],
        )?;
        Ok(())
    }

    fn insert_user(&mut self, user: &User) -> Result<()> {
        self.conn.execute(
            "INSERT INTO Users (UserID, Name, Email) VALUES (?1, ?2, ?3)",
            params![user.user_id, user.name, user.email],
        )?;
        Ok(())
    }

    fn insert_reservation(&mut self, reservation: &Reservation) -> Result<()> {
        let book = self.book(&reservation.book_id)?.ok_or_else(|| {
            CatalogError::ConstraintViolation(format!(
                "reservation {} references missing book {}",
                reservation.reservation_id, reservation.book_id
            ))
        })?;

        let sql = format!(
            "INSERT INTO Reservations ({}) VALUES (?1, ?2, ?3, ?4, ?5)",
            RESERVATION_COLUMNS
        );
        self.conn.execute(
            &sql,
            params![
                reservation.reservation_id,
                reservation.book_id,
                reservation.user_id,
                reservation.reservation_date,
                book.status
            ],
        )?;
        Ok(())
    }

    fn set_book_status(&mut self, book_id: &str, status: &str) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE Books SET Status = ?1 WHERE BookID = ?2",
            params![status, book_id],
        )?;
        Ok(changed > 0)
    }

    fn set_reservation_status_for_book(&mut self, book_id: &str, status: &str) -> Result<usize> {
        Ok(self.conn.execute(
            "UPDATE Reservations SET Status = ?1 WHERE BookID = ?2",
            params![status, book_id],
        )?)
    }

    fn delete_book(&mut self, book_id: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM Books WHERE BookID = ?1", params![book_id])?;
        Ok(removed > 0)
    }

    fn delete_reservations_for_book(&mut self, book_id: &str) -> Result<usize> {
        Ok(self
            .conn
            .execute("DELETE FROM Reservations WHERE BookID = ?1", params![book_id])?)
    }
}

/// SQLite-backed entity store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    location: String,
}

impl SqliteStore {
    /// Open (or create) the database file at `path` and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        Self::initialize(conn, path.display().to_string())
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(conn, ":memory:".to_string())
    }

    fn initialize(conn: Connection, location: String) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        info!(location = %location, "opened catalog database");
        Ok(Self {
            conn: Mutex::new(conn),
            location,
        })
    }

    /// Where this store lives (`:memory:` for in-memory databases).
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Release the connection, surfacing any error SQLite reports while closing.
    pub fn close(self) -> Result<()> {
        let conn = self
            .conn
            .into_inner()
            .map_err(|_| CatalogError::StorageFailure("lock poisoned".into()))?;
        conn.close().map_err(|(_, err)| CatalogError::from(err))?;
        info!(location = %self.location, "closed catalog database");
        Ok(())
    }
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("location", &self.location)
            .finish()
    }
}

impl EntityStore for SqliteStore {
    fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&dyn StoreRead) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| CatalogError::StorageFailure("lock poisoned".into()))?;
        f(&SqliteRows { conn: &conn })
    }

    fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn StoreWrite) -> Result<T>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| CatalogError::StorageFailure("lock poisoned".into()))?;
        let tx = conn.transaction()?;

        let outcome = {
            let mut rows = SqliteRows { conn: &tx };
            f(&mut rows)
        };

        match outcome {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(err) => {
                // Dropping the transaction rolls it back.
                debug!(error = %err, "sqlite transaction rolled back");
                Err(err)
            }
        }
    }
}
