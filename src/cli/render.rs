//! Text and JSON rendering of command responses.

use serde::Deserialize;

use super::{Commands, OutputFormat};
use crate::catalog::{DeletedBook, StatusChange};
use crate::dispatch::CommandResponse;
use crate::fixtures::SeedStats;
use crate::identifier::Resolution;
use crate::model::BookDetail;

#[derive(Deserialize)]
struct BookList {
    books: Vec<BookDetail>,
}

/// Render a response for the terminal.
pub fn render(
    command: &Commands,
    response: &CommandResponse,
    format: OutputFormat,
) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&response.body)?);
    }
    if !response.is_success() {
        return Ok(format!(
            "Error: {}",
            response.error().unwrap_or("command failed")
        ));
    }

    let body = response.body.clone();
    let text = match command {
        Commands::AddBook(_) => "Book added successfully.".to_string(),
        Commands::Detail { .. } => book_block(&serde_json::from_value::<BookDetail>(body)?),
        Commands::Resolve { .. } => match serde_json::from_value::<Resolution>(body)? {
            Resolution::Status { status } => format!("Reservation status: {}", status),
            Resolution::Matches { books } if books.is_empty() => "Book not found.".to_string(),
            Resolution::Matches { books } => book_list("Search results:", &books),
        },
        Commands::List => {
            let list: BookList = serde_json::from_value(body)?;
            if list.books.is_empty() {
                "No books found in the database.".to_string()
            } else {
                book_list("All books in the database:", &list.books)
            }
        }
        Commands::Search { .. } => {
            let list: BookList = serde_json::from_value(body)?;
            if list.books.is_empty() {
                "Book not found.".to_string()
            } else {
                book_list("Search results:", &list.books)
            }
        }
        Commands::UpdateStatus { .. } => {
            let change: StatusChange = serde_json::from_value(body)?;
            format!(
                "Book details updated successfully. Status: {} -> {}",
                change.previous, change.current
            )
        }
        Commands::Delete { .. } => {
            let deleted: DeletedBook = serde_json::from_value(body)?;
            match deleted.reservations_removed {
                0 => "Book deleted successfully.".to_string(),
                n => format!("Book deleted successfully ({} reservation(s) removed).", n),
            }
        }
        Commands::Seed { .. } => {
            let stats: SeedStats = serde_json::from_value(body)?;
            format!(
                "Seeded {} book(s), {} user(s), {} reservation(s).",
                stats.books, stats.users, stats.reservations
            )
        }
    };
    Ok(text)
}

fn book_block(detail: &BookDetail) -> String {
    let book = &detail.book;
    let reservation = match &detail.reserved_by {
        Some(reserver) => format!("Reserved by: {}\nEmail: {}", reserver.name, reserver.email),
        None => "Not reserved.".to_string(),
    };
    format!(
        "BookID: {}\nTitle: {}\nAuthor: {}\nISBN: {}\nStatus: {}\n{}",
        book.book_id, book.title, book.author, book.isbn, book.status, reservation
    )
}

fn book_list(heading: &str, books: &[BookDetail]) -> String {
    let blocks: Vec<String> = books.iter().map(book_block).collect();
    format!("{}\n{}", heading, blocks.join("\n\n"))
}
