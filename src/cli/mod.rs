//! Command-line front end for the catalog.
//!
//! Each subcommand becomes one [`CommandRequest`] dispatched through the
//! catalog service; the response is rendered as text or JSON.
//!
//! ## Configuration
//!
//! - `LIBRARY_DB` / `--database` - SQLite database path (default `library.db`,
//!   `:memory:` for a throwaway in-memory database)
//! - `RUST_LOG` - log filter (default `warn`)

mod render;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::info;

use crate::dispatch::CommandRequest;
use crate::error::Result;
use crate::fixtures::Fixtures;
use crate::handlers;
use crate::store::SqliteStore;

pub use render::render;

/// Path value that selects an in-memory database.
pub const IN_MEMORY: &str = ":memory:";

/// Library catalog - books, users and reservations.
#[derive(Debug, Parser)]
#[command(name = "library-catalog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file.
    #[arg(long, env = "LIBRARY_DB", default_value = "library.db", global = true)]
    pub database: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the effective configuration.
    #[must_use]
    pub fn config(&self) -> Config {
        Config {
            database: self.database.clone(),
            format: self.format,
        }
    }
}

/// Settings resolved from flags and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database: PathBuf,
    pub format: OutputFormat,
}

impl Config {
    pub fn in_memory(&self) -> bool {
        self.database.as_os_str() == IN_MEMORY
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// The raw response body as JSON.
    Json,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add a new book to the catalog.
    AddBook(AddBookArgs),
    /// Show a book with its reservation details.
    Detail {
        /// Book id (LB…).
        book_id: String,
    },
    /// Resolve a book id, user id, reservation id or title to a status.
    Resolve {
        /// LB…, LU…, LR… or a title.
        token: String,
    },
    /// List every book.
    List,
    /// Find books by exact title.
    Search {
        /// Title to match exactly.
        title: String,
    },
    /// Change a book's status.
    UpdateStatus {
        /// Book id (LB…).
        book_id: String,
        /// New status, e.g. "Checked Out".
        status: String,
    },
    /// Delete a book and its reservation.
    Delete {
        /// Book id (LB…).
        book_id: String,
    },
    /// Seed books, users and reservations from a JSON fixture file.
    Seed {
        /// Fixture file path.
        #[arg(long)]
        file: PathBuf,
    },
}

/// Arguments for `add-book`.
#[derive(Debug, Args)]
pub struct AddBookArgs {
    /// Book id (LB…).
    pub book_id: String,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub author: String,
    #[arg(long)]
    pub isbn: String,
    #[arg(long, default_value = "Available")]
    pub status: String,
}

impl Commands {
    /// Build the command request this subcommand stands for.
    pub fn to_request(&self) -> Result<CommandRequest> {
        let request = match self {
            Commands::AddBook(args) => CommandRequest::new(
                handlers::book_add::COMMAND,
                json!({
                    "book_id": args.book_id,
                    "title": args.title,
                    "author": args.author,
                    "isbn": args.isbn,
                    "status": args.status,
                }),
            ),
            Commands::Detail { book_id } => CommandRequest::new(
                handlers::book_detail::COMMAND,
                json!({ "book_id": book_id }),
            ),
            Commands::Resolve { token } => CommandRequest::new(
                handlers::status_resolve::COMMAND,
                json!({ "token": token }),
            ),
            Commands::List => CommandRequest::new(handlers::book_list::COMMAND, json!({})),
            Commands::Search { title } => CommandRequest::new(
                handlers::book_search::COMMAND,
                json!({ "title": title }),
            ),
            Commands::UpdateStatus { book_id, status } => CommandRequest::new(
                handlers::book_update_status::COMMAND,
                json!({ "book_id": book_id, "status": status }),
            ),
            Commands::Delete { book_id } => CommandRequest::new(
                handlers::book_delete::COMMAND,
                json!({ "book_id": book_id }),
            ),
            Commands::Seed { file } => {
                let fixtures = Fixtures::from_path(file)?;
                CommandRequest::new(handlers::catalog_seed::COMMAND, serde_json::to_value(fixtures)?)
            }
        };
        Ok(request)
    }
}

/// Run one subcommand against the configured database.
///
/// The rendered response is written to `out` before the store is closed, so a
/// committed mutation is always reported. Returns whether the command succeeded.
pub fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<bool> {
    let config = cli.config();
    let request = cli.command.to_request()?;

    let store = if config.in_memory() {
        SqliteStore::open_in_memory()
    } else {
        SqliteStore::open(&config.database)
    }
    .with_context(|| format!("failed to open {}", config.database.display()))?;

    let service = handlers::catalog_service(store);
    let response = service.dispatch_request(&request);
    info!(command = %request.command, status = response.status, "command finished");

    let rendered = render(&cli.command, &response, config.format);
    if let Ok(text) = &rendered {
        writeln!(out, "{}", text)?;
    }

    let closed = service.into_store().close();
    rendered?;
    closed.with_context(|| format!("failed to close {}", config.database.display()))?;
    Ok(response.is_success())
}
