//! MongoRM CLI - store-verified book CRUD
//!
//! Drives the generic entity service against a live MongoDB.
//! Exit codes: 0 success, 1 internal error, 2 not found / unconfirmed.

mod book;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use book::{Book, BookService};
use mongorm::{EntityService, GenericEntityService, ServiceError};
use mongorm_mongodb::{MongoCollection, MongoDb};

#[derive(Parser)]
#[command(name = "mongorm")]
#[command(about = "MongoRM CLI - store-verified CRUD over MongoDB", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (connection_string, database_name)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the database is reachable
    Ping,

    /// Book operations
    Book {
        #[command(subcommand)]
        action: BookAction,
    },

    /// Show resolved configuration
    Config,
}

#[derive(Subcommand)]
enum BookAction {
    /// Get a book by id
    Get {
        /// Book id
        id: String,
    },
    /// Create a book
    Create {
        /// Title
        #[arg(short, long)]
        title: String,
        /// Author (optional)
        #[arg(short, long)]
        author: Option<String>,
    },
    /// Update a book's title and/or author
    Update {
        /// Book id
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New author
        #[arg(short, long)]
        author: Option<String>,
    },
    /// Delete a book by id
    Delete {
        /// Book id
        id: String,
    },
}

type AppBookService = BookService<MongoCollection<Book>>;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = match e.downcast_ref::<ServiceError>() {
                Some(ServiceError::Warning(msg)) => {
                    eprintln!("{} {}", "!".yellow(), msg);
                    2
                }
                Some(ServiceError::Critical(msg)) => {
                    eprintln!("{} {}", "✗".red(), msg);
                    1
                }
                None => {
                    eprintln!("{} {:#}", "✗".red(), e);
                    1
                }
            };
            ExitCode::from(code)
        }
    }
}

/// Log filter used when `RUST_LOG` is unset
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    // Logs go to stderr so stdout stays parseable JSON
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Config => {
            println!("{}", "Configuration:".bold());
            println!("  Default file: {:?}", config::config_path()?);
            println!("  Database:     {}", config.database_name);
            println!(
                "  App name:     {}",
                config.app_name.as_deref().unwrap_or("(none)")
            );
            Ok(())
        }
        Commands::Ping => {
            let db = MongoDb::connect(&config).await?;
            print!("Pinging {}... ", config.database_name);
            db.ping().await.context("Database is not reachable")?;
            println!("{}", "OK".green());
            Ok(())
        }
        Commands::Book { action } => {
            let db = MongoDb::connect(&config).await?;
            let books = BookService::new(GenericEntityService::from_store(&db));
            cmd_book(&books, action).await
        }
    }
}

async fn cmd_book(books: &AppBookService, action: BookAction) -> Result<()> {
    match action {
        BookAction::Get { id } => {
            let book = books.get(&id).await?;
            print_book(&book)
        }
        BookAction::Create { title, author } => {
            let book = books.create(Book::new(title, author)).await?;
            println!("{} Book created ({})", "✓".green(), book.id);
            print_book(&book)
        }
        BookAction::Update { id, title, author } => {
            let current = books.get(&id).await?;
            let book = books
                .update(Book {
                    id: current.id,
                    title: title.unwrap_or(current.title),
                    author: author.or(current.author),
                })
                .await?;
            println!("{} Book updated ({})", "✓".green(), book.id);
            print_book(&book)
        }
        BookAction::Delete { id } => {
            let book = books.delete(&id).await?;
            println!("{} Book deleted ({})", "✓".green(), book.id);
            print_book(&book)
        }
    }
}

fn print_book(book: &Book) -> Result<()> {
    let json = serde_json::to_string_pretty(book)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_is_info() {
        assert_eq!(default_filter(false), "info");
        assert_eq!(default_filter(true), "debug");
    }

    #[test]
    fn test_cli_parses_book_update() {
        let cli = Cli::try_parse_from(["mongorm", "book", "update", "abc123", "--title", "Dune (rev)"])
            .unwrap();

        match cli.command {
            Commands::Book {
                action: BookAction::Update { id, title, author },
            } => {
                assert_eq!(id, "abc123");
                assert_eq!(title.as_deref(), Some("Dune (rev)"));
                assert_eq!(author, None);
            }
            _ => panic!("expected book update"),
        }
    }
}
