//! Database module: models and schema for the persistent catalog.
//!
//! Layout:
//! - `models.rs`: row struct mirroring the `livros` table
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: the `BookStore` implementation over a sqlx pool

pub mod models;
pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteBookStore;
