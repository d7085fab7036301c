use async_trait::async_trait;
use std::sync::Arc;

use crate::error::CatalogError;
use crate::types::{Book, BookPayload, Page, PageWindow};

/// Storage seam between the HTTP layer and the catalog backends.
///
/// Each backend owns its duplicate policy:
/// - [`MemoryCatalog`](crate::service::catalog_actor::MemoryCatalog) requires a
///   client-supplied id and rejects ids already present.
/// - [`SqliteBookStore`](crate::db::SqliteBookStore) assigns ids itself and
///   rejects a (title, author) pair already present.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Look up one record by id.
    async fn get(&self, id: i64) -> Result<Option<Book>, CatalogError>;

    /// Records in `window`, ascending by id, plus the catalog size.
    async fn list(&self, window: PageWindow) -> Result<Page, CatalogError>;

    /// Insert a new record. Fails with `Conflict` on a duplicate.
    async fn insert(&self, id: Option<i64>, payload: BookPayload) -> Result<Book, CatalogError>;

    /// Replace title, author and year. `None` if the id is unknown.
    async fn update(&self, id: i64, payload: BookPayload) -> Result<Option<Book>, CatalogError>;

    /// Remove a record, returning it. `None` if the id is unknown.
    async fn delete(&self, id: i64) -> Result<Option<Book>, CatalogError>;
}

pub type SharedStore = Arc<dyn BookStore>;
