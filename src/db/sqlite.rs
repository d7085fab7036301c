use crate::db::models::DbBook;
use crate::db::schema::SQLITE_INIT;
use crate::error::CatalogError;
use crate::service::store::BookStore;
use crate::types::{Book, BookPayload, Page, PageWindow};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

pub type SqlitePool = Pool<Sqlite>;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SELECT_COLUMNS: &str = "id_livro, titulo_livro, autor_livro, ano_livro";

#[derive(Clone)]
pub struct SqliteBookStore {
    pool: SqlitePool,
}

impl SqliteBookStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `database_url`, creating the file if needed, and
    /// initialize the schema.
    ///
    /// An in-memory URL gets a single long-lived connection, since every
    /// SQLite memory connection is its own database. File databases run in
    /// WAL mode so readers do not block the writer.
    pub async fn connect(database_url: &str) -> Result<Self, CatalogError> {
        let mut connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(BUSY_TIMEOUT);
        let mut pool_opts = SqlitePoolOptions::new();
        if database_url.contains(":memory:") {
            pool_opts = pool_opts
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            connect_opts = connect_opts.journal_mode(SqliteJournalMode::Wal);
        }
        let pool = pool_opts.connect_with(connect_opts).await?;
        let store = Self::new(pool);
        store.init_schema().await?;
        info!(database_url, "sqlite catalog ready");
        Ok(store)
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), CatalogError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl BookStore for SqliteBookStore {
    async fn get(&self, id: i64) -> Result<Option<Book>, CatalogError> {
        let row: Option<DbBook> =
            sqlx::query_as(&format!("SELECT {SELECT_COLUMNS} FROM livros WHERE id_livro = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Book::try_from).transpose()?)
    }

    async fn list(&self, window: PageWindow) -> Result<Page, CatalogError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM livros")
            .fetch_one(&self.pool)
            .await?;
        let rows: Vec<DbBook> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM livros ORDER BY id_livro LIMIT ? OFFSET ?"
        ))
        .bind(window.limit)
        .bind(window.offset())
        .fetch_all(&self.pool)
        .await?;
        let books = rows
            .into_iter()
            .map(Book::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page { total, books })
    }

    /// Ids come from the database; a (title, author) pair may exist once.
    async fn insert(&self, id: Option<i64>, payload: BookPayload) -> Result<Book, CatalogError> {
        if id.is_some() {
            return Err(CatalogError::BadRequest(
                "id_livro é atribuído pelo banco de dados".to_string(),
            ));
        }

        // Check and insert in one statement: a read-then-write transaction
        // cannot upgrade its lock while another writer is active.
        let result = sqlx::query(
            r#"INSERT INTO livros (titulo_livro, autor_livro, ano_livro)
               SELECT ?, ?, ?
               WHERE NOT EXISTS (
                   SELECT 1 FROM livros WHERE titulo_livro = ? AND autor_livro = ?
               )"#,
        )
        .bind(&payload.titulo_livro)
        .bind(&payload.autor_livro)
        .bind(payload.ano_livro)
        .bind(&payload.titulo_livro)
        .bind(&payload.autor_livro)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!(
                title = %payload.titulo_livro,
                author = %payload.autor_livro,
                "insert rejected; title and author already present"
            );
            return Err(CatalogError::Conflict);
        }

        let id = result.last_insert_rowid();
        Ok(payload.into_book(id))
    }

    async fn update(&self, id: i64, payload: BookPayload) -> Result<Option<Book>, CatalogError> {
        let row: Option<DbBook> = sqlx::query_as(&format!(
            r#"UPDATE livros SET
                titulo_livro = ?,
                autor_livro = ?,
                ano_livro = ?
              WHERE id_livro = ?
              RETURNING {SELECT_COLUMNS}"#
        ))
        .bind(payload.titulo_livro)
        .bind(payload.autor_livro)
        .bind(payload.ano_livro)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Book::try_from).transpose()?)
    }

    async fn delete(&self, id: i64) -> Result<Option<Book>, CatalogError> {
        let row: Option<DbBook> = sqlx::query_as(&format!(
            "DELETE FROM livros WHERE id_livro = ? RETURNING {SELECT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Book::try_from).transpose()?)
    }
}
