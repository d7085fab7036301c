//! SQL DDL for initializing the catalog storage.

/// SQLite schema with:
/// - `id_livro` INTEGER PRIMARY KEY AUTOINCREMENT (indexed as the rowid)
/// - `titulo_livro` and `autor_livro` indexed separately
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS livros (
    id_livro INTEGER PRIMARY KEY AUTOINCREMENT,
    titulo_livro TEXT NOT NULL,
    autor_livro TEXT NOT NULL,
    ano_livro INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_livros_titulo_livro ON livros(titulo_livro);

CREATE INDEX IF NOT EXISTS idx_livros_autor_livro ON livros(autor_livro);
"#;
