use sqlx::FromRow;

use crate::types::Book;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbBook {
    pub id_livro: i64,
    pub titulo_livro: String,
    pub autor_livro: String,
    pub ano_livro: i64,
}

impl TryFrom<DbBook> for Book {
    type Error = sqlx::Error;

    fn try_from(d: DbBook) -> Result<Self, Self::Error> {
        let ano_livro = i32::try_from(d.ano_livro).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(Book {
            id_livro: d.id_livro,
            titulo_livro: d.titulo_livro,
            autor_livro: d.autor_livro,
            ano_livro,
        })
    }
}
