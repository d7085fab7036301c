use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A catalog record as stored and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub id_livro: i64,
    pub titulo_livro: String,
    pub autor_livro: String,
    pub ano_livro: i32,
}

/// Replacement body for add and update. Every field is required.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookPayload {
    pub titulo_livro: String,
    pub autor_livro: String,
    pub ano_livro: i32,
}

impl BookPayload {
    /// Trim title and author and reject blank values.
    pub fn normalized(self) -> Result<Self, CatalogError> {
        let titulo_livro = self.titulo_livro.trim().to_string();
        let autor_livro = self.autor_livro.trim().to_string();
        if titulo_livro.is_empty() {
            return Err(CatalogError::BadRequest(
                "titulo_livro não pode ser vazio".to_string(),
            ));
        }
        if autor_livro.is_empty() {
            return Err(CatalogError::BadRequest(
                "autor_livro não pode ser vazio".to_string(),
            ));
        }
        Ok(Self {
            titulo_livro,
            autor_livro,
            ano_livro: self.ano_livro,
        })
    }

    pub fn into_book(self, id_livro: i64) -> Book {
        Book {
            id_livro,
            titulo_livro: self.titulo_livro,
            autor_livro: self.autor_livro,
            ano_livro: self.ano_livro,
        }
    }
}
