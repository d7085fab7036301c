use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CatalogError, DELETE_NOT_FOUND, UPDATE_NOT_FOUND};
use crate::middleware::auth::RequireBasicAuth;
use crate::router::CatalogState;
use crate::types::{Book, BookPayload, ListResponse, PageQuery};

/// Query string of `POST /adiciona`. Only the in-memory catalog takes an id.
#[derive(Debug, Default, Deserialize)]
pub struct AddQuery {
    pub id_livro: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct Confirmation {
    pub message: String,
    pub livro: Book,
}

/// GET /livros?page=&limit=
pub async fn list_books(
    _auth: RequireBasicAuth,
    State(state): State<CatalogState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ListResponse>, CatalogError> {
    let window = query.window()?;
    let page = state.store.list(window).await?;
    Ok(Json(ListResponse::from_page(window, page)))
}

/// POST /adiciona
pub async fn add_book(
    _auth: RequireBasicAuth,
    State(state): State<CatalogState>,
    Query(query): Query<AddQuery>,
    Json(payload): Json<BookPayload>,
) -> Result<Json<Confirmation>, CatalogError> {
    let payload = payload.normalized()?;
    let livro = state.store.insert(query.id_livro, payload).await?;
    info!("ID: {}, Title: {}, book added", livro.id_livro, livro.titulo_livro);
    Ok(Json(Confirmation {
        message: format!("O livro '{}' foi adicionado com sucesso!", livro.titulo_livro),
        livro,
    }))
}

/// PUT /atualiza/{id_livro}
pub async fn update_book(
    _auth: RequireBasicAuth,
    State(state): State<CatalogState>,
    Path(id_livro): Path<i64>,
    Json(payload): Json<BookPayload>,
) -> Result<Json<Confirmation>, CatalogError> {
    let payload = payload.normalized()?;
    let livro = state
        .store
        .update(id_livro, payload)
        .await?
        .ok_or(CatalogError::NotFound(UPDATE_NOT_FOUND))?;
    info!("ID: {id_livro}, Title: {}, book updated", livro.titulo_livro);
    Ok(Json(Confirmation {
        message: format!(
            "As informações do livro '{}' foram atualizadas!",
            livro.titulo_livro
        ),
        livro,
    }))
}

/// DELETE /deletar/{id_livro}
pub async fn delete_book(
    _auth: RequireBasicAuth,
    State(state): State<CatalogState>,
    Path(id_livro): Path<i64>,
) -> Result<Json<Confirmation>, CatalogError> {
    let livro = state
        .store
        .delete(id_livro)
        .await?
        .ok_or(CatalogError::NotFound(DELETE_NOT_FOUND))?;
    info!("ID: {id_livro}, Title: {}, book deleted", livro.titulo_livro);
    Ok(Json(Confirmation {
        message: format!("O livro '{}' foi deletado!", livro.titulo_livro),
        livro,
    }))
}
