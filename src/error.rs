use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum CatalogError {
    #[error("missing or invalid credentials")]
    Unauthorized,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("book already exists")]
    Conflict,

    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] figment::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Message used when an update targets an unknown id.
pub const UPDATE_NOT_FOUND: &str = "Esse livro não foi encontrado";
/// Message used when a delete targets an unknown id.
pub const DELETE_NOT_FOUND: &str = "Livro não encontrado";

impl IntoResponse for CatalogError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            CatalogError::Unauthorized => {
                let body = ApiErrorBody {
                    code: "UNAUTHORIZED".to_string(),
                    message: "Credenciais inválidas.".to_string(),
                };
                let mut resp =
                    (StatusCode::UNAUTHORIZED, Json(ApiErrorResponse { error: body }))
                        .into_response();
                resp.headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Basic"));
                return resp;
            }
            CatalogError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "BAD_REQUEST".to_string(),
                    message,
                },
            ),
            CatalogError::Conflict => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "ALREADY_EXISTS".to_string(),
                    message: "Esse livro já existe".to_string(),
                },
            ),
            CatalogError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: message.to_string(),
                },
            ),
            err @ (CatalogError::DatabaseError(_)
            | CatalogError::RactorError(_)
            | CatalogError::ConfigError(_)
            | CatalogError::InvalidConfig(_)
            | CatalogError::IoError(_)) => {
                error!(error = %err, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody {
                        code: "INTERNAL_ERROR".to_string(),
                        message: "Erro interno do servidor.".to_string(),
                    },
                )
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
