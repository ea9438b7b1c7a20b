// src/error.rs
use axum::{http::StatusCode, response::Html, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro ao processar password")]
    PasswordHashingError,

    #[error("Erro na sessão: {0}")]
    SessionError(String),

    // Formulário multipart malformado ou interrompido
    #[error("Erro ao ler formulário multipart: {0}")]
    MultipartError(#[from] axum::extract::multipart::MultipartError),

    // A rota de foto de candidato exige ficheiro; as restantes usam default
    #[error("Nenhum ficheiro recebido")]
    MissingUpload,

    // Falha de escrita no disco ao guardar um upload
    #[error("Erro de I/O: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Erro interno inesperado")]
    InternalServerError,
}

// Como converter AppError numa resposta HTTP
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Loga o erro detalhado no servidor
        tracing::error!("Erro processado: {:?}", self);

        // A rota de contestants responde com este HTML cru, sem template
        if let AppError::MissingUpload = self {
            return (
                StatusCode::BAD_REQUEST,
                Html("<h1>No file received. Please try again.</h1>".to_string()),
            )
                .into_response();
        }

        let (status, user_message) = match self {
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error. Please try again later.",
            ),
            AppError::PasswordHashingError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error processing credentials.",
            ),
            AppError::SessionError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error. Please try again later.",
            ),
            AppError::MultipartError(_) => {
                (StatusCode::BAD_REQUEST, "Invalid form submission.")
            }
            AppError::IoError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error. Please try again later.",
            ),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred."),
        };

        // Retorna uma página HTML simples (ou poderia usar um template Askama de erro)
        (status, Html(format!(r#"
            <!DOCTYPE html><html><head><title>Error</title><style>body{{font-family:sans-serif;}}</style></head>
            <body><h1>Error {status_code}</h1><p>{message}</p><a href="javascript:history.back()">Back</a></body></html>
         "#, status_code=status.as_u16(), message=user_message))).into_response()
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;
