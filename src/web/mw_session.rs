// src/web/mw_session.rs
use crate::{error::AppError, services::upload_service};
use axum::{
    extract::Request,  // Usar Request para poder adicionar extensões
    middleware::Next,  // Para chamar o próximo handler/middleware
    response::Response,
};
use tower_sessions::Session; // Para aceder à sessão

/// Identidade autenticada desta requisição, montada a partir da sessão.
#[derive(Clone, Debug)]
pub struct SessionUser {
    pub username: String,
    pub image: Option<String>, // URL pública da foto (/uploads/...)
}

/// Contexto por requisição: `Some` quando há sessão autenticada.
/// Os handlers recebem isto por Extension em vez de lerem a sessão ambiente.
#[derive(Clone, Debug, Default)]
pub struct SessionContext(pub Option<SessionUser>);

// Middleware que monta o SessionContext para TODAS as rotas de páginas.
// Não bloqueia nada: rotas que exigem sessão decidem por si o que fazer.
pub async fn load_session_context(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let username: Option<String> = session
        .get("username")
        .await
        .map_err(|e| AppError::SessionError(format!("Erro ao ler sessão: {}", e)))?;

    let context = match username {
        Some(username) => {
            tracing::debug!("Sessão MW: requisição autenticada de '{}'", username);
            let photo_path: Option<String> = session.get("photo_path").await.ok().flatten();
            SessionContext(Some(SessionUser {
                username,
                image: photo_path.as_deref().map(upload_service::public_url),
            }))
        }
        None => SessionContext(None),
    };

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}
