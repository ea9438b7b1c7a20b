// src/web/dashboard_handlers.rs
use crate::{
    error::AppResult,
    services::{catalog_service, user_service},
    state::AppState,
    templates::{AdminDashboardPage, NotFoundPage},
    web::{
        auth_handlers::{render_login_page, render_page},
        mw_session::SessionContext,
    },
};
use askama::Template;
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

// GET /dashboard - resumo eleitoral para o admin
pub async fn show_admin_dashboard(
    State(state): State<AppState>,
    Extension(context): Extension<SessionContext>,
) -> AppResult<Response> {
    // Sem sessão não há dashboard: volta ao login com erro
    let Some(session_user) = context.0 else {
        tracing::debug!("GET /dashboard sem sessão, devolvendo login.");
        return render_login_page(
            StatusCode::OK,
            Some("Login failed! Please try again.".to_string()),
        );
    };

    // 1. Conta os registantes com role Voter
    let total_voters = match user_service::count_voters(&state.db_pool).await {
        Ok(total) => total,
        Err(e) => {
            tracing::error!("Erro ao contar voters: {:?}", e);
            let template = AdminDashboardPage {
                message: "Error loading dashboard".to_string(),
                total_voters: None,
                candidates: vec![],
                username: session_user.username,
                image: session_user.image,
            };
            return render_page_with_status(template, StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // 2. Lista todos os candidatos
    let candidates = match catalog_service::find_all_candidates(&state.db_pool).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Erro ao listar candidatos: {:?}", e);
            let template = AdminDashboardPage {
                message: "Error loading dashboard".to_string(),
                total_voters: Some(total_voters),
                candidates: vec![],
                username: session_user.username,
                image: session_user.image,
            };
            return render_page_with_status(template, StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let template = AdminDashboardPage {
        message: "Admin Electoral Dashboard".to_string(),
        total_voters: Some(total_voters),
        candidates,
        username: session_user.username,
        image: session_user.image,
    };
    render_page(template)
}

// GET /voter - placeholder textual
pub async fn voter_placeholder() -> &'static str {
    "Welcome to voter dashboard"
}

// GET /candidate - placeholder textual
pub async fn candidate_placeholder() -> &'static str {
    "Welcome to candidate dashboard"
}

// GET/POST /vote-list e /users - ainda não implementadas
pub async fn not_found_page(
    Extension(context): Extension<SessionContext>,
) -> AppResult<Response> {
    let (username, image) = match context.0 {
        Some(session_user) => (Some(session_user.username), session_user.image),
        None => (None, None),
    };
    render_page(NotFoundPage { username, image })
}

fn render_page_with_status<T: Template>(template: T, status: StatusCode) -> AppResult<Response> {
    match template.render() {
        Ok(html) => Ok((status, Html(html)).into_response()),
        Err(e) => {
            tracing::error!("Falha ao renderizar template: {}", e);
            Err(crate::error::AppError::InternalServerError)
        }
    }
}
