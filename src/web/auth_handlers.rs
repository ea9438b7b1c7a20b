// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{LoginForm, Role},
    services::{auth_service, upload_service, user_service},
    state::AppState,
    templates::{
        CandidateDashboardPage, ForgotPasswordPage, LoginPage, RecoverPasswordPage,
        VoterDashboardPage,
    },
};
use askama::Template; // Trait Template para render()
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session; // Para gestão de login

// GET / (formulário de login)
pub async fn show_login_form() -> AppResult<Response> {
    render_login_page(StatusCode::OK, None)
}

// POST /dashboard (verificação de credenciais + dispatch por role)
pub async fn handle_login(
    State(state): State<AppState>, // Acesso ao AppState (db_pool)
    session: Session,              // Acesso à sessão
    Form(form): Form<LoginForm>,   // Dados do formulário (username, password)
) -> AppResult<Response> {
    tracing::info!("Tentativa de login para username: {}", form.username);

    // 1. Busca a credencial pelo username
    let credential =
        match user_service::find_credential_by_username(&state.db_pool, &form.username).await? {
            Some(credential) => credential,
            None => {
                tracing::warn!("Utilizador não encontrado: {}", form.username);
                // 401 sem tocar na sessão
                return render_login_page(
                    StatusCode::UNAUTHORIZED,
                    Some("User not found.".to_string()),
                );
            }
        };

    // 2. Compara a senha com o hash guardado
    if !auth_service::verify_password(&form.password, &credential.password_hash).await? {
        tracing::warn!("Senha incorreta para username: {}", form.username);
        return render_login_page(
            StatusCode::UNAUTHORIZED,
            Some("Invalid password.".to_string()),
        );
    }

    // 3. Carrega o registante associado (foto + role)
    let user = user_service::find_user_by_id(&state.db_pool, credential.user_id)
        .await?
        .ok_or_else(|| {
            // A invariante Credential -> User foi violada fora da aplicação
            tracing::error!(
                "CRÍTICO: credencial '{}' aponta para user {} inexistente!",
                credential.username,
                credential.user_id
            );
            AppError::InternalServerError
        })?;

    // 4. Autentica a sessão
    session
        .cycle_id()
        .await // Gera novo ID de sessão
        .map_err(|e| AppError::SessionError(format!("Falha ao rodar ID: {}", e)))?;
    session
        .insert("username", &credential.username)
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao inserir na sessão: {}", e)))?;
    session
        .insert("photo_path", &user.photo)
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao inserir na sessão: {}", e)))?;

    let image = Some(upload_service::public_url(&user.photo));

    // 5. Dispatch exaustivo sobre o enum de roles
    match Role::parse(&user.role) {
        Some(Role::Admin) => {
            tracing::info!("✅ Admin '{}' fez login.", credential.username);
            Ok(Redirect::to("/dashboard").into_response())
        }
        Some(Role::Candidate) => {
            tracing::info!("✅ Candidato '{}' fez login.", credential.username);
            let template = CandidateDashboardPage {
                username: credential.username,
                image,
                message: "Welcome to Candidate dashboard".to_string(),
            };
            render_page(template)
        }
        Some(Role::Voter) => {
            tracing::info!("✅ Voter '{}' fez login.", credential.username);
            let template = VoterDashboardPage {
                username: credential.username,
                image,
                message: "Welcome to Voter dashboard".to_string(),
            };
            render_page(template)
        }
        None => {
            // Role fora do conjunto fechado: volta ao login com erro
            tracing::warn!(
                "Role desconhecida '{}' para o user {}.",
                user.role,
                user.id
            );
            render_login_page(StatusCode::OK, Some("Role was not selected!".to_string()))
        }
    }
}

// GET /forgot-password
pub async fn show_forgot_password_form() -> AppResult<Response> {
    render_page(ForgotPasswordPage)
}

// POST /recover-account (stub: só redireciona para o GET)
pub async fn handle_recover_account() -> Redirect {
    Redirect::to("/recover-account")
}

// GET /recover-account
pub async fn show_recover_account_form() -> AppResult<Response> {
    render_page(RecoverPasswordPage)
}

/// Renderiza a página de login com o status e o erro dados.
pub fn render_login_page(status: StatusCode, error: Option<String>) -> AppResult<Response> {
    let template = LoginPage { error };
    match template.render() {
        Ok(html) => Ok((status, Html(html)).into_response()),
        Err(e) => {
            tracing::error!("Falha ao renderizar template de login: {}", e);
            Err(AppError::InternalServerError)
        }
    }
}

/// Renderiza qualquer template Askama como 200 OK.
pub fn render_page<T: Template>(template: T) -> AppResult<Response> {
    match template.render() {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) => {
            tracing::error!("Falha ao renderizar template: {}", e);
            Err(AppError::InternalServerError)
        }
    }
}
