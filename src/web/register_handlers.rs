// src/web/register_handlers.rs
use crate::{
    error::AppResult,
    models::user::{RegistrationForm, Role},
    services::{upload_service, user_service},
    state::AppState,
    templates::RegisterPage,
    web::auth_handlers::render_page,
};
use axum::{
    body::Bytes,
    extract::{Multipart, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::NaiveDate;

// GET /register - formulário de registo com as roles da tabela estática
pub async fn show_registration_form(State(state): State<AppState>) -> AppResult<Response> {
    let roles = user_service::find_role_options(&state.db_pool).await?;
    render_page(RegisterPage { roles, error: None })
}

// POST / - registo de um novo utilizador (multipart: campos + foto opcional)
pub async fn handle_registration(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let mut form = RegistrationForm::default();
    let mut photo: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "photo" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                // Input file vazio chega como campo sem nome de ficheiro
                if !file_name.is_empty() && !data.is_empty() {
                    photo = Some((file_name, data));
                }
            }
            "fName" => form.fname = field.text().await?,
            "mName" => {
                let value = field.text().await?;
                if !value.trim().is_empty() {
                    form.mname = Some(value);
                }
            }
            "lName" => form.lname = field.text().await?,
            "dob" => form.dob = field.text().await?,
            "role" => form.role = field.text().await?,
            "username" => form.username = field.text().await?,
            "password" => form.password = field.text().await?,
            _ => {}
        }
    }

    // Validação ANTES de qualquer INSERT
    if !registration_is_valid(&form) {
        tracing::warn!(
            "Registo rejeitado para '{}': campos obrigatórios em falta ou inválidos.",
            form.username
        );
        return render_registration_error(&state, "Please check you input fields.").await;
    }

    // Foto recebida ou caminho default
    let photo_path = match photo {
        Some((file_name, data)) => {
            tracing::info!("Foto de utilizador recebida: {}", file_name);
            upload_service::store_upload(upload_service::UPLOADS_DIR, &file_name, &data).await?
        }
        None => {
            tracing::info!("Sem foto. Será usada a imagem default.");
            upload_service::DEFAULT_USER_PHOTO.to_string()
        }
    };

    user_service::register_user(&state.db_pool, &form, &photo_path).await?;

    Ok(Redirect::to("/").into_response())
}

/// Primeiro nome, data válida, role do conjunto fechado, username e senha.
/// O nome do meio e o apelido não são obrigatórios.
fn registration_is_valid(form: &RegistrationForm) -> bool {
    if form.fname.trim().is_empty()
        || form.username.trim().is_empty()
        || form.password.is_empty()
    {
        return false;
    }
    if NaiveDate::parse_from_str(&form.dob, "%Y-%m-%d").is_err() {
        return false;
    }
    Role::parse(&form.role).is_some()
}

async fn render_registration_error(state: &AppState, message: &str) -> AppResult<Response> {
    // Recarrega as roles para reapresentar o formulário
    let roles = match user_service::find_role_options(&state.db_pool).await {
        Ok(roles) => roles,
        Err(e) => {
            tracing::warn!("Erro ao buscar roles para o formulário: {:?}", e);
            vec![]
        }
    };
    render_page(RegisterPage {
        roles,
        error: Some(message.to_string()),
    })
}
