// src/web/catalog_handlers.rs
// As quatro fatias do catálogo eleitoral: Election, Position, Party e
// Candidate. Cada GET mostra o formulário (com os dados do pai, quando a
// fatia os exige) e cada POST insere uma linha e redireciona de volta com
// feedback na query string (padrão Post/Redirect/Get).
use crate::{
    error::{AppError, AppResult},
    models::catalog::{CandidateForm, ElectionForm, PositionForm},
    services::{catalog_service, upload_service},
    state::AppState,
    templates::{ContestantsPage, ElectionPage, PartyPage, PositionPage},
    web::{auth_handlers::render_page, mw_session::SessionContext},
};
use axum::{
    body::Bytes,
    extract::{Extension, Form, Multipart, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

// Feedback transportado na query string após um redirect
#[derive(Deserialize, Debug)]
pub struct FeedbackParams {
    success: Option<String>,
    error: Option<String>,
}

fn split_context(context: SessionContext) -> (Option<String>, Option<String>) {
    match context.0 {
        Some(session_user) => (Some(session_user.username), session_user.image),
        None => (None, None),
    }
}

// --- Election ---

// GET /election
pub async fn show_election_form(
    Extension(context): Extension<SessionContext>,
    Query(params): Query<FeedbackParams>,
) -> AppResult<Response> {
    let (username, image) = split_context(context);
    render_page(ElectionPage {
        username,
        image,
        success_message: params.success,
        error_message: params.error,
    })
}

// POST /election
pub async fn handle_create_election(
    State(state): State<AppState>,
    Form(form): Form<ElectionForm>,
) -> AppResult<Redirect> {
    if form.election_name.trim().is_empty() {
        tracing::warn!("Criação de eleição rejeitada: nome vazio.");
        let error_msg = urlencoding::encode("Please provide an election name.");
        let redirect_url = format!("/election?error={}", error_msg);
        return Ok(Redirect::to(&redirect_url));
    }

    match catalog_service::create_election(&state.db_pool, form.election_name.trim()).await {
        Ok(_) => {
            let success_msg = urlencoding::encode("New election added.");
            let redirect_url = format!("/election?success={}", success_msg);
            Ok(Redirect::to(&redirect_url))
        }
        Err(e) => {
            tracing::error!("Erro ao inserir eleição: {:?}", e);
            let error_msg = urlencoding::encode("Database error. Please try again later.");
            let redirect_url = format!("/election?error={}", error_msg);
            Ok(Redirect::to(&redirect_url))
        }
    }
}

// --- Position ---

// GET /position (lista as eleições para o <select>)
pub async fn show_position_form(
    State(state): State<AppState>,
    Extension(context): Extension<SessionContext>,
    Query(params): Query<FeedbackParams>,
) -> AppResult<Response> {
    let elections = catalog_service::find_all_elections(&state.db_pool).await?;
    let (username, image) = split_context(context);
    render_page(PositionPage {
        elections,
        username,
        image,
        success_message: params.success,
        error_message: params.error,
    })
}

// POST /position
pub async fn handle_create_position(
    State(state): State<AppState>,
    Form(form): Form<PositionForm>,
) -> AppResult<Redirect> {
    if form.position_name.trim().is_empty() {
        tracing::warn!("Criação de cargo rejeitada: nome vazio.");
        let error_msg = urlencoding::encode("Please provide a position name.");
        let redirect_url = format!("/position?error={}", error_msg);
        return Ok(Redirect::to(&redirect_url));
    }

    match catalog_service::create_position(&state.db_pool, form.position_name.trim(), form.election)
        .await
    {
        Ok(_) => {
            let success_msg = urlencoding::encode("New position added.");
            let redirect_url = format!("/position?success={}", success_msg);
            Ok(Redirect::to(&redirect_url))
        }
        Err(e) => {
            // Inclui FK inválida (eleição inexistente)
            tracing::error!("Erro ao inserir cargo: {:?}", e);
            let error_msg = urlencoding::encode("Database error. Please try again later.");
            let redirect_url = format!("/position?error={}", error_msg);
            Ok(Redirect::to(&redirect_url))
        }
    }
}

// --- Party ---

// GET /party
pub async fn show_party_form(
    Extension(context): Extension<SessionContext>,
    Query(params): Query<FeedbackParams>,
) -> AppResult<Response> {
    let (username, image) = split_context(context);
    render_page(PartyPage {
        username,
        image,
        success_message: params.success,
        error_message: params.error,
    })
}

// POST /party (multipart: nome + logo opcional)
pub async fn handle_create_party(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let mut party_name = String::new();
    let mut logo: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "partyName" => party_name = field.text().await?,
            "logo" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                if !file_name.is_empty() && !data.is_empty() {
                    logo = Some((file_name, data));
                }
            }
            _ => {}
        }
    }

    if party_name.trim().is_empty() {
        tracing::warn!("Criação de partido rejeitada: nome vazio.");
        let error_msg = urlencoding::encode("Please provide a party name.");
        let redirect_url = format!("/party?error={}", error_msg);
        return Ok(Redirect::to(&redirect_url).into_response());
    }

    // Logo recebido ou caminho default
    let logo_path = match logo {
        Some((file_name, data)) => {
            tracing::info!("Logo de partido recebido: {}", file_name);
            upload_service::store_upload(upload_service::LOGO_DIR, &file_name, &data).await?
        }
        None => {
            tracing::info!("Sem logo. Será usado o logo default.");
            upload_service::DEFAULT_PARTY_LOGO.to_string()
        }
    };

    match catalog_service::create_party(&state.db_pool, party_name.trim(), &logo_path).await {
        Ok(_) => {
            let success_msg = urlencoding::encode("New party added.");
            let redirect_url = format!("/party?success={}", success_msg);
            Ok(Redirect::to(&redirect_url).into_response())
        }
        Err(e) => {
            tracing::error!("Erro ao inserir partido: {:?}", e);
            let error_msg = urlencoding::encode("Database error. Please try again later.");
            let redirect_url = format!("/party?error={}", error_msg);
            Ok(Redirect::to(&redirect_url).into_response())
        }
    }
}

// --- Candidate ---

// GET /contestants (lista cargos e partidos para os <select>)
pub async fn show_contestants_form(
    State(state): State<AppState>,
    Extension(context): Extension<SessionContext>,
    Query(params): Query<FeedbackParams>,
) -> AppResult<Response> {
    let positions = catalog_service::find_all_positions(&state.db_pool).await?;
    let parties = catalog_service::find_all_parties(&state.db_pool).await?;
    let (username, image) = split_context(context);
    render_page(ContestantsPage {
        positions,
        parties,
        username,
        image,
        success_message: params.success,
        error_message: params.error,
    })
}

// POST /contestants (multipart: campos + foto OBRIGATÓRIA)
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let mut fname = String::new();
    let mut mname: Option<String> = None;
    let mut lname = String::new();
    let mut position_raw = String::new();
    let mut party_raw = String::new();
    let mut photo: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "fName" => fname = field.text().await?,
            "mName" => {
                let value = field.text().await?;
                if !value.trim().is_empty() {
                    mname = Some(value);
                }
            }
            "lName" => lname = field.text().await?,
            "position" => position_raw = field.text().await?,
            "party" => party_raw = field.text().await?,
            "contestants-photo" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                if !file_name.is_empty() && !data.is_empty() {
                    photo = Some((file_name, data));
                }
            }
            _ => {}
        }
    }

    // Esta rota é a única que exige o ficheiro: 400 se estiver em falta
    let Some((file_name, data)) = photo else {
        tracing::warn!("POST /contestants sem foto.");
        return Err(AppError::MissingUpload);
    };
    tracing::info!("Foto de candidato recebida: {}", file_name);

    // Os <select> enviam os ids dos pais
    let (Ok(position_id), Ok(party_id)) = (position_raw.parse::<i64>(), party_raw.parse::<i64>())
    else {
        tracing::warn!(
            "POST /contestants com pais inválidos: position='{}' party='{}'",
            position_raw,
            party_raw
        );
        let error_msg = urlencoding::encode("Please choose a position and a party.");
        let redirect_url = format!("/contestants?error={}", error_msg);
        return Ok(Redirect::to(&redirect_url).into_response());
    };

    let photo_path =
        upload_service::store_upload(upload_service::CONTESTANTS_DIR, &file_name, &data).await?;

    let form = CandidateForm {
        fname,
        mname,
        lname,
        position_id,
        party_id,
    };

    match catalog_service::create_candidate(&state.db_pool, &form, &photo_path).await {
        Ok(_) => {
            let success_msg = urlencoding::encode("New contestant added.");
            let redirect_url = format!("/contestants?success={}", success_msg);
            Ok(Redirect::to(&redirect_url).into_response())
        }
        Err(e) => {
            tracing::error!("Erro ao inserir candidato: {:?}", e);
            let error_msg = urlencoding::encode("Database error. Please try again later.");
            let redirect_url = format!("/contestants?error={}", error_msg);
            Ok(Redirect::to(&redirect_url).into_response())
        }
    }
}
