// src/services/catalog_service.rs
// CRUD do catálogo eleitoral. Quatro fatias paralelas: Election, Position,
// Party e Candidate. Só há criação e listagem; nenhuma rota edita ou apaga.
use crate::{
    error::AppResult,
    models::catalog::{Candidate, CandidateForm, Election, Party, Position},
};
use sqlx::SqlitePool;

pub async fn create_election(db_pool: &SqlitePool, name: &str) -> AppResult<i64> {
    let election_id = sqlx::query("INSERT INTO elections (name) VALUES (?1)")
        .bind(name)
        .execute(db_pool)
        .await?
        .last_insert_rowid();
    tracing::info!("Eleição '{}' criada com id {}.", name, election_id);
    Ok(election_id)
}

pub async fn find_all_elections(db_pool: &SqlitePool) -> AppResult<Vec<Election>> {
    let elections =
        sqlx::query_as::<_, Election>("SELECT id, name FROM elections ORDER BY id ASC")
            .fetch_all(db_pool)
            .await?;
    Ok(elections)
}

/// Cria um cargo dentro de uma eleição existente. A FK é validada pela DB.
pub async fn create_position(
    db_pool: &SqlitePool,
    name: &str,
    election_id: i64,
) -> AppResult<i64> {
    let position_id =
        sqlx::query("INSERT INTO positions (name, election_id) VALUES (?1, ?2)")
            .bind(name)
            .bind(election_id)
            .execute(db_pool)
            .await?
            .last_insert_rowid();
    tracing::info!("Cargo '{}' criado na eleição {}.", name, election_id);
    Ok(position_id)
}

pub async fn find_all_positions(db_pool: &SqlitePool) -> AppResult<Vec<Position>> {
    let positions = sqlx::query_as::<_, Position>(
        "SELECT id, name, election_id FROM positions ORDER BY id ASC",
    )
    .fetch_all(db_pool)
    .await?;
    Ok(positions)
}

pub async fn create_party(db_pool: &SqlitePool, name: &str, logo_path: &str) -> AppResult<i64> {
    let party_id = sqlx::query("INSERT INTO parties (name, logo) VALUES (?1, ?2)")
        .bind(name)
        .bind(logo_path)
        .execute(db_pool)
        .await?
        .last_insert_rowid();
    tracing::info!("Partido '{}' criado com id {}.", name, party_id);
    Ok(party_id)
}

pub async fn find_all_parties(db_pool: &SqlitePool) -> AppResult<Vec<Party>> {
    let parties =
        sqlx::query_as::<_, Party>("SELECT id, name, logo FROM parties ORDER BY id ASC")
            .fetch_all(db_pool)
            .await?;
    Ok(parties)
}

/// Cria um candidato ligado a um cargo e a um partido existentes.
pub async fn create_candidate(
    db_pool: &SqlitePool,
    form: &CandidateForm,
    photo_path: &str,
) -> AppResult<i64> {
    let candidate_id = sqlx::query(
        r#"
        INSERT INTO candidates (fname, mname, lname, position_id, party_id, photo)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&form.fname)
    .bind(&form.mname)
    .bind(&form.lname)
    .bind(form.position_id)
    .bind(form.party_id)
    .bind(photo_path)
    .execute(db_pool)
    .await?
    .last_insert_rowid();
    tracing::info!(
        "Candidato '{} {}' criado com id {}.",
        form.fname,
        form.lname,
        candidate_id
    );
    Ok(candidate_id)
}

pub async fn find_all_candidates(db_pool: &SqlitePool) -> AppResult<Vec<Candidate>> {
    let candidates = sqlx::query_as::<_, Candidate>(
        r#"
        SELECT id, fname, mname, lname, position_id, party_id, photo
        FROM candidates
        ORDER BY id ASC
        "#,
    )
    .fetch_all(db_pool)
    .await?;
    Ok(candidates)
}
