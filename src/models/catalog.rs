// src/models/catalog.rs
// O catálogo eleitoral: Election -> Position -> Candidate, mais Party.
use serde::Deserialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Election {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct Position {
    pub id: i64,
    pub name: String,
    pub election_id: i64, // FK -> elections
}

#[derive(Debug, Clone, FromRow)]
pub struct Party {
    pub id: i64,
    pub name: String,
    pub logo: String, // caminho do logótipo no disco
}

#[derive(Debug, Clone, FromRow)]
pub struct Candidate {
    pub id: i64,
    pub fname: String,
    pub mname: Option<String>,
    pub lname: String,
    pub position_id: i64, // FK -> positions
    pub party_id: i64,    // FK -> parties
    pub photo: String,
}

// --- Structs para os formulários urlencoded ---

#[derive(Debug, Deserialize)]
pub struct ElectionForm {
    #[serde(rename = "electionName")]
    pub election_name: String,
}

#[derive(Debug, Deserialize)]
pub struct PositionForm {
    #[serde(rename = "positionName")]
    pub position_name: String,
    // O <select> do formulário envia o id da eleição escolhida
    pub election: i64,
}

// Campos textuais do formulário de candidato (multipart; a foto vem à parte)
#[derive(Debug, Default, Clone)]
pub struct CandidateForm {
    pub fname: String,
    pub mname: Option<String>,
    pub lname: String,
    pub position_id: i64,
    pub party_id: i64,
}
