// src/templates.rs
use crate::models::catalog::{Candidate, Election, Party, Position};
use askama::Template; // Trait necessário para Askama

// Struct para o template `login.html` (ficheiro externo em templates/)
#[derive(Template)] // Deriva a funcionalidade de template
#[template(path = "login.html")]
pub struct LoginPage {
    // Campo opcional para passar uma mensagem de erro para o template
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "voter_registration.html")]
pub struct RegisterPage {
    // As roles vêm da tabela estática 'roles', para o <select> do formulário
    pub roles: Vec<String>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "forgot_password.html")]
pub struct ForgotPasswordPage;

#[derive(Template)]
#[template(path = "recover_password.html")]
pub struct RecoverPasswordPage;

// Dashboard de admin: contagem de voters + tabela de candidatos
#[derive(Template)]
#[template(path = "admin_dashboard.html")]
pub struct AdminDashboardPage {
    pub message: String,
    pub total_voters: Option<i64>,
    pub candidates: Vec<Candidate>,
    pub username: String,
    pub image: Option<String>,
}

#[derive(Template)]
#[template(path = "candidate_dashboard.html")]
pub struct CandidateDashboardPage {
    pub username: String,
    pub image: Option<String>,
    pub message: String,
}

// O dashboard de voter renderiza a página de voto
#[derive(Template)]
#[template(path = "vote.html")]
pub struct VoterDashboardPage {
    pub username: String,
    pub image: Option<String>,
    pub message: String,
}

#[derive(Template)]
#[template(path = "contestants.html")]
pub struct ContestantsPage {
    pub positions: Vec<Position>,
    pub parties: Vec<Party>,
    pub username: Option<String>,
    pub image: Option<String>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Template)]
#[template(path = "party_registration.html")]
pub struct PartyPage {
    pub username: Option<String>,
    pub image: Option<String>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Template)]
#[template(path = "position.html")]
pub struct PositionPage {
    // Lista das eleições existentes, para o <select> do formulário
    pub elections: Vec<Election>,
    pub username: Option<String>,
    pub image: Option<String>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Template)]
#[template(path = "elections.html")]
pub struct ElectionPage {
    pub username: Option<String>,
    pub image: Option<String>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

// Para as rotas ainda não implementadas (/vote-list, /users)
#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {
    pub username: Option<String>,
    pub image: Option<String>,
}
