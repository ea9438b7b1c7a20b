// src/models/user.rs
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::FromRow;

// Representa um registante lido da tabela 'users'
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub fname: String,
    pub mname: Option<String>,
    pub lname: String,
    pub dob: NaiveDate, // SQLite DATE -> NaiveDate
    pub photo: String,  // caminho no disco, servido sob /uploads
    pub role: String,   // texto na DB; ver Role para o enum fechado
    pub voted: bool,
}

// Par username/hash lido da tabela 'credentials' (1:1 com User)
#[derive(Debug, Clone, FromRow)]
pub struct Credential {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub user_id: i64,
}

/// As três funções possíveis de um utilizador.
/// A DB guarda o texto; o dispatch no login é exaustivo sobre este enum,
/// nunca sobre a string crua.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Candidate,
    Voter,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Candidate => "Candidate",
            Role::Voter => "Voter",
        }
    }

    /// Converte o texto guardado na DB. `None` para qualquer valor fora do
    /// conjunto fechado (ex: role nunca selecionada no formulário).
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "Admin" => Some(Role::Admin),
            "Candidate" => Some(Role::Candidate),
            "Voter" => Some(Role::Voter),
            _ => None,
        }
    }
}

// Struct para dados do formulário de login (POST /dashboard)
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

// Campos textuais do formulário de registo (POST /), extraídos do multipart.
// A foto vem à parte, como ficheiro.
#[derive(Debug, Default, Clone)]
pub struct RegistrationForm {
    pub fname: String,
    pub mname: Option<String>,
    pub lname: String,
    pub dob: String, // validado como YYYY-MM-DD antes de qualquer INSERT
    pub role: String,
    pub username: String,
    pub password: String,
}
