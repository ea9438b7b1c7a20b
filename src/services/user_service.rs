// src/services/user_service.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{Credential, RegistrationForm, Role, User},
};
use chrono::NaiveDate;
use sqlx::SqlitePool;

/// Busca a credencial de um utilizador pelo username.
pub async fn find_credential_by_username(
    db_pool: &SqlitePool,
    username: &str,
) -> AppResult<Option<Credential>> {
    tracing::debug!("Buscando credencial para username: {}", username);
    let credential = sqlx::query_as::<_, Credential>(
        r#"
        SELECT id, username, password_hash, user_id
        FROM credentials
        WHERE username = ?1
        "#,
    )
    .bind(username)
    .fetch_optional(db_pool)
    .await?;

    if credential.is_some() {
        tracing::debug!("Credencial de '{}' encontrada.", username);
    } else {
        tracing::debug!("Credencial de '{}' não encontrada.", username);
    }
    Ok(credential)
}

/// Busca um registante pelo id interno (a FK guardada na credencial).
pub async fn find_user_by_id(db_pool: &SqlitePool, user_id: i64) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, fname, mname, lname, dob, photo, role, voted
        FROM users
        WHERE id = ?1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(user)
}

/// Lista as roles da tabela estática, para preencher o <select> do registo.
pub async fn find_role_options(db_pool: &SqlitePool) -> AppResult<Vec<String>> {
    let roles = sqlx::query_scalar::<_, String>("SELECT role FROM roles ORDER BY id ASC")
        .fetch_all(db_pool)
        .await?;
    Ok(roles)
}

/// Regista um novo utilizador: linha em 'users' + linha em 'credentials',
/// dentro de uma única transação. Se o segundo INSERT falhar, o primeiro é
/// revertido e nenhum registo órfão fica para trás.
pub async fn register_user(
    db_pool: &SqlitePool,
    form: &RegistrationForm,
    photo_path: &str,
) -> AppResult<i64> {
    tracing::info!("Registando utilizador: {}", form.username);

    // A data já foi validada pelo handler; aqui só a convertemos
    let dob = NaiveDate::parse_from_str(&form.dob, "%Y-%m-%d").map_err(|e| {
        tracing::error!("Data de nascimento inválida '{}': {}", form.dob, e);
        AppError::InternalServerError
    })?;

    // O texto persistido é sempre o canónico do conjunto fechado de roles
    let role = Role::parse(&form.role).ok_or_else(|| {
        tracing::error!("Role inválida '{}' no registo de '{}'", form.role, form.username);
        AppError::InternalServerError
    })?;

    // 1. Gera o hash da senha antes de abrir a transação
    let password_hash = crate::services::auth_service::hash_password(&form.password).await?;

    // 2. Transação: users e credentials ou tudo ou nada
    let mut tx = db_pool.begin().await?;

    let user_id = sqlx::query(
        r#"
        INSERT INTO users (fname, mname, lname, dob, photo, role)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&form.fname)
    .bind(&form.mname)
    .bind(&form.lname)
    .bind(dob)
    .bind(photo_path)
    .bind(role.as_str())
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    sqlx::query(
        r#"
        INSERT INTO credentials (username, password_hash, user_id)
        VALUES (?1, ?2, ?3)
        "#,
    )
    .bind(&form.username)
    .bind(&password_hash)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::info!("✅ Utilizador '{}' registado com id {}.", form.username, user_id);
    Ok(user_id)
}

/// Total de registantes com a role Voter, para o dashboard de admin.
pub async fn count_voters(db_pool: &SqlitePool) -> AppResult<i64> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = 'Voter'")
        .fetch_one(db_pool)
        .await?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::services::{auth_service, upload_service};

    fn voter_form(username: &str) -> RegistrationForm {
        RegistrationForm {
            fname: "Ann".into(),
            mname: None,
            lname: "Doe".into(),
            dob: "2000-01-01".into(),
            role: "Voter".into(),
            username: username.into(),
            password: "pw123".into(),
        }
    }

    #[tokio::test]
    async fn registo_cria_user_e_credencial_ligados() {
        let pool = create_test_pool().await;
        let user_id = register_user(&pool, &voter_form("ann"), upload_service::DEFAULT_USER_PHOTO)
            .await
            .unwrap();

        let credential = find_credential_by_username(&pool, "ann")
            .await
            .unwrap()
            .expect("credencial deve existir");
        assert_eq!(credential.user_id, user_id);
        // O hash guardado nunca é a senha em claro
        assert_ne!(credential.password_hash, "pw123");
        assert!(auth_service::verify_password("pw123", &credential.password_hash)
            .await
            .unwrap());

        let user = find_user_by_id(&pool, user_id)
            .await
            .unwrap()
            .expect("user deve existir");
        assert_eq!(user.fname, "Ann");
        assert_eq!(user.photo, upload_service::DEFAULT_USER_PHOTO);
        assert_eq!(user.role, "Voter");
        assert!(!user.voted);
    }

    #[tokio::test]
    async fn registo_reverte_tudo_se_a_credencial_falhar() {
        let pool = create_test_pool().await;
        // Sem a tabela de credenciais, o segundo INSERT falha a meio da transação
        sqlx::query("DROP TABLE credentials")
            .execute(&pool)
            .await
            .unwrap();

        let result =
            register_user(&pool, &voter_form("ann"), upload_service::DEFAULT_USER_PHOTO).await;
        assert!(result.is_err());

        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(users, 0, "o INSERT em users deve ser revertido");
    }

    #[tokio::test]
    async fn credencial_inexistente_devolve_none() {
        let pool = create_test_pool().await;
        assert!(find_credential_by_username(&pool, "ghost")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn seed_das_roles_esta_completo() {
        let pool = create_test_pool().await;
        let roles = find_role_options(&pool).await.unwrap();
        assert_eq!(roles, vec!["Admin", "Candidate", "Voter"]);
    }

    #[tokio::test]
    async fn contagem_de_voters_ignora_outras_roles() {
        let pool = create_test_pool().await;
        register_user(&pool, &voter_form("ann"), upload_service::DEFAULT_USER_PHOTO)
            .await
            .unwrap();
        let mut admin = voter_form("root");
        admin.role = "Admin".into();
        register_user(&pool, &admin, upload_service::DEFAULT_USER_PHOTO)
            .await
            .unwrap();

        assert_eq!(count_voters(&pool).await.unwrap(), 1);
    }
}
