// src/web/routes.rs
use crate::{
    services::upload_service,
    state::AppState,
    web::{auth_handlers, catalog_handlers, dashboard_handlers, mw_session, register_handlers},
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

pub fn create_router(app_state: AppState) -> Router {
    // --- Rotas de páginas ---
    // Todas passam pelo middleware de sessão, que monta o SessionContext;
    // nenhuma rota é bloqueada por ele.
    let page_routes = Router::new()
        // Login na raiz; o POST da raiz é o registo (o formulário de login
        // submete para /dashboard)
        .route(
            "/",
            get(auth_handlers::show_login_form).post(register_handlers::handle_registration),
        )
        .route("/register", get(register_handlers::show_registration_form))
        .route(
            "/forgot-password",
            get(auth_handlers::show_forgot_password_form),
        )
        .route(
            "/recover-account",
            get(auth_handlers::show_recover_account_form)
                .post(auth_handlers::handle_recover_account),
        )
        .route(
            "/dashboard",
            get(dashboard_handlers::show_admin_dashboard).post(auth_handlers::handle_login),
        )
        .route("/voter", get(dashboard_handlers::voter_placeholder))
        .route("/candidate", get(dashboard_handlers::candidate_placeholder))
        // Catálogo eleitoral
        .route(
            "/contestants",
            get(catalog_handlers::show_contestants_form)
                .post(catalog_handlers::handle_create_candidate),
        )
        .route(
            "/party",
            get(catalog_handlers::show_party_form).post(catalog_handlers::handle_create_party),
        )
        .route(
            "/position",
            get(catalog_handlers::show_position_form)
                .post(catalog_handlers::handle_create_position),
        )
        .route(
            "/election",
            get(catalog_handlers::show_election_form)
                .post(catalog_handlers::handle_create_election),
        )
        // Ainda não implementadas
        .route(
            "/vote-list",
            get(dashboard_handlers::not_found_page).post(dashboard_handlers::not_found_page),
        )
        .route(
            "/users",
            get(dashboard_handlers::not_found_page).post(dashboard_handlers::not_found_page),
        )
        .route_layer(middleware::from_fn(mw_session::load_session_context));

    // --- Router Final ---
    Router::new()
        .merge(page_routes)
        // Ficheiros enviados, servidos de volta sob /uploads
        .nest_service("/uploads", ServeDir::new(upload_service::UPLOADS_DIR))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::create_test_pool,
        models::user::RegistrationForm,
        services::{auth_service, upload_service, user_service},
    };
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;
    use tower_sessions::SessionManagerLayer;
    use tower_sessions_sqlx_store::SqliteStore;

    async fn test_app() -> (Router, sqlx::SqlitePool) {
        let pool = create_test_pool().await;
        let session_store = SqliteStore::new(pool.clone());
        session_store.migrate().await.unwrap();
        let app = create_router(AppState {
            db_pool: pool.clone(),
        })
        .layer(SessionManagerLayer::new(session_store).with_secure(false));
        (app, pool)
    }

    async fn register_ann(pool: &sqlx::SqlitePool) {
        let form = RegistrationForm {
            fname: "Ann".into(),
            mname: None,
            lname: "Doe".into(),
            dob: "2000-01-01".into(),
            role: "Voter".into(),
            username: "ann".into(),
            password: "pw123".into(),
        };
        user_service::register_user(pool, &form, upload_service::DEFAULT_USER_PHOTO)
            .await
            .unwrap();
    }

    fn login_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/dashboard")
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn raiz_mostra_o_formulario_de_login() {
        let (app, _pool) = test_app().await;
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn login_com_username_desconhecido_da_401() {
        let (app, _pool) = test_app().await;
        let response = app
            .oneshot(login_request("username=ghost&password=nope"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn login_com_senha_errada_da_401() {
        let (app, pool) = test_app().await;
        register_ann(&pool).await;
        let response = app
            .oneshot(login_request("username=ann&password=errada"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn login_de_voter_renderiza_o_dashboard_de_voto() {
        let (app, pool) = test_app().await;
        register_ann(&pool).await;
        let response = app
            .oneshot(login_request("username=ann&password=pw123"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Welcome to Voter dashboard"));
    }

    #[tokio::test]
    async fn registo_sem_foto_guarda_default_e_redireciona() {
        let (app, pool) = test_app().await;

        let boundary = "AaB03x";
        let mut body = String::new();
        for (name, value) in [
            ("fName", "Ann"),
            ("dob", "2000-01-01"),
            ("role", "Voter"),
            ("username", "ann"),
            ("password", "pw123"),
        ] {
            body.push_str(&format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{boundary}--\r\n"));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let credential = user_service::find_credential_by_username(&pool, "ann")
            .await
            .unwrap()
            .expect("credencial deve existir");
        assert_ne!(credential.password_hash, "pw123");
        assert!(
            auth_service::verify_password("pw123", &credential.password_hash)
                .await
                .unwrap()
        );

        let user = user_service::find_user_by_id(&pool, credential.user_id)
            .await
            .unwrap()
            .expect("user deve existir");
        assert_eq!(user.photo, upload_service::DEFAULT_USER_PHOTO);
    }

    #[tokio::test]
    async fn candidato_sem_foto_da_400() {
        let (app, _pool) = test_app().await;

        let boundary = "AaB03x";
        let mut body = String::new();
        for (name, value) in [
            ("fName", "Joe"),
            ("lName", "Bloggs"),
            ("position", "1"),
            ("party", "1"),
        ] {
            body.push_str(&format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{boundary}--\r\n"));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/contestants")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn partido_sem_logo_fica_com_o_default() {
        let (app, pool) = test_app().await;

        let boundary = "AaB03x";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"partyName\"\r\n\r\nUnity Party\r\n--{boundary}--\r\n"
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/party")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let logo: String = sqlx::query_scalar("SELECT logo FROM parties WHERE name = 'Unity Party'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(logo, upload_service::DEFAULT_PARTY_LOGO);
    }

    #[tokio::test]
    async fn dashboard_sem_sessao_volta_ao_login() {
        let (app, _pool) = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/dashboard")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        // Renderiza a página de login com mensagem de erro, não redireciona
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Login failed! Please try again."));
    }

    #[tokio::test]
    async fn rotas_nao_implementadas_rendem_o_template_404() {
        let (app, _pool) = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/vote-list")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("not available yet"));
    }
}
