//! Shared harness: runs the server on an ephemeral port over an in-memory
//! store, and opens the PostgreSQL test pool when `DATABASE_URL` is set.

#![allow(dead_code, missing_docs)]

use std::sync::Once;

use folio_desk::api;
use folio_desk::app_state::AppState;
use folio_desk::client::PortfolioClient;
use folio_desk::config::AppConfig;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn,folio_desk=debug".into());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Pool over `DATABASE_URL` with migrations applied, or `None` when the
/// variable is unset so PostgreSQL tests can skip on machines without one.
pub async fn get_test_pool() -> Option<PgPool> {
    setup_tracing();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping PostgreSQL test");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB. Is Postgres running?");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

pub struct TestApp {
    pub base_url: String,
    pub client: PortfolioClient,
    pub http: reqwest::Client,
    pub state: AppState,
    pub config: AppConfig,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_config(AppConfig::for_tests()).await
    }

    pub async fn spawn_with_config(config: AppConfig) -> Self {
        setup_tracing();
        let state = AppState::in_memory(&config);
        let app = api::build_app(state.clone(), &config);

        let listener = tokio::net::TcpListener::bind(config.listen_addr)
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let base_url = format!("http://{addr}");
        let mut client = PortfolioClient::new(base_url.clone()).unwrap();
        if let Some(token) = &config.admin_token {
            client = client.with_admin_token(token.clone());
        }

        Self {
            base_url,
            client,
            http: reqwest::Client::new(),
            state,
            config,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

pub fn jane_doe() -> folio_desk::api::dto::SubmitMessageRequest {
    folio_desk::api::dto::SubmitMessageRequest {
        name: "Jane Doe".to_string(),
        email: "jane@x.com".to_string(),
        subject: "Hi".to_string(),
        message: "Test".to_string(),
        availability_preference: Some("morning".to_string()),
    }
}
