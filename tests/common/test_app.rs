use reqwest::Client;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use crm_backend::{AppState, Config, routes};
use secrecy::ExposeSecret;

/// HTTP test application wrapper
///
/// Manages an Axum server running on a random port for HTTP testing.
/// Each test gets its own server instance to allow parallel test
/// execution.
pub struct TestApp {
    /// Server base URL (e.g., "http://127.0.0.1:54321")
    pub address: String,
    /// HTTP client for making requests
    pub client: Client,
    /// Application config the server was built with
    #[allow(dead_code)]
    pub config: Config,
}

impl TestApp {
    /// Create a test app whose pool is connected lazily.
    ///
    /// No database is touched until a handler actually runs a query, so
    /// suites that only exercise routing, authentication, and extractor
    /// validation run anywhere.
    pub async fn new() -> Self {
        let config = Config::default();

        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect_lazy(config.database.connection_string().expose_secret())
            .expect("Failed to build lazy pool");

        Self::spawn(config, pool).await
    }

    /// Create a test app backed by a real database with migrations
    /// applied. Used by the suites that require PostgreSQL.
    #[allow(dead_code)] // used by the DB-backed suite only
    pub async fn with_database() -> Self {
        let config = crm_backend::load_config().expect("Failed to load config");

        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect(config.database.connection_string().expose_secret())
            .await
            .expect("Failed to connect to database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Self::spawn(config, pool).await
    }

    async fn spawn(config: Config, pool: crm_backend::DbPool) -> Self {
        let app = routes::app(AppState::new(pool, config.clone()));

        // Bind to port 0 so the OS assigns a free port per test.
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{port}");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            address,
            client,
            config,
        }
    }

    /// Get the full URL for an API endpoint
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Generate a unique test email so reruns never collide.
    #[allow(dead_code)]
    pub fn unique_email(&self, prefix: &str) -> String {
        format!("{}_{}@example.com", prefix, uuid::Uuid::now_v7())
    }

    /// Register a user and return (user JSON, token).
    #[allow(dead_code)]
    pub async fn register_user(&self, email: &str) -> (serde_json::Value, String) {
        let response = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&serde_json::json!({
                "email": email,
                "password": "testpassword123",
                "firstName": "Test",
                "lastName": "User",
            }))
            .send()
            .await
            .expect("register request failed");
        assert_eq!(response.status(), 201, "registration should succeed");

        let body: serde_json::Value = response.json().await.unwrap();
        let token = body["token"].as_str().expect("token in response").to_string();
        (body["user"].clone(), token)
    }

    /// Create a client record and return its JSON.
    #[allow(dead_code)]
    pub async fn create_client(&self, token: &str, name: &str) -> serde_json::Value {
        let response = self
            .client
            .post(self.url("/api/clients"))
            .bearer_auth(token)
            .json(&serde_json::json!({
                "name": name,
                "email": format!("{}@clients.example.com", uuid::Uuid::now_v7()),
                "phone": "+1-555-0100",
            }))
            .send()
            .await
            .expect("create client request failed");
        assert_eq!(response.status(), 201, "client creation should succeed");

        let body: serde_json::Value = response.json().await.unwrap();
        body["client"].clone()
    }
}
