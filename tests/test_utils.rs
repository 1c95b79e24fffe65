#![allow(dead_code)]

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use fan_store_backend::{
    db::sqlite::SqliteStore,
    middlewares::auth::AuthMiddleware,
    repositories::storage::Storage,
    routes::configure_routes,
    settings::{AppConfig, AppEnvironment, Deployment, StorageBackend},
    AppState,
};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use std::{net::TcpListener, sync::Arc, time::Duration};
use tracing_actix_web::TracingLogger;

pub const ADMIN_USERNAME: &str = "root";
pub const PASSWORD: &str = "Gx7#kPq2!vLm";
pub const PIXEL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

pub struct TestApp {
    pub state: web::Data<AppState>,
    pub store: Arc<dyn Storage>,
    pub address: String,
    pub client: Client,
    pub config: AppConfig,
}

impl TestApp {
    /// Cookie-session server over a private in-memory database.
    pub async fn spawn() -> Self {
        Self::spawn_with(test_config()).await
    }

    /// Same server with signed-token auth.
    pub async fn spawn_hosted() -> Self {
        Self::spawn_with(AppConfig {
            deployment: Deployment::Hosted,
            ..test_config()
        })
        .await
    }

    pub async fn spawn_with(config: AppConfig) -> Self {
        let store: Arc<dyn Storage> = Arc::new(SqliteStore::in_memory().await.expect("Failed to open test database"));
        let state = web::Data::new(AppState::from_store(store.clone(), None, &config));

        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let server_state = state.clone();
        let max_json_payload_bytes = config.max_json_payload_bytes;
        let server = HttpServer::new(move || {
            App::new()
                .app_data(server_state.clone())
                .wrap(AuthMiddleware)
                .wrap(NormalizePath::trim())
                .wrap(TracingLogger::default())
                .configure(|cfg| configure_routes(cfg, max_json_payload_bytes))
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .expect("Failed to listen")
        .run();

        tokio::spawn(server);

        let app = TestApp {
            state,
            store,
            address,
            client: new_client(),
            config,
        };
        app.wait_until_ready().await;
        app
    }

    async fn wait_until_ready(&self) {
        for _ in 0..50 {
            if let Ok(response) = self.client.get(self.url("/api/health")).send().await {
                if response.status() == StatusCode::OK {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!("Test server did not become ready");
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// A client with its own cookie jar, logged in as the configured admin.
    pub async fn admin_client(&self) -> Client {
        let client = new_client();
        let response = self.login(&client, ADMIN_USERNAME, PASSWORD).await;
        assert_eq!(response.status(), StatusCode::OK, "admin login failed");
        client
    }

    /// A client with its own cookie jar, registered and logged in as a new customer.
    pub async fn customer_client(&self, username: &str) -> (Client, Value) {
        let client = new_client();
        let response = self.register(&client, username).await;
        assert_eq!(response.status(), StatusCode::CREATED, "registration failed");
        let body: Value = response.json().await.unwrap();
        (client, body["user"].clone())
    }

    pub async fn register(&self, client: &Client, username: &str) -> Response {
        client
            .post(self.url("/api/auth/register"))
            .json(&json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "password": PASSWORD,
            }))
            .send()
            .await
            .expect("Failed to register")
    }

    pub async fn login(&self, client: &Client, username: &str, password: &str) -> Response {
        client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to log in")
    }

    pub async fn get(&self, client: &Client, path: &str) -> Response {
        client.get(self.url(path)).send().await.expect("GET failed")
    }

    pub async fn post(&self, client: &Client, path: &str, body: &Value) -> Response {
        client.post(self.url(path)).json(body).send().await.expect("POST failed")
    }

    pub async fn patch(&self, client: &Client, path: &str, body: &Value) -> Response {
        client.patch(self.url(path)).json(body).send().await.expect("PATCH failed")
    }

    pub async fn delete(&self, client: &Client, path: &str) -> Response {
        client.delete(self.url(path)).send().await.expect("DELETE failed")
    }

    /// GET that must succeed, returning the decoded body.
    pub async fn get_json(&self, client: &Client, path: &str) -> Value {
        let response = self.get(client, path).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {} failed", path);
        response.json().await.unwrap()
    }
}

pub fn new_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build HTTP client")
}

pub fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .expect("expected a JSON array")
        .iter()
        .filter_map(|item| item["id"].as_i64())
        .collect()
}

pub fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Fan Store Test".to_string(),
        port: 0,
        worker_count: 1,
        deployment: Deployment::Traditional,
        storage_backend: Some(StorageBackend::Sqlite),
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test_jwt_secret_that_is_long_enough_for_hs512_1234567890".to_string(),
        admin_username: Some(ADMIN_USERNAME.to_string()),
        admin_password: Some(PASSWORD.to_string()),
        ..AppConfig::default()
    }
}
