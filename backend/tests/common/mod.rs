//! Common test utilities for integration tests

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use fitcoach_backend::{config::AppConfig, routes, state::AppState};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub pool: PgPool,
}

impl TestApp {
    /// Create a new test application against a real database
    pub async fn new() -> Self {
        let config = test_config();
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&config.database.url)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(pool.clone(), config);
        let app = routes::create_router(state);

        Self { app, pool }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Make a GET request with a bearer token
    pub async fn get_authed(&self, path: &str, token: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Make a POST request with a JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Make a POST request with a JSON body and a bearer token
    pub async fn post_authed(&self, path: &str, body: &str, token: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Make a form-encoded POST request (login)
    pub async fn post_form(&self, path: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Make a PUT request with a JSON body and a bearer token
    pub async fn put_authed(&self, path: &str, body: &str, token: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("PUT")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Make a DELETE request with a bearer token
    pub async fn delete_authed(&self, path: &str, token: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("DELETE")
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Register a fresh user and return its access token
    pub async fn register_user(&self, email: &str) -> String {
        let body = serde_json::json!({
            "email": email,
            "password": "SecurePassword123!"
        });
        let (status, response) = self.post("/api/auth/register", &body.to_string()).await;
        assert_eq!(status, StatusCode::CREATED, "registration failed: {}", response);

        let response: serde_json::Value = serde_json::from_str(&response).unwrap();
        response["access_token"].as_str().unwrap().to_string()
    }

    /// Promote a user to admin directly in the database
    pub async fn make_admin(&self, email: &str) {
        sqlx::query("UPDATE users SET is_admin = TRUE WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await
            .expect("Failed to promote user");
    }
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    if let Ok(url) = std::env::var("TEST_DATABASE_URL") {
        config.database.url = url;
    }
    config
}
