// tests/common/mod.rs

#![allow(dead_code)]

use std::sync::Arc;

use study_backend::{config::Config, repository::InMemoryUserRepository, routes, state::AppState};

pub const PASSWORD: &str = "password123";

pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600, // 10 minutes for tests
        rust_log: "error".to_string(),
        port: 0,
        memory_store: true,
        admin_email: None,
        admin_password: None,
    }
}

/// Spawns the app on a random port backed by `store`.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
pub async fn spawn_app_with(store: InMemoryUserRepository) -> String {
    let state = AppState::new(Arc::new(store), test_config());
    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

pub async fn spawn_app() -> String {
    spawn_app_with(InMemoryUserRepository::new()).await
}

pub fn unique_email() -> String {
    format!("u_{}@example.com", &uuid::Uuid::new_v4().to_string()[..8])
}

/// Registers a fresh account and returns `(email, token)`.
pub async fn register_and_login(client: &reqwest::Client, address: &str) -> (String, String) {
    let email = unique_email();

    let response = client
        .post(format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "name": "Test Student",
            "email": email,
            "password": PASSWORD
        }))
        .send()
        .await
        .expect("Register failed");
    assert_eq!(response.status().as_u16(), 201);

    let token = login(client, address, &email).await;
    (email, token)
}

pub async fn login(client: &reqwest::Client, address: &str, email: &str) -> String {
    let login_resp = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({ "email": email, "password": PASSWORD }))
        .send()
        .await
        .expect("Login failed")
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse login json");

    login_resp["token"]
        .as_str()
        .expect("Token not found")
        .to_string()
}
