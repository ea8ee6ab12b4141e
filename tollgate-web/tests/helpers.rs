//! Integration test helpers: a real server on a random port and a client that
//! keeps the session cookie between requests

#![allow(dead_code)]

use serde_json::json;
use std::sync::{Arc, LazyLock};
use tokio::net::TcpListener;
use tollgate_core::{TimeSource, TollgateConfig};
use tollgate_web::AppState;

pub const ADMIN_EMAIL: &str = "admin@tollgate.local";
pub const ADMIN_PASSWORD: &str = "admin-secret";

// Tracing is initialized once per test binary
static TRACING: LazyLock<()> = LazyLock::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(std::io::sink)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
});

pub fn test_config() -> TollgateConfig {
    let mut config = TollgateConfig::default();
    config.security.hash_iterations = 10;
    config.bootstrap.admin_email = ADMIN_EMAIL.to_string();
    config.bootstrap.admin_password = ADMIN_PASSWORD.to_string();
    config
}

pub fn test_state(clock: Option<Arc<dyn TimeSource>>) -> AppState {
    LazyLock::force(&TRACING);
    match clock {
        Some(clock) => AppState::with_clock(test_config(), clock).unwrap(),
        None => AppState::new(test_config()).unwrap(),
    }
}

/// Running test application
pub struct TestApp {
    pub address: String,
    pub state: AppState,
}

impl TestApp {
    /// A client with its own cookie jar, i.e. one browser
    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .unwrap()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn login(
        &self,
        client: &reqwest::Client,
        user: &str,
        password: &str,
    ) -> reqwest::Response {
        client
            .post(self.url("/auth"))
            .json(&json!({ "user": user, "password": password }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn status(&self, client: &reqwest::Client) -> serde_json::Value {
        client
            .get(self.url("/auth"))
            .send()
            .await
            .expect("Failed to execute request.")
            .json()
            .await
            .unwrap()
    }

    pub async fn logout(&self, client: &reqwest::Client) -> reqwest::Response {
        client
            .delete(self.url("/auth"))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, client: &reqwest::Client, path: &str) -> reqwest::Response {
        client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn create_user(
        &self,
        client: &reqwest::Client,
        email: &str,
        password: &str,
        role: &str,
    ) -> reqwest::Response {
        client
            .post(self.url(&format!("/users/{}", email)))
            .json(&json!({
                "name": "Test",
                "surname": "User",
                "password": password,
                "role": role,
            }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Logged in administrator client
    pub async fn admin(&self) -> reqwest::Client {
        let client = self.client();
        let response = self.login(&client, ADMIN_EMAIL, ADMIN_PASSWORD).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        client
    }
}

pub async fn spawn_app() -> TestApp {
    let state = test_state(None);
    let app = tollgate_web::create_app(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        state,
    }
}
