#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordHasher;
use auth::SigningSecret;
use auth::TokenCodec;
use chirpy::chirp::errors::ChirpError;
use chirpy::chirp::models::Chirp;
use chirpy::chirp::models::ChirpId;
use chirpy::chirp::ports::ChirpRepository;
use chirpy::chirp::service::ChirpService;
use chirpy::config::Platform;
use chirpy::inbound::http::create_router;
use chirpy::inbound::http::AppState;
use chirpy::user::errors::UserError;
use chirpy::user::models::EmailAddress;
use chirpy::user::models::User;
use chirpy::user::models::UserId;
use chirpy::user::ports::UserRepository;
use chirpy::user::service::UserService;
use serde_json::json;
use serde_json::Value;

pub mod postgres;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const STATIC_INDEX: &str = "<html><body>Welcome to Chirpy</body></html>";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub token_codec: TokenCodec,
    pub static_root: PathBuf,
}

impl TestApp {
    /// Spawn the application on the dev platform
    pub async fn spawn() -> Self {
        Self::spawn_on(Platform::Dev).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_on(platform: Platform) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let static_root =
            std::env::temp_dir().join(format!("chirpy-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&static_root).expect("Failed to create static root");
        std::fs::write(static_root.join("index.html"), STATIC_INDEX)
            .expect("Failed to write index.html");

        let secret = SigningSecret::new(TEST_SECRET).unwrap();
        let authenticator = Arc::new(
            Authenticator::new(&secret).with_password_hasher(PasswordHasher::with_cost(4)),
        );

        let user_repository = Arc::new(InMemoryUserRepository::default());
        let chirp_repository = Arc::new(InMemoryChirpRepository::new(user_repository.clone()));

        let user_service = Arc::new(UserService::new(
            user_repository,
            *authenticator.password_hasher(),
        ));
        let chirp_service = Arc::new(ChirpService::new(chirp_repository));

        let state = AppState::new(user_service, chirp_service, authenticator, platform);
        let router = create_router(state, static_root.to_str().unwrap());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            token_codec: TokenCodec::new(&secret),
            static_root,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register a user and return the response body
    pub async fn create_user(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/users")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log a user in and return the access token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"].as_str().unwrap().to_string()
    }

    /// Register a user, log in and return (user id, access token)
    pub async fn signed_in_user(&self, email: &str) -> (String, String) {
        let created = self.create_user(email, "04234").await;
        let user_id = created["data"]["id"].as_str().unwrap().to_string();
        let token = self.login(email, "04234").await;
        (user_id, token)
    }

    /// Post a chirp and return the response body
    pub async fn create_chirp(&self, token: &str, body: &str) -> Value {
        let response = self
            .post_authenticated("/api/chirps", token)
            .json(&json!({ "body": body }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.static_root);
    }
}

/// User store backed by a vector, enforcing unique emails
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    fn exists(&self, id: &UserId) -> bool {
        self.users.lock().unwrap().iter().any(|user| user.id == *id)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|user| user.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|user| user.email == *email).cloned())
    }

    async fn delete_all(&self) -> Result<u64, UserError> {
        let mut users = self.users.lock().unwrap();
        let removed = users.len() as u64;
        users.clear();
        Ok(removed)
    }
}

/// Chirp store that mirrors the foreign key and cascade of the users table
pub struct InMemoryChirpRepository {
    users: Arc<InMemoryUserRepository>,
    chirps: Mutex<Vec<Chirp>>,
}

impl InMemoryChirpRepository {
    pub fn new(users: Arc<InMemoryUserRepository>) -> Self {
        Self {
            users,
            chirps: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChirpRepository for InMemoryChirpRepository {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError> {
        if !self.users.exists(&chirp.user_id) {
            return Err(ChirpError::AuthorNotFound(chirp.user_id.to_string()));
        }
        self.chirps.lock().unwrap().push(chirp.clone());
        Ok(chirp)
    }

    async fn list_all(&self) -> Result<Vec<Chirp>, ChirpError> {
        let chirps = self.chirps.lock().unwrap();
        Ok(chirps
            .iter()
            .filter(|chirp| self.users.exists(&chirp.user_id))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError> {
        let chirps = self.chirps.lock().unwrap();
        Ok(chirps
            .iter()
            .find(|chirp| chirp.id == *id && self.users.exists(&chirp.user_id))
            .cloned())
    }
}
