use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use jokes_api::{build_router, AppState, Readiness};
use jokes_core::domain::{Joke, JokeView, Like, User};
use jokes_core::error::DomainError;
use jokes_core::repositories::{JokeRepository, LikeRepository, UserRepository};
use jokes_security::{StaticJwksSource, TokenVerifier};
use jokes_shared::config::HttpSettings;

const KEY_ID: &str = "api-test-key";
const SECRET: &[u8] = b"jokes-api-test-signing-secret-0123456789";
const ISSUER: &str = "https://jokes.test.auth0.com/";
const AUDIENCE: &str = "https://jokes.api";

#[derive(Default)]
struct Store {
    users: Vec<User>,
    jokes: Vec<Joke>,
    likes: HashSet<Like>,
}

#[derive(Clone, Default)]
struct MemoryStore(Arc<Mutex<Store>>);

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &User) -> Result<User, DomainError> {
        self.0.lock().unwrap().users.push(user.clone());
        Ok(user.clone())
    }

    async fn find_ids_by_subject(&self, openid_sub: &str) -> Result<Vec<Uuid>, DomainError> {
        let store = self.0.lock().unwrap();
        Ok(store
            .users
            .iter()
            .filter(|user| user.openid_sub == openid_sub)
            .map(|user| user.id)
            .collect())
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        let mut store = self.0.lock().unwrap();
        let authored: HashSet<Uuid> = store
            .jokes
            .iter()
            .filter(|joke| joke.author_id == *id)
            .map(|joke| joke.id)
            .collect();
        store
            .likes
            .retain(|like| like.user_id != *id && !authored.contains(&like.joke_id));
        store.jokes.retain(|joke| joke.author_id != *id);
        let before = store.users.len();
        store.users.retain(|user| user.id != *id);
        Ok(store.users.len() < before)
    }
}

#[async_trait]
impl JokeRepository for MemoryStore {
    async fn create(&self, joke: &Joke) -> Result<Joke, DomainError> {
        self.0.lock().unwrap().jokes.push(joke.clone());
        Ok(joke.clone())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Joke>, DomainError> {
        let store = self.0.lock().unwrap();
        Ok(store.jokes.iter().find(|joke| joke.id == *id).cloned())
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        let mut store = self.0.lock().unwrap();
        store.likes.retain(|like| like.joke_id != *id);
        let before = store.jokes.len();
        store.jokes.retain(|joke| joke.id != *id);
        Ok(store.jokes.len() < before)
    }

    async fn list_for_viewer(&self, viewer_id: &Uuid) -> Result<Vec<JokeView>, DomainError> {
        let store = self.0.lock().unwrap();
        Ok(store
            .jokes
            .iter()
            .map(|joke| JokeView {
                id: joke.id,
                joke: joke.joke.clone(),
                created: joke.created,
                author: store
                    .users
                    .iter()
                    .find(|user| user.id == joke.author_id)
                    .map(|user| user.username.clone())
                    .unwrap_or_default(),
                likes: store.likes.iter().filter(|like| like.joke_id == joke.id).count() as i64,
                liked: store.likes.contains(&Like::new(*viewer_id, joke.id)),
            })
            .collect())
    }
}

#[async_trait]
impl LikeRepository for MemoryStore {
    async fn insert(&self, like: &Like) -> Result<bool, DomainError> {
        Ok(self.0.lock().unwrap().likes.insert(*like))
    }

    async fn delete(&self, like: &Like) -> Result<bool, DomainError> {
        Ok(self.0.lock().unwrap().likes.remove(like))
    }
}

struct FixedReadiness(bool);

#[async_trait]
impl Readiness for FixedReadiness {
    async fn check(&self) -> Result<(), String> {
        if self.0 {
            Ok(())
        } else {
            Err("database unreachable".to_string())
        }
    }
}

fn app_with(store: MemoryStore, ready: bool) -> Router {
    let jwks = json!({
        "keys": [{ "kty": "oct", "kid": KEY_ID, "alg": "HS256", "k": URL_SAFE_NO_PAD.encode(SECRET) }]
    });
    let keys = StaticJwksSource::from_json(&jwks.to_string()).unwrap();
    let verifier = TokenVerifier::new(
        Arc::new(keys),
        ISSUER.to_string(),
        AUDIENCE.to_string(),
        Algorithm::HS256,
    );
    let state = AppState::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store),
        Arc::new(verifier),
        Arc::new(FixedReadiness(ready)),
    );
    let http = HttpSettings {
        allowed_origins: vec!["*".to_string()],
        static_dir: None,
    };
    build_router(state, &http)
}

fn app() -> Router {
    app_with(MemoryStore::default(), true)
}

fn token_for(subject: &str, audience: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = json!({
        "sub": subject,
        "iss": ISSUER,
        "aud": audience,
        "iat": now,
        "exp": now + 600,
    });
    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some(KEY_ID.to_string());
    encode(&header, &claims, &EncodingKey::from_secret(SECRET)).unwrap()
}

fn token(subject: &str) -> String {
    token_for(subject, AUDIENCE)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<&str>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn register(app: &Router, subject: &str, username: &str) -> Value {
    let body = json!({ "username": username }).to_string();
    let (status, bytes) = send(app, Method::POST, "/api/user", Some(&token(subject)), Some(&body)).await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_slice(&bytes).unwrap()
}

async fn new_joke(app: &Router, subject: &str, text: &str) -> String {
    let body = json!({ "joke": text }).to_string();
    let (status, bytes) =
        send(app, Method::POST, "/api/jokes/new", Some(&token(subject)), Some(&body)).await;
    assert_eq!(status, StatusCode::CREATED);
    let joke: Value = serde_json::from_slice(&bytes).unwrap();
    joke["id"].as_str().unwrap().to_string()
}

async fn list(app: &Router, subject: &str) -> Vec<Value> {
    let (status, bytes) = send(app, Method::GET, "/api/jokes", Some(&token(subject)), None).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_ping_and_health_are_public() {
    let app = app();

    let (status, bytes) = send(&app, Method::GET, "/api/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "pong");

    let (status, _) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, "/health/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_reports_store_failure() {
    let app = app_with(MemoryStore::default(), false);
    let (status, _) = send(&app, Method::GET, "/health/ready", None, None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_missing_or_invalid_token_is_unauthorized() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/jokes", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(String::from_utf8(body).unwrap(), "Unauthorized");

    let wrong_audience = token_for("auth0|alice", "https://other.api");
    let (status, _) = send(&app, Method::GET, "/api/jokes", Some(&wrong_audience), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::POST, "/api/user", Some("garbage"), Some("{}")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_registration_then_resolution() {
    let app = app();

    // Not registered yet
    let (status, _) = send(&app, Method::GET, "/api/jokes", Some(&token("auth0|alice")), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let user = register(&app, "auth0|alice", "alice").await;
    assert_eq!(user["username"], "alice");
    assert!(user.get("openid_sub").is_none());
    assert!(Uuid::parse_str(user["id"].as_str().unwrap()).is_ok());

    let (status, _) = send(&app, Method::GET, "/api/jokes", Some(&token("auth0|alice")), None).await;
    assert_eq!(status, StatusCode::OK);

    let body = json!({ "username": "alice again" }).to_string();
    let (status, _) =
        send(&app, Method::POST, "/api/user", Some(&token("auth0|alice")), Some(&body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_malformed_bodies_are_bad_requests() {
    let app = app();
    let alice = token("auth0|alice");

    let (status, _) = send(&app, Method::POST, "/api/user", Some(&alice), Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, "/api/user", Some(&alice), Some(r#"{"username": ""}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    register(&app, "auth0|alice", "alice").await;
    let (status, _) = send(&app, Method::POST, "/api/jokes/new", Some(&alice), Some(r#"{"text": "hi"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_length_limits_apply_after_trimming() {
    let app = app();

    let username = "a".repeat(64);
    let user = register(&app, "auth0|alice", &format!("  {}  ", username)).await;
    assert_eq!(user["username"], username.as_str());

    let text = "x".repeat(1000);
    let body = json!({ "joke": format!("{}\n", text) }).to_string();
    let (status, bytes) =
        send(&app, Method::POST, "/api/jokes/new", Some(&token("auth0|alice")), Some(&body)).await;
    assert_eq!(status, StatusCode::CREATED);
    let joke: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(joke["joke"], text.as_str());

    // One past the limit once trimmed
    let body = json!({ "username": format!(" {} ", "b".repeat(65)) }).to_string();
    let (status, _) =
        send(&app, Method::POST, "/api/user", Some(&token("auth0|bob")), Some(&body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body = json!({ "joke": "y".repeat(1001) }).to_string();
    let (status, _) =
        send(&app, Method::POST, "/api/jokes/new", Some(&token("auth0|alice")), Some(&body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_like_flow_per_viewer() {
    let app = app();
    register(&app, "auth0|alice", "alice").await;
    register(&app, "auth0|bob", "bob").await;
    let alice = token("auth0|alice");

    let joke_id = new_joke(&app, "auth0|alice", "why did the chicken cross the road?").await;

    for subject in ["auth0|alice", "auth0|bob"] {
        let jokes = list(&app, subject).await;
        assert_eq!(jokes.len(), 1);
        assert_eq!(jokes[0]["id"], joke_id.as_str());
        assert_eq!(jokes[0]["joke"], "why did the chicken cross the road?");
        assert_eq!(jokes[0]["author"], "alice");
        assert_eq!(jokes[0]["likes"], 0);
        assert_eq!(jokes[0]["liked"], false);
        assert!(jokes[0].get("created").is_some());
    }

    let like_uri = format!("/api/jokes/like/{}", joke_id);
    let (status, _) = send(&app, Method::POST, &like_uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    // Liking twice keeps a single like
    let (status, _) = send(&app, Method::POST, &like_uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let as_alice = list(&app, "auth0|alice").await;
    assert_eq!(as_alice[0]["likes"], 1);
    assert_eq!(as_alice[0]["liked"], true);

    let as_bob = list(&app, "auth0|bob").await;
    assert_eq!(as_bob[0]["likes"], 1);
    assert_eq!(as_bob[0]["liked"], false);

    let unlike_uri = format!("/api/jokes/unlike/{}", joke_id);
    let (status, _) = send(&app, Method::POST, &unlike_uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let as_alice = list(&app, "auth0|alice").await;
    assert_eq!(as_alice[0]["likes"], 0);
    assert_eq!(as_alice[0]["liked"], false);
}

#[tokio::test]
async fn test_unknown_joke_ids_are_not_found() {
    let app = app();
    register(&app, "auth0|alice", "alice").await;
    let alice = token("auth0|alice");

    let missing = Uuid::new_v4();
    for (method, uri) in [
        (Method::DELETE, format!("/api/jokes/{}", missing)),
        (Method::POST, format!("/api/jokes/like/{}", missing)),
        (Method::POST, format!("/api/jokes/unlike/{}", missing)),
        (Method::DELETE, "/api/jokes/42".to_string()),
        (Method::POST, "/api/jokes/like/not-a-uuid".to_string()),
    ] {
        let (status, _) = send(&app, method, &uri, Some(&alice), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[tokio::test]
async fn test_only_author_deletes_joke() {
    let app = app();
    register(&app, "auth0|alice", "alice").await;
    register(&app, "auth0|bob", "bob").await;

    let joke_id = new_joke(&app, "auth0|alice", "knock knock").await;
    let uri = format!("/api/jokes/{}", joke_id);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token("auth0|bob")), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(list(&app, "auth0|bob").await.len(), 1);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token("auth0|alice")), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(list(&app, "auth0|bob").await.is_empty());
}

#[tokio::test]
async fn test_deleting_user_removes_their_jokes_and_likes() {
    let store = MemoryStore::default();
    let app = app_with(store.clone(), true);
    register(&app, "auth0|alice", "alice").await;
    register(&app, "auth0|bob", "bob").await;

    let alice_joke = new_joke(&app, "auth0|alice", "alice's joke").await;
    let bob_joke = new_joke(&app, "auth0|bob", "bob's joke").await;
    let alice = token("auth0|alice");
    let bob = token("auth0|bob");
    send(&app, Method::POST, &format!("/api/jokes/like/{}", bob_joke), Some(&alice), None).await;
    send(&app, Method::POST, &format!("/api/jokes/like/{}", alice_joke), Some(&bob), None).await;

    let (status, _) = send(&app, Method::DELETE, "/api/user", Some(&alice), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let remaining = list(&app, "auth0|bob").await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["id"], bob_joke.as_str());
    assert_eq!(remaining[0]["likes"], 0);
    assert!(store.0.lock().unwrap().likes.is_empty());

    // The subject no longer resolves
    let (status, _) = send(&app, Method::GET, "/api/jokes", Some(&alice), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
