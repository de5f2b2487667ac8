//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use codebound_core::repository::SaveRepository;
use codebound_core::rng::RngSource;
use codebound_test_support::{InMemorySaveRepository, ScriptedRngSource, SequenceRng, fixed_clock};
use http_body_util::BodyExt;
use tower::ServiceExt;

use codebound_api::state::AppState;

/// A router plus handles on its fakes. Cloning the router shares state, so
/// one `TestApp` behaves like one running server.
pub struct TestApp {
    pub router: Router,
    pub saves: Arc<InMemorySaveRepository>,
}

/// Build the full app with an in-memory save store and deterministic
/// clock. No user has scripted randomness.
pub fn build_test_app() -> TestApp {
    build_test_app_with_rng(ScriptedRngSource::new())
}

/// Build the full app with `rng` as `user`'s random stream, for tests that
/// need deterministic exploration or combat.
pub fn build_test_app_scripted(user: &str, rng: SequenceRng) -> TestApp {
    build_test_app_with_rng(ScriptedRngSource::new().with_user(user, rng))
}

/// Build the full app over the given per-user random streams.
pub fn build_test_app_with_rng(rng_source: ScriptedRngSource) -> TestApp {
    let saves = Arc::new(InMemorySaveRepository::new());
    let router = build_router(
        Arc::clone(&saves) as Arc<dyn SaveRepository>,
        Arc::new(rng_source),
    );
    TestApp { router, saves }
}

/// Build the full app over any save repository.
pub fn build_router(saves: Arc<dyn SaveRepository>, rng_source: Arc<dyn RngSource>) -> Router {
    let app_state = AppState::new(Arc::new(fixed_clock()), rng_source, saves).unwrap();
    codebound_api::app(app_state)
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

impl TestApp {
    /// Send a GET request as `user` and return the response.
    pub async fn get_json(&self, user: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header("x-user-id", user)
            .body(Body::empty())
            .unwrap();
        send(&self.router, request).await
    }

    /// Send a POST request with a JSON body as `user` and return the response.
    pub async fn post_json(
        &self,
        user: &str,
        uri: &str,
        body: &serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("x-user-id", user)
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap();
        send(&self.router, request).await
    }

    /// Send a GET request without any user header.
    pub async fn get_anonymous(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        send(&self.router, request).await
    }

    /// Dispatch an action as `user`.
    pub async fn act(&self, user: &str, action: &str, target: &str) -> serde_json::Value {
        let (status, json) = self
            .post_json(
                user,
                "/api/action",
                &serde_json::json!({ "action": action, "target": target }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        json
    }
}
