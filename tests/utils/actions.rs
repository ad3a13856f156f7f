use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use super::setup::TestSetup;

/// Status and decoded JSON body of one API call
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Send a request through the router and decode the JSON response
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    pub async fn create_room(&self, password: &str) -> TestResponse {
        self.post("/api/rooms/create", json!({ "password": password }))
            .await
    }

    /// Create a room and return its id, asserting success
    pub async fn create_room_id(&self, password: &str) -> String {
        let response = self.create_room(password).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.body["room_id"].as_str().unwrap().to_string()
    }

    pub async fn login(&self, room_id: &str, password: &str) -> TestResponse {
        self.post(
            "/api/rooms/login",
            json!({ "room_id": room_id, "password": password }),
        )
        .await
    }

    pub async fn get_clipboard(&self, room_id: &str) -> TestResponse {
        self.get(&format!("/api/rooms/{room_id}/clipboard")).await
    }

    pub async fn save_clipboard(&self, room_id: &str, text: &str) -> TestResponse {
        self.post(
            "/api/rooms/clipboard/save",
            json!({ "room_id": room_id, "text": text }),
        )
        .await
    }

    pub async fn clear_clipboard(&self, room_id: &str) -> TestResponse {
        self.post("/api/rooms/clipboard/clear", json!({ "room_id": room_id }))
            .await
    }
}
