use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use super::setup::TestApp;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestApp {
    /// Send a request through the full router and decode the JSON body
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn register(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            "POST",
            "/register",
            None,
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            "POST",
            "/login",
            None,
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    /// Register and log in, returning the issued token
    pub async fn signed_in(&self, username: &str, password: &str) -> String {
        let (status, _) = self.register(username, password).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = self.login(username, password).await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn get_user_data(&self, token: &str) -> (StatusCode, Value) {
        self.send("POST", "/getUserData", Some(token), None).await
    }

    pub async fn add_country(&self, token: &str, code: &str, country: &str) -> (StatusCode, Value) {
        self.send(
            "POST",
            "/addCountry",
            Some(token),
            Some(json!({ "code": code, "country": country })),
        )
        .await
    }

    pub async fn delete_country(&self, token: &str, id: i64) -> (StatusCode, Value) {
        self.send(
            "DELETE",
            "/deleteCountry",
            Some(token),
            Some(json!({ "countryIdToDelete": id })),
        )
        .await
    }
}
