#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use config_engine::Settings;
use hospital_server::{create_app, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

pub fn app() -> Router {
    app_with(Settings::default())
}

pub fn app_with(settings: Settings) -> Router {
    create_app(AppState::in_memory(settings))
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// A signed-up user: bearer token and id
pub struct Account {
    pub token: String,
    pub id: String,
}

pub async fn signup(app: &Router, name: &str, role: &str) -> Account {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({
            "name": name,
            "email": format!("{}@hospital.test", name.to_lowercase()),
            "password": "secret123",
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");

    Account {
        token: body["token"].as_str().unwrap().to_string(),
        id: body["user"]["id"].as_str().unwrap().to_string(),
    }
}
