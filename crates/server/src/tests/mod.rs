// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod args_tests;
mod auth_gate_tests;
mod upload_tests;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use earthen_api::{
    AuthProvider, Credentials, CredentialsProvider, DocxConverter, Identity, SessionService,
    UploadPolicy,
};
use earthen_persistence::Persistence;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::{AppState, build_router};

pub const TEST_LOGIN: &str = "potter";
pub const TEST_PASSWORD: &str = "Glaze&Kiln2026";

/// Helper to create test app state with in-memory persistence and one operator.
pub fn create_test_app_state() -> AppState {
    create_test_app_state_with_uploads(UploadPolicy::default())
}

pub fn create_test_app_state_with_uploads(uploads: UploadPolicy) -> AppState {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    persistence
        .create_operator(TEST_LOGIN, "Studio Potter", TEST_PASSWORD)
        .expect("Failed to create operator");

    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        sessions: SessionService::default(),
        auth_provider: Arc::new(CredentialsProvider),
        uploads: Arc::new(uploads),
        converter: Arc::new(DocxConverter::new().expect("Failed to build converter")),
    }
}

/// Opens a session for the test operator and returns its token.
pub async fn open_session(app_state: &AppState, sessions: SessionService) -> String {
    let mut persistence = app_state.persistence.lock().await;
    let credentials: Credentials = Credentials {
        login_name: String::from(TEST_LOGIN),
        password: String::from(TEST_PASSWORD),
    };
    let identity: Identity = CredentialsProvider
        .verify(&mut persistence, &credentials)
        .unwrap()
        .expect("Test operator should verify");
    sessions.create(&mut persistence, &identity).unwrap().token
}

pub fn encode_form(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(name, value)| format!("{name}={}", urlencoding::encode(value)))
        .collect::<Vec<String>>()
        .join("&")
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn form_request(uri: &str, token: Option<&str>, pairs: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(encode_form(pairs))).unwrap()
}

/// One part of a multipart body.
pub struct Part<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub bytes: &'a [u8],
}

const BOUNDARY: &str = "earthen-test-boundary";

pub fn multipart_request(uri: &str, token: Option<&str>, parts: &[Part<'_>]) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let mut disposition: String = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(filename) = part.filename {
            disposition.push_str(&format!("; filename=\"{filename}\""));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder().method("POST").uri(uri).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

pub async fn send(app_state: &AppState, request: Request<Body>) -> Response<Body> {
    let app: Router = build_router(app_state.clone());
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body_bytes.to_vec()).unwrap()
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
