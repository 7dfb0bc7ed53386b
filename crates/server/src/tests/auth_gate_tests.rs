// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request, StatusCode, header},
};
use earthen_api::SessionService;
use serde_json::Value;

use super::{
    TEST_LOGIN, TEST_PASSWORD, body_json, body_text, create_test_app_state, form_request,
    get_request, location, open_session, send,
};
use crate::AppState;
use crate::session::{safe_callback, session_token};

#[tokio::test]
async fn test_dashboard_without_session_redirects_to_sign_in() {
    let app_state: AppState = create_test_app_state();

    let response = send(&app_state, get_request("/dashboard", None)).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/auth/signin?callbackUrl=%2Fdashboard");
}

#[tokio::test]
async fn test_action_without_session_redirects_and_writes_nothing() {
    let app_state: AppState = create_test_app_state();

    let response = send(
        &app_state,
        form_request(
            "/dashboard/faqs/add",
            None,
            &[("question", "Is it food safe?"), ("answer", "Yes.")],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        location(&response),
        "/auth/signin?callbackUrl=%2Fdashboard%2Ffaqs%2Fadd"
    );
    assert!(app_state.persistence.lock().await.list_faqs().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_token_redirects() {
    let app_state: AppState = create_test_app_state();

    let response = send(&app_state, get_request("/dashboard", Some("session_bogus"))).await;

    assert_eq!(response.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_expired_session_redirects() {
    let app_state: AppState = create_test_app_state();
    let token: String = open_session(&app_state, SessionService::new(time::Duration::seconds(-60))).await;

    let response = send(&app_state, get_request("/dashboard", Some(&token))).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/auth/signin?callbackUrl=%2Fdashboard");
}

#[tokio::test]
async fn test_valid_bearer_session_passes() {
    let app_state: AppState = create_test_app_state();
    let token: String = open_session(&app_state, SessionService::default()).await;

    let response = send(&app_state, get_request("/dashboard", Some(&token))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = body_json(response).await;
    assert_eq!(body["identity"]["login_name"], "POTTER");
    assert_eq!(body["identity"]["display_name"], "Studio Potter");
    assert!(body["workshops"].as_array().unwrap().is_empty());
    assert!(body["expires_at"].as_str().is_some());
}

#[tokio::test]
async fn test_valid_cookie_session_passes() {
    let app_state: AppState = create_test_app_state();
    let token: String = open_session(&app_state, SessionService::default()).await;

    let request: Request<Body> = Request::builder()
        .method("GET")
        .uri("/dashboard")
        .header(header::COOKIE, format!("theme=dark; earthen_session={token}"))
        .body(Body::empty())
        .unwrap();
    let response = send(&app_state, request).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_sign_in_sets_cookie_and_follows_callback() {
    let app_state: AppState = create_test_app_state();

    let response = send(
        &app_state,
        form_request(
            "/auth/signin",
            None,
            &[
                ("login_name", TEST_LOGIN),
                ("password", TEST_PASSWORD),
                ("callbackUrl", "/dashboard/faqs"),
            ],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/dashboard/faqs");
    let cookie: String = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("earthen_session=session_"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age=28800"));

    let session_pair: &str = cookie.split(';').next().unwrap();
    let request: Request<Body> = Request::builder()
        .method("GET")
        .uri("/dashboard")
        .header(header::COOKIE, session_pair)
        .body(Body::empty())
        .unwrap();
    let dashboard = send(&app_state, request).await;
    assert_eq!(dashboard.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_sign_in_ignores_offsite_callback() {
    let app_state: AppState = create_test_app_state();

    let response = send(
        &app_state,
        form_request(
            "/auth/signin",
            None,
            &[
                ("login_name", TEST_LOGIN),
                ("password", TEST_PASSWORD),
                ("callbackUrl", "//evil.example/steal"),
            ],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_sign_in_ignores_callback_with_embedded_tab() {
    let app_state: AppState = create_test_app_state();

    let response = send(
        &app_state,
        form_request(
            "/auth/signin",
            None,
            &[
                ("login_name", TEST_LOGIN),
                ("password", TEST_PASSWORD),
                ("callbackUrl", "/\t/evil.example/phish"),
            ],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_sign_in_with_wrong_password_is_rejected() {
    let app_state: AppState = create_test_app_state();

    let response = send(
        &app_state,
        form_request(
            "/auth/signin",
            None,
            &[("login_name", TEST_LOGIN), ("password", "not-the-password")],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let body: Value = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Invalid login name or password"));
}

#[tokio::test]
async fn test_sign_out_ends_session() {
    let app_state: AppState = create_test_app_state();
    let token: String = open_session(&app_state, SessionService::default()).await;

    let response = send(&app_state, form_request("/auth/signout", Some(&token), &[])).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");
    let cookie: &str = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cookie.contains("Max-Age=0"));

    let after = send(&app_state, get_request("/dashboard", Some(&token))).await;
    assert_eq!(after.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_sign_in_page_escapes_callback() {
    let app_state: AppState = create_test_app_state();

    let response = send(
        &app_state,
        get_request("/auth/signin?callbackUrl=%2Fdashboard%3Fa%3D1%26b%3D%22x", None),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let page: String = body_text(response).await;
    assert!(page.contains(r#"value="/dashboard?a=1&amp;b=&quot;x""#));
    assert!(page.contains(r#"action="/auth/signin""#));
}

#[tokio::test]
async fn test_public_routes_need_no_session() {
    let app_state: AppState = create_test_app_state();

    let response = send(&app_state, get_request("/api/home", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn test_bearer_token_wins_over_cookie() {
    let mut headers: HeaderMap = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
    headers.insert(header::COOKIE, HeaderValue::from_static("earthen_session=def"));

    assert_eq!(session_token(&headers), Some(String::from("abc")));

    headers.remove(header::AUTHORIZATION);
    assert_eq!(session_token(&headers), Some(String::from("def")));

    headers.insert(header::COOKIE, HeaderValue::from_static("earthen_session="));
    assert_eq!(session_token(&headers), None);
}

#[test]
fn test_safe_callback() {
    assert_eq!(safe_callback(Some("/dashboard/reviews")), "/dashboard/reviews");
    assert_eq!(safe_callback(Some("https://evil.example")), "/dashboard");
    assert_eq!(safe_callback(Some("//evil.example")), "/dashboard");
    assert_eq!(safe_callback(Some("/\\evil.example")), "/dashboard");
    assert_eq!(safe_callback(Some("/\t/evil.example")), "/dashboard");
    assert_eq!(safe_callback(Some("/\n/evil.example")), "/dashboard");
    assert_eq!(safe_callback(Some("/\r/evil.example")), "/dashboard");
    assert_eq!(safe_callback(Some("/dashboard/ faqs")), "/dashboard");
    assert_eq!(safe_callback(None), "/dashboard");
}
