// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::http::StatusCode;
use earthen_api::{ImageStorage, SessionService, UploadPolicy};
use serde_json::Value;

use super::{
    Part, body_json, create_test_app_state, create_test_app_state_with_uploads,
    multipart_request, open_session, send,
};
use crate::{AppState, MULTIPART_OVERHEAD_BYTES};

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn image_part(content_type: &'static str, bytes: &'static [u8]) -> Part<'static> {
    Part {
        name: "image",
        filename: Some("vase.png"),
        content_type: Some(content_type),
        bytes,
    }
}

#[tokio::test]
async fn test_inline_upload_returns_data_url() {
    let app_state: AppState = create_test_app_state();
    let token: String = open_session(&app_state, SessionService::default()).await;

    let response = send(
        &app_state,
        multipart_request("/dashboard/upload", Some(&token), &[image_part("image/png", PNG_BYTES)]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["type"], "image/png");
    assert_eq!(body["filename"], "vase.png");
    assert_eq!(body["url"], "data:image/png;base64,iVBORw0KGgo=");
}

#[tokio::test]
async fn test_filesystem_upload_writes_file() {
    let dir: tempfile::TempDir = tempfile::tempdir().unwrap();
    let app_state: AppState = create_test_app_state_with_uploads(UploadPolicy {
        max_bytes: 1024,
        storage: ImageStorage::Filesystem {
            dir: dir.path().to_path_buf(),
            public_prefix: String::from("/uploads/"),
        },
    });
    let token: String = open_session(&app_state, SessionService::default()).await;

    let response = send(
        &app_state,
        multipart_request("/dashboard/upload", Some(&token), &[image_part("image/png", PNG_BYTES)]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = body_json(response).await;
    let url: &str = body["url"].as_str().unwrap();
    let stored_name: &str = url.strip_prefix("/uploads/").unwrap();
    assert!(stored_name.ends_with(".png"));
    assert_eq!(std::fs::read(dir.path().join(stored_name)).unwrap(), PNG_BYTES);
}

#[tokio::test]
async fn test_non_image_is_rejected() {
    let dir: tempfile::TempDir = tempfile::tempdir().unwrap();
    let app_state: AppState = create_test_app_state_with_uploads(UploadPolicy {
        max_bytes: 1024,
        storage: ImageStorage::Filesystem {
            dir: dir.path().join("uploads"),
            public_prefix: String::from("/uploads"),
        },
    });
    let token: String = open_session(&app_state, SessionService::default()).await;

    let response = send(
        &app_state,
        multipart_request(
            "/dashboard/upload",
            Some(&token),
            &[image_part("application/pdf", b"%PDF-1.7")],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "success": false, "error": "File must be an image" })
    );
    assert!(!dir.path().join("uploads").exists());
}

#[tokio::test]
async fn test_oversized_image_is_rejected() {
    let app_state: AppState = create_test_app_state_with_uploads(UploadPolicy {
        max_bytes: 1024,
        storage: ImageStorage::Inline,
    });
    let token: String = open_session(&app_state, SessionService::default()).await;
    let big: Vec<u8> = vec![0u8; 2048];

    let response = send(
        &app_state,
        multipart_request(
            "/dashboard/upload",
            Some(&token),
            &[Part {
                name: "image",
                filename: Some("huge.jpg"),
                content_type: Some("image/jpeg"),
                bytes: &big,
            }],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "File size must be less than 1KB");
}

#[tokio::test]
async fn test_image_beyond_body_limit_reports_size() {
    let app_state: AppState = create_test_app_state_with_uploads(UploadPolicy {
        max_bytes: 1024,
        storage: ImageStorage::Inline,
    });
    let token: String = open_session(&app_state, SessionService::default()).await;
    let photo: Vec<u8> = vec![0xffu8; 1024 + MULTIPART_OVERHEAD_BYTES + 4096];

    let response = send(
        &app_state,
        multipart_request(
            "/dashboard/upload",
            Some(&token),
            &[Part {
                name: "image",
                filename: Some("phone-photo.jpg"),
                content_type: Some("image/jpeg"),
                bytes: &photo,
            }],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "File size must be less than 1KB");
}

#[tokio::test]
async fn test_body_limit_hit_before_image_reports_size() {
    let app_state: AppState = create_test_app_state_with_uploads(UploadPolicy {
        max_bytes: 1024,
        storage: ImageStorage::Inline,
    });
    let token: String = open_session(&app_state, SessionService::default()).await;
    let caption: Vec<u8> = vec![b'a'; 1024 + MULTIPART_OVERHEAD_BYTES + 4096];

    let response = send(
        &app_state,
        multipart_request(
            "/dashboard/upload",
            Some(&token),
            &[
                Part {
                    name: "caption",
                    filename: None,
                    content_type: None,
                    bytes: &caption,
                },
                image_part("image/png", PNG_BYTES),
            ],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "File size must be less than 1KB");
}

#[tokio::test]
async fn test_missing_image_field() {
    let app_state: AppState = create_test_app_state();
    let token: String = open_session(&app_state, SessionService::default()).await;

    let response = send(
        &app_state,
        multipart_request(
            "/dashboard/upload",
            Some(&token),
            &[Part {
                name: "caption",
                filename: None,
                content_type: None,
                bytes: b"a vase",
            }],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "No file provided");
}

#[tokio::test]
async fn test_upload_requires_session() {
    let app_state: AppState = create_test_app_state();

    let response = send(
        &app_state,
        multipart_request("/dashboard/upload", None, &[image_part("image/png", PNG_BYTES)]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_convert_without_document() {
    let app_state: AppState = create_test_app_state();
    let token: String = open_session(&app_state, SessionService::default()).await;

    let response = send(
        &app_state,
        multipart_request(
            "/dashboard/newsletter/convert",
            Some(&token),
            &[Part {
                name: "note",
                filename: None,
                content_type: None,
                bytes: b"draft",
            }],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "success": false, "error": "No file uploaded" })
    );
}

#[tokio::test]
async fn test_convert_rejects_non_document() {
    let app_state: AppState = create_test_app_state();
    let token: String = open_session(&app_state, SessionService::default()).await;

    let response = send(
        &app_state,
        multipart_request(
            "/dashboard/newsletter/convert",
            Some(&token),
            &[Part {
                name: "doc",
                filename: Some("draft.docx"),
                content_type: Some(
                    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                ),
                bytes: b"plain text, not a zip",
            }],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("File is not a valid Word document"));
}
