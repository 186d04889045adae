//! # Send Message Tests
//!
//! `POST /api/chat/send` across the success path and every failure class.

use super::*;
use axum::http::StatusCode;
use lib_core::FALLBACK_TEXT;
use std::time::Duration;

#[tokio::test]
async fn test_send_without_user_id_generates_one() {
    // Arrange
    let ai = spawn_ai_service(echo_ai_service()).await;
    let (app, _) = test_app(test_config(&ai));

    // Act
    let (status, body) = post_json(&app, "/api/chat/send", json!({ "message": "Привет" })).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["text"], json!("Ответ на: Привет"));
    assert!(body["data"].get("audio_url").is_none());

    let user_id = body["data"]["user_id"].as_str().unwrap();
    assert!(user_id.starts_with("user_"));

    let (status, history) = get_json(&app, &format!("/api/chat/history/{}", user_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history["data"]["total_messages"], json!(1));
    assert_eq!(history["data"]["history"][0]["user_message"], json!("Привет"));
    assert_eq!(history["data"]["history"][0]["ai_response"], json!("Ответ на: Привет"));
    assert_eq!(history["data"]["history"][0]["timestamp"], body["data"]["timestamp"]);
}

#[tokio::test]
async fn test_send_with_audio_builds_audio_url() {
    let ai = spawn_ai_service(echo_ai_service()).await;
    let (app, _) = test_app(test_config(&ai));

    let (status, body) = post_json(
        &app,
        "/api/chat/send",
        json!({ "message": "Как дела?", "user_id": "user_audio", "generate_audio": true }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user_id"], json!("user_audio"));
    assert_eq!(body["data"]["audio_url"], json!(format!("{}/audio/reply.wav", ai)));
}

#[tokio::test]
async fn test_empty_audio_filename_means_no_audio_url() {
    let ai = spawn_ai_service(Router::new().route(
        "/generate",
        post(|| async { Json(json!({ "success": true, "text": "ok", "audio_filename": "" })) }),
    ))
    .await;
    let (app, _) = test_app(test_config(&ai));

    let (status, body) = post_json(&app, "/api/chat/send", json!({ "message": "hi" })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].get("audio_url").is_none());
}

#[tokio::test]
async fn test_sequential_sends_append_in_order() {
    let ai = spawn_ai_service(echo_ai_service()).await;
    let (app, _) = test_app(test_config(&ai));

    let mut timestamps = Vec::new();
    for message in ["one", "two", "three"] {
        let (status, body) = post_json(
            &app,
            "/api/chat/send",
            json!({ "message": message, "user_id": "user_seq" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let stamp = lib_utils::parse_utc(body["data"]["timestamp"].as_str().unwrap()).unwrap();
        timestamps.push(stamp);
    }

    assert!(timestamps.windows(2).all(|pair| pair[0] <= pair[1]));

    let (_, history) = get_json(&app, "/api/chat/history/user_seq").await;
    let messages: Vec<&str> = history["data"]["history"]
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["user_message"].as_str().unwrap())
        .collect();
    assert_eq!(messages, vec!["one", "two", "three"]);
}

#[tokio::test]
async fn test_message_is_trimmed_before_forwarding() {
    let ai = spawn_ai_service(echo_ai_service()).await;
    let (app, _) = test_app(test_config(&ai));

    let (_, body) = post_json(&app, "/api/chat/send", json!({ "message": "  Привет \n" })).await;

    assert_eq!(body["data"]["text"], json!("Ответ на: Привет"));
}

#[tokio::test]
async fn test_blank_user_id_is_replaced() {
    let ai = spawn_ai_service(echo_ai_service()).await;
    let (app, _) = test_app(test_config(&ai));

    let (_, body) = post_json(&app, "/api/chat/send", json!({ "message": "hi", "user_id": "  " })).await;

    assert!(body["data"]["user_id"].as_str().unwrap().starts_with("user_"));
}

// ========== Validation ==========

#[tokio::test]
async fn test_empty_message_is_rejected() {
    // No AI service at all: validation must fail before any call
    let (app, store) = test_app(test_config("http://127.0.0.1:1"));

    let (status, body) = post_json(
        &app,
        "/api/chat/send",
        json!({ "message": "", "user_id": "user_quiet" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("The message field is required."));
    assert!(store.get("chat_history_user_quiet").await.unwrap().is_none());
}

#[tokio::test]
async fn test_message_length_boundaries() {
    let ai = spawn_ai_service(echo_ai_service()).await;
    let (app, _) = test_app(test_config(&ai));

    let (status, _) = post_json(&app, "/api/chat/send", json!({ "message": "я".repeat(1000) })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(&app, "/api/chat/send", json!({ "message": "я".repeat(1001) })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["error"],
        json!("The message field must not be greater than 1000 characters.")
    );
}

#[tokio::test]
async fn test_missing_message_is_rejected() {
    let (app, _) = test_app(test_config("http://127.0.0.1:1"));

    let (status, body) = post_json(&app, "/api/chat/send", json!({ "user_id": "user_x" })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], json!("The message field is required."));
}

#[tokio::test]
async fn test_numeric_generate_audio_flag_is_accepted() {
    let ai = spawn_ai_service(echo_ai_service()).await;
    let (app, _) = test_app(test_config(&ai));

    let (status, body) = post_json(
        &app,
        "/api/chat/send",
        json!({ "message": "hi", "user_id": "user_flag", "generate_audio": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["audio_url"], json!(format!("{}/audio/reply.wav", ai)));
}

#[tokio::test]
async fn test_non_boolean_generate_audio_is_rejected() {
    let (app, _) = test_app(test_config("http://127.0.0.1:1"));

    let (status, body) = post_json(
        &app,
        "/api/chat/send",
        json!({ "message": "hi", "generate_audio": "yes please" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], json!(false));
    assert!(!body["error"].as_str().unwrap().is_empty());
}

// ========== Upstream failures ==========

#[tokio::test]
async fn test_unreachable_ai_service_returns_fallback() {
    let (app, store) = test_app(test_config("http://127.0.0.1:1"));

    let (status, body) = post_json(&app, "/api/chat/send", json!({ "message": "Привет", "user_id": "user_quiet" })).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("AI service unavailable"));
    assert_eq!(body["fallback_text"], json!(FALLBACK_TEXT));
    assert!(store.get("chat_history_user_quiet").await.unwrap().is_none());
}

#[tokio::test]
async fn test_ai_http_failure_returns_fallback() {
    let ai = spawn_ai_service(Router::new().route(
        "/generate",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "CUDA out of memory" })),
            )
        }),
    ))
    .await;
    let (app, _) = test_app(test_config(&ai));

    let (status, body) = post_json(&app, "/api/chat/send", json!({ "message": "Привет" })).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], json!("AI service unavailable"));
    assert!(!body["fallback_text"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_ai_timeout_returns_fallback() {
    let ai = spawn_ai_service(Router::new().route(
        "/generate",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "success": true, "text": "too late" }))
        }),
    ))
    .await;
    // test_config uses a one second timeout
    let (app, _) = test_app(test_config(&ai));

    let (status, body) = post_json(&app, "/api/chat/send", json!({ "message": "Привет" })).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["fallback_text"], json!(FALLBACK_TEXT));
}

#[tokio::test]
async fn test_ai_logical_failure_passes_message_through() {
    let ai = spawn_ai_service(Router::new().route(
        "/generate",
        post(|| async { Json(json!({ "success": false, "error": "Text model not loaded" })) }),
    ))
    .await;
    let (app, store) = test_app(test_config(&ai));

    let (status, body) = post_json(&app, "/api/chat/send", json!({ "message": "Привет", "user_id": "user_quiet" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "success": false, "error": "Text model not loaded" }));
    assert!(store.get("chat_history_user_quiet").await.unwrap().is_none());
}

#[tokio::test]
async fn test_ai_logical_failure_without_message_is_unknown_error() {
    let ai = spawn_ai_service(Router::new().route(
        "/generate",
        post(|| async { Json(json!({ "success": false })) }),
    ))
    .await;
    let (app, _) = test_app(test_config(&ai));

    let (status, body) = post_json(&app, "/api/chat/send", json!({ "message": "Привет" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("Unknown error"));
}

#[tokio::test]
async fn test_garbled_ai_reply_is_generic_internal_error() {
    let ai = spawn_ai_service(Router::new().route("/generate", post(|| async { "<html>502</html>" }))).await;
    let (app, _) = test_app(test_config(&ai));

    let (status, body) = post_json(&app, "/api/chat/send", json!({ "message": "Привет" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "success": false, "error": "Internal server error" }));
}
