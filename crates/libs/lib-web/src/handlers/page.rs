//! # Page Handlers
//!
//! The browser chat page (3D avatar viewer plus chat box). The HTML is compiled
//! into the binary; the avatar model itself is served from `/static`.

use axum::response::Html;

const CHAT_PAGE: &str = include_str!("../../templates/chat.html");

/// **Routes**: `GET /`, `GET /chat`
pub async fn index() -> Html<&'static str> {
    Html(CHAT_PAGE)
}
