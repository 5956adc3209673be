pub mod chat_task;
pub mod protocol;
pub mod rest;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub use rest::{
    back_handler, get_state_handler, get_view_handler, list_articles_handler,
    list_plans_handler, navigate_handler, save_log_handler, send_chat_handler,
    subscribe_handler,
};
pub use state::AppState;

/// Builds the API routes. CORS and the Swagger UI are layered on by the binary.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/view", get(get_view_handler))
        .route("/state", get(get_state_handler))
        .route("/articles", get(list_articles_handler))
        .route("/plans", get(list_plans_handler))
        .route("/navigate", post(navigate_handler))
        .route("/back", post(back_handler))
        .route("/logs", post(save_log_handler))
        .route("/chat", post(send_chat_handler))
        .route("/subscribe", post(subscribe_handler))
        .with_state(app_state)
}
