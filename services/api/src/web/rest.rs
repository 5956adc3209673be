//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::{
    chat_task::{coach_turn, schedule_notice_dismissal},
    protocol::{ActionResponse, ChatPayload, LogPayload, NavigatePayload, SubscribePayload},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, response::Json};
use smartfit_core::{
    catalog,
    controller::{ChatSubmission, LogInput, Snapshot},
    domain::{Article, Plan},
    view::ScreenView,
};
use std::sync::Arc;
use tracing::warn;
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        get_view_handler,
        get_state_handler,
        list_articles_handler,
        list_plans_handler,
        navigate_handler,
        back_handler,
        save_log_handler,
        send_chat_handler,
        subscribe_handler,
    ),
    components(
        schemas(NavigatePayload, LogPayload, ChatPayload, SubscribePayload)
    ),
    tags(
        (name = "SmartFit API", description = "View state and actions for the SmartFit front-end.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Read Handlers
//=========================================================================================

/// Render the active screen.
#[utoipa::path(
    get,
    path = "/view",
    responses((status = 200, description = "The active screen's render model"))
)]
pub async fn get_view_handler(State(app_state): State<Arc<AppState>>) -> Json<ScreenView> {
    Json(app_state.controller.lock().await.render())
}

/// Dump the whole session state.
#[utoipa::path(
    get,
    path = "/state",
    responses((status = 200, description = "Screen, profile, logs, transcript and notice"))
)]
pub async fn get_state_handler(State(app_state): State<Arc<AppState>>) -> Json<Snapshot> {
    Json(app_state.controller.lock().await.snapshot())
}

/// List the knowledge hub articles.
#[utoipa::path(
    get,
    path = "/articles",
    responses((status = 200, description = "Static evidence-based articles"))
)]
pub async fn list_articles_handler() -> Json<&'static [Article]> {
    Json(catalog::ARTICLES)
}

/// List the subscription plans.
#[utoipa::path(
    get,
    path = "/plans",
    responses((status = 200, description = "The paywall plan catalog"))
)]
pub async fn list_plans_handler() -> Json<&'static [Plan]> {
    Json(catalog::PLANS)
}

//=========================================================================================
// Action Handlers
//=========================================================================================

/// Switch to another screen.
#[utoipa::path(
    post,
    path = "/navigate",
    request_body = NavigatePayload,
    responses((status = 200, description = "Navigation applied"))
)]
pub async fn navigate_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<NavigatePayload>,
) -> Json<ActionResponse> {
    let mut controller = app_state.controller.lock().await;
    controller.navigate(payload.screen);
    Json(ActionResponse::new(true, &controller))
}

/// Follow the active screen's back button.
#[utoipa::path(
    post,
    path = "/back",
    responses((status = 200, description = "`accepted` is false on the dashboard"))
)]
pub async fn back_handler(State(app_state): State<Arc<AppState>>) -> Json<ActionResponse> {
    let mut controller = app_state.controller.lock().await;
    let accepted = controller.go_back();
    Json(ActionResponse::new(accepted, &controller))
}

/// Save a workout set from the tracker form.
///
/// Incomplete input is silently ignored: the response says `accepted: false`
/// and the screen does not change.
#[utoipa::path(
    post,
    path = "/logs",
    request_body = LogPayload,
    responses((status = 200, description = "Log saved, or ignored when incomplete"))
)]
pub async fn save_log_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<LogPayload>,
) -> Json<ActionResponse> {
    let mut controller = app_state.controller.lock().await;
    let saved = controller.save_workout_log(&LogInput::from(payload));
    if saved.is_some() {
        if let Some(notice) = controller.notice() {
            schedule_notice_dismissal(app_state.clone(), notice.id);
        }
    }
    Json(ActionResponse::new(saved.is_some(), &controller))
}

/// Send a message to the AI coach.
///
/// The user message is appended immediately and the coach reply arrives in
/// the background; poll `/view` to see it.
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatPayload,
    responses(
        (status = 200, description = "Message accepted, or ignored when blank"),
        (status = 409, description = "The coach is still composing the previous reply")
    )
)]
pub async fn send_chat_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<ChatPayload>,
) -> Result<Json<ActionResponse>, (StatusCode, String)> {
    let mut controller = app_state.controller.lock().await;
    match controller.begin_chat(&payload.text) {
        ChatSubmission::Submitted(request) => {
            tokio::spawn(coach_turn(app_state.clone(), request));
            Ok(Json(ActionResponse::new(true, &controller)))
        }
        ChatSubmission::Rejected => Ok(Json(ActionResponse::new(false, &controller))),
        ChatSubmission::Busy => {
            warn!("Chat message rejected while a reply is pending.");
            Err((
                StatusCode::CONFLICT,
                "The coach is still composing a reply".to_string(),
            ))
        }
    }
}

/// Upgrade to a Pro plan.
#[utoipa::path(
    post,
    path = "/subscribe",
    request_body = SubscribePayload,
    responses((status = 200, description = "Subscription upgraded"))
)]
pub async fn subscribe_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<SubscribePayload>,
) -> Json<ActionResponse> {
    let mut controller = app_state.controller.lock().await;
    let notice_id = controller.subscribe(payload.plan);
    schedule_notice_dismissal(app_state.clone(), notice_id);
    Json(ActionResponse::new(true, &controller))
}
