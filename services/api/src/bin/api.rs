//! services/api/src/bin/api.rs

use api_lib::{
    adapters::OpenAiCoachAdapter,
    config::Config,
    error::ApiError,
    web::{self, rest::ApiDoc, state::AppState},
};
use async_openai::{config::OpenAIConfig, Client};
use axum::http::{header::{ACCEPT, CONTENT_TYPE}, Method};
use axum::Router;
use smartfit_core::controller::Controller;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize the Coach Adapter ---
    let api_key = match &config.gemini_api_key {
        Some(key) => key.clone(),
        None => {
            warn!("GEMINI_API_KEY is not set; every coach reply will be the connection error text.");
            String::new()
        }
    };
    let openai_config = OpenAIConfig::new()
        .with_api_base(config.coach_api_base.clone())
        .with_api_key(api_key);
    let coach_adapter = Arc::new(OpenAiCoachAdapter::new(
        Client::with_config(openai_config),
        config.coach_model.clone(),
    ));
    info!("Coach model: {}", config.coach_model);

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(Controller::default(), coach_adapter));

    let cors = CorsLayer::new()
        .allow_origin(config.allowed_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    // --- 4. Create the Web Router ---
    let app = Router::new()
        .merge(web::router(app_state))
        .layer(cors)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
