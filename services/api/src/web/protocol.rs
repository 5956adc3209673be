//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged between the front-end and the API server.

use serde::{Deserialize, Serialize};
use smartfit_core::{
    controller::{Controller, LogInput},
    domain::{PlanKind, Screen},
    view::ScreenView,
};
use utoipa::ToSchema;

//=========================================================================================
// Payloads Sent FROM the Client TO the Server
//=========================================================================================

#[derive(Deserialize, Debug, ToSchema)]
pub struct NavigatePayload {
    /// One of `dashboard`, `tracker`, `knowledge_hub`, `ai_coach`, `profile`, `subscription`.
    #[schema(value_type = String, example = "tracker")]
    pub screen: Screen,
}

/// Tracker form fields, sent as typed. Empty strings are allowed and make the save a no-op.
#[derive(Deserialize, Debug, ToSchema)]
pub struct LogPayload {
    #[serde(default)]
    pub exercise: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub reps: String,
    #[serde(default)]
    pub rpe: Option<String>,
}

impl From<LogPayload> for LogInput {
    fn from(payload: LogPayload) -> Self {
        LogInput {
            exercise: payload.exercise,
            weight: payload.weight,
            reps: payload.reps,
            rpe: payload.rpe,
        }
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ChatPayload {
    #[serde(default)]
    pub text: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SubscribePayload {
    /// `Monthly` or `Yearly`.
    #[schema(value_type = String, example = "Yearly")]
    pub plan: PlanKind,
}

//=========================================================================================
// Responses Sent FROM the Server TO the Client
//=========================================================================================

/// Returned by every action: whether it changed anything, and the screen to draw next.
#[derive(Serialize, Debug)]
pub struct ActionResponse {
    pub accepted: bool,
    pub view: ScreenView,
}

impl ActionResponse {
    pub fn new(accepted: bool, controller: &Controller) -> Self {
        Self {
            accepted,
            view: controller.render(),
        }
    }
}
