//! services/api/src/web/chat_task.rs
//!
//! Background "worker" functions spawned by the handlers: one coach turn,
//! and the delayed dismissal of a notice.

use crate::web::state::AppState;
use smartfit_core::{coach::CoachRequest, controller::NOTICE_TTL};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Sends an accepted chat message to the coach and appends the reply.
///
/// The controller lock is not held while waiting on the coach.
pub async fn coach_turn(app_state: Arc<AppState>, request: CoachRequest) {
    let start_time = Instant::now();
    info!("Coach turn started.");

    let result = app_state.coach_adapter.generate(&request).await;
    if let Err(e) = &result {
        error!("Coach service call failed: {}", e);
    }

    let mut controller = app_state.controller.lock().await;
    let reply = controller.finish_chat(result);
    info!(
        delivery = ?reply.delivery,
        "⏱️ Coach turn finished in {:?}",
        start_time.elapsed()
    );
}

/// A "fire-and-forget" task that clears a notice once its time is up.
pub fn schedule_notice_dismissal(app_state: Arc<AppState>, notice_id: u64) {
    tokio::spawn(async move {
        tokio::time::sleep(NOTICE_TTL).await;
        if app_state.controller.lock().await.dismiss_notice(notice_id) {
            info!("Notice {} dismissed.", notice_id);
        }
    });
}
