//! services/api/src/web/state.rs
//!
//! Defines the application state shared by every handler.

use smartfit_core::{controller::Controller, ports::CoachService};
use std::sync::Arc;
use tokio::sync::Mutex;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
///
/// The controller lock is only ever held for a synchronous transition; coach
/// calls run with the lock released.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Mutex<Controller>>,
    pub coach_adapter: Arc<dyn CoachService>,
}

impl AppState {
    pub fn new(controller: Controller, coach_adapter: Arc<dyn CoachService>) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            coach_adapter,
        }
    }
}
