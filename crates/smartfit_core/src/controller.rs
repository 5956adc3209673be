//! crates/smartfit_core/src/controller.rs
//!
//! The single owner of the session's view state. Every mutation goes through
//! one of the operations below; the rest of the application only reads.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog;
use crate::coach::{self, CoachReply, CoachRequest};
use crate::domain::{
    ChatMessage, Delivery, Notice, PlanKind, Screen, Subscription, UserProfile, WorkoutLog,
};
use crate::ports::{CoachService, PortResult};
use crate::view::{self, ScreenView};

/// Effort rating stored when the logger does not supply one.
pub const DEFAULT_RPE: u8 = 8;

/// How long a notice stays up before it is dismissed.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

pub const LOG_SAVED_NOTICE: &str = "Workout saved successfully!";

/// Raw tracker form fields, exactly as typed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogInput {
    pub exercise: String,
    pub weight: String,
    pub reps: String,
    #[serde(default)]
    pub rpe: Option<String>,
}

/// The result of trying to start a coach turn.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatSubmission {
    /// Blank input; nothing changed.
    Rejected,
    /// A reply is still pending; nothing changed.
    Busy,
    /// The user message was appended and this request should be sent.
    Submitted(CoachRequest),
}

/// Serializable copy of the whole session state.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub screen: Screen,
    pub profile: UserProfile,
    pub logs: Vec<WorkoutLog>,
    pub transcript: Vec<ChatMessage>,
    pub composing: bool,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone)]
pub struct Controller {
    screen: Screen,
    profile: UserProfile,
    logs: Vec<WorkoutLog>,
    transcript: Vec<ChatMessage>,
    composing: bool,
    notice: Option<Notice>,
    next_notice_id: u64,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(catalog::initial_profile(), catalog::initial_logs())
    }
}

impl Controller {
    /// Starts a session on the dashboard with the coach's greeting in the transcript.
    /// `logs` must already be ordered newest first.
    pub fn new(profile: UserProfile, logs: Vec<WorkoutLog>) -> Self {
        let greeting = ChatMessage::coach(catalog::greeting(&profile), Delivery::Generated);
        Self {
            screen: Screen::Dashboard,
            profile,
            logs,
            transcript: vec![greeting],
            composing: false,
            notice: None,
            next_notice_id: 1,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Workout history, newest first.
    pub fn logs(&self) -> &[WorkoutLog] {
        &self.logs
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn is_composing(&self) -> bool {
        self.composing
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    //=====================================================================================
    // Navigation
    //=====================================================================================

    pub fn navigate(&mut self, screen: Screen) {
        info!(from = ?self.screen, to = ?screen, "Navigating.");
        self.screen = screen;
    }

    /// Follows the active screen's back button. Returns false on the dashboard.
    pub fn go_back(&mut self) -> bool {
        match self.screen.back_target() {
            Some(target) => {
                self.navigate(target);
                true
            }
            None => false,
        }
    }

    //=====================================================================================
    // Workout Logging
    //=====================================================================================

    /// Records a set from the tracker form.
    ///
    /// Incomplete or unparsable input is ignored and `None` is returned.
    pub fn save_workout_log(&mut self, input: &LogInput) -> Option<WorkoutLog> {
        let exercise = input.exercise.trim();
        let weight = input.weight.trim();
        let reps = input.reps.trim();
        if exercise.is_empty() || weight.is_empty() || reps.is_empty() {
            debug!("Ignoring workout log with empty fields.");
            return None;
        }

        let weight_kg = match weight.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => value,
            _ => {
                debug!(weight, "Ignoring workout log with an invalid weight.");
                return None;
            }
        };
        let reps = match reps.parse::<u32>() {
            Ok(value) if value > 0 => value,
            _ => {
                debug!(reps, "Ignoring workout log with invalid reps.");
                return None;
            }
        };
        let rpe = match input.rpe.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_RPE,
            Some(raw) => match raw.parse::<u8>() {
                Ok(value) if (1..=10).contains(&value) => value,
                _ => {
                    debug!(rpe = raw, "Ignoring workout log with an out-of-range RPE.");
                    return None;
                }
            },
        };

        let now = Utc::now();
        let log = WorkoutLog {
            id: Uuid::new_v4(),
            date: now.date_naive(),
            exercise: exercise.to_string(),
            weight_kg,
            reps,
            rpe: Some(rpe),
            created_at: now,
        };
        info!(exercise = %log.exercise, weight_kg, reps, "Workout log saved.");
        self.logs.insert(0, log.clone());

        self.raise_notice(LOG_SAVED_NOTICE.to_string());
        self.navigate(Screen::Dashboard);
        Some(log)
    }

    //=====================================================================================
    // Coach Chat
    //=====================================================================================

    /// Appends the user's message and returns the request to send to the coach.
    ///
    /// The request's history is the transcript as it was before this message.
    pub fn begin_chat(&mut self, text: &str) -> ChatSubmission {
        if text.trim().is_empty() {
            debug!("Ignoring blank chat message.");
            return ChatSubmission::Rejected;
        }
        if self.composing {
            warn!("Chat message refused while a coach reply is pending.");
            return ChatSubmission::Busy;
        }

        let request = coach::build_request(text, &self.profile, &self.logs, &self.transcript);
        self.transcript.push(ChatMessage::user(text));
        self.composing = true;
        info!(turns = request.history.len(), "Coach turn started.");
        ChatSubmission::Submitted(request)
    }

    /// Appends the coach's reply (or its fallback) and clears the composing flag.
    pub fn finish_chat(&mut self, result: PortResult<String>) -> &ChatMessage {
        if !self.composing {
            warn!("Coach reply arrived with no turn pending.");
        }
        let reply = CoachReply::from_result(result);
        self.transcript.push(reply.into_message());
        self.composing = false;
        &self.transcript[self.transcript.len() - 1]
    }

    /// Runs a whole coach turn against `coach`.
    ///
    /// Returns the appended reply, or `None` when the message was not accepted.
    pub async fn send_chat_message(
        &mut self,
        coach: &dyn CoachService,
        text: &str,
    ) -> Option<&ChatMessage> {
        let request = match self.begin_chat(text) {
            ChatSubmission::Submitted(request) => request,
            ChatSubmission::Rejected | ChatSubmission::Busy => return None,
        };
        let result = coach.generate(&request).await;
        Some(self.finish_chat(result))
    }

    //=====================================================================================
    // Subscription & Notices
    //=====================================================================================

    pub fn subscribe(&mut self, plan: PlanKind) -> u64 {
        self.profile.subscription = Subscription::pro(plan);
        info!(plan = plan.as_str(), "Subscription upgraded.");
        let id = self.raise_notice(format!(
            "Welcome to Pro! You subscribed to the {} plan.",
            plan.as_str()
        ));
        self.navigate(Screen::Dashboard);
        id
    }

    /// Clears the notice if it is still the one identified by `id`.
    pub fn dismiss_notice(&mut self, id: u64) -> bool {
        match &self.notice {
            Some(notice) if notice.id == id => {
                self.notice = None;
                true
            }
            _ => false,
        }
    }

    fn raise_notice(&mut self, text: String) -> u64 {
        let id = self.next_notice_id;
        self.next_notice_id += 1;
        self.notice = Some(Notice {
            id,
            text,
            raised_at: Utc::now(),
        });
        id
    }

    //=====================================================================================
    // Rendering
    //=====================================================================================

    /// Describes what the active screen shows.
    pub fn render(&self) -> ScreenView {
        view::render(self)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            screen: self.screen,
            profile: self.profile.clone(),
            logs: self.logs.clone(),
            transcript: self.transcript.clone(),
            composing: self.composing,
            notice: self.notice.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coach::CONNECTION_ERROR_TEXT;
    use crate::domain::Role;
    use crate::ports::PortError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Answers with a canned result and remembers every request it saw.
    struct ScriptedCoach {
        reply: Result<String, ()>,
        seen: Mutex<Vec<CoachRequest>>,
    }

    impl ScriptedCoach {
        fn answering(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CoachService for ScriptedCoach {
        async fn generate(&self, request: &CoachRequest) -> PortResult<String> {
            self.seen.lock().unwrap().push(request.clone());
            self.reply
                .clone()
                .map_err(|_| PortError::Unexpected("quota exceeded".to_string()))
        }
    }

    fn input(exercise: &str, weight: &str, reps: &str) -> LogInput {
        LogInput {
            exercise: exercise.to_string(),
            weight: weight.to_string(),
            reps: reps.to_string(),
            rpe: None,
        }
    }

    #[test]
    fn starts_on_the_dashboard_with_a_greeting() {
        let controller = Controller::default();
        assert_eq!(controller.screen(), Screen::Dashboard);
        assert_eq!(controller.logs().len(), 2);
        assert_eq!(controller.logs()[0].exercise, "Squat");
        assert_eq!(controller.transcript().len(), 1);
        assert!(controller.transcript()[0].text.starts_with("Hello Ahmet."));
    }

    #[test]
    fn incomplete_logs_are_ignored() {
        let mut controller = Controller::default();
        controller.navigate(Screen::Tracker);

        for bad in [
            input("", "60", "10"),
            input("Row", "", "10"),
            input("Row", "60", ""),
            input("   ", "60", "10"),
            input("Row", "heavy", "10"),
            input("Row", "60", "0"),
        ] {
            assert!(controller.save_workout_log(&bad).is_none());
        }

        assert_eq!(controller.logs().len(), 2);
        assert_eq!(controller.screen(), Screen::Tracker);
        assert!(controller.notice().is_none());
    }

    #[test]
    fn valid_log_is_prepended_and_returns_to_dashboard() {
        let mut controller = Controller::default();
        controller.navigate(Screen::Tracker);

        let saved = controller
            .save_workout_log(&input("Row", "60", "10"))
            .expect("log should be accepted");

        assert_eq!(controller.logs().len(), 3);
        let newest = &controller.logs()[0];
        assert_eq!(newest.id, saved.id);
        assert_eq!(newest.exercise, "Row");
        assert_eq!(newest.weight_kg, 60.0);
        assert_eq!(newest.reps, 10);
        assert_eq!(newest.rpe, Some(DEFAULT_RPE));
        assert_eq!(controller.screen(), Screen::Dashboard);
        assert_eq!(controller.notice().unwrap().text, LOG_SAVED_NOTICE);
    }

    #[test]
    fn explicit_rpe_must_be_in_range() {
        let mut controller = Controller::default();
        let mut with_rpe = input("Deadlift", "140", "3");

        with_rpe.rpe = Some("11".to_string());
        assert!(controller.save_workout_log(&with_rpe).is_none());

        with_rpe.rpe = Some("9".to_string());
        let saved = controller.save_workout_log(&with_rpe).unwrap();
        assert_eq!(saved.rpe, Some(9));
    }

    #[test]
    fn log_ids_are_unique() {
        let mut controller = Controller::default();
        let first = controller.save_workout_log(&input("Row", "60", "10")).unwrap();
        let second = controller.save_workout_log(&input("Row", "60", "10")).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(controller.logs()[0].id, second.id);
    }

    #[tokio::test]
    async fn blank_chat_messages_are_ignored() {
        let mut controller = Controller::default();
        let coach = ScriptedCoach::answering("unused");

        assert!(controller.send_chat_message(&coach, "   \t").await.is_none());
        assert_eq!(controller.transcript().len(), 1);
        assert!(coach.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn a_chat_turn_appends_user_then_coach() {
        let mut controller = Controller::default();
        let coach = ScriptedCoach::answering("RPE is a 1-10 effort scale.");

        let before = controller.transcript().len();
        controller.send_chat_message(&coach, "What's RPE?").await;

        let transcript = controller.transcript();
        assert_eq!(transcript.len(), before + 2);
        assert_eq!(transcript[before].role, Role::User);
        assert_eq!(transcript[before].text, "What's RPE?");
        assert_eq!(transcript[before + 1].role, Role::Coach);
        assert_eq!(transcript[before + 1].text, "RPE is a 1-10 effort scale.");
        assert_eq!(transcript[before + 1].delivery, Delivery::Generated);
        assert!(!controller.is_composing());

        let seen = coach.seen.lock().unwrap();
        assert_eq!(seen[0].history.len(), before);
        assert_eq!(seen[0].message, "What's RPE?");
    }

    #[tokio::test]
    async fn a_failed_call_appends_the_connection_error() {
        let mut controller = Controller::default();
        let coach = ScriptedCoach::failing();

        let reply = controller
            .send_chat_message(&coach, "What's RPE?")
            .await
            .unwrap();

        assert_eq!(reply.text, CONNECTION_ERROR_TEXT);
        assert!(matches!(reply.delivery, Delivery::Failed { .. }));
    }

    #[test]
    fn a_failed_reply_keeps_its_reason_and_frees_the_chat() {
        let mut controller = Controller::default();
        assert!(matches!(
            controller.begin_chat("What's RPE?"),
            ChatSubmission::Submitted(_)
        ));

        let reply = controller.finish_chat(Err(PortError::Unexpected("quota".to_string())));
        assert_eq!(reply.text, CONNECTION_ERROR_TEXT);
        match &reply.delivery {
            Delivery::Failed { reason } => assert!(reason.contains("quota")),
            other => panic!("expected a failed delivery, got {other:?}"),
        }

        assert!(!controller.is_composing());
        assert!(matches!(
            controller.begin_chat("Try again?"),
            ChatSubmission::Submitted(_)
        ));
    }

    #[test]
    fn user_message_is_visible_while_the_coach_is_composing() {
        let mut controller = Controller::default();

        let submission = controller.begin_chat("What's RPE?");
        assert!(matches!(submission, ChatSubmission::Submitted(_)));
        assert!(controller.is_composing());
        assert_eq!(controller.transcript().last().unwrap().role, Role::User);

        assert_eq!(controller.begin_chat("Hello?"), ChatSubmission::Busy);
        assert_eq!(controller.transcript().len(), 2);

        controller.finish_chat(Ok("Effort scale.".to_string()));
        assert!(!controller.is_composing());
        assert_eq!(controller.transcript().len(), 3);
    }

    #[test]
    fn subscribing_unlocks_pro() {
        let mut controller = Controller::default();
        controller.navigate(Screen::Subscription);
        assert!(!controller.profile().subscription.is_pro());

        controller.subscribe(PlanKind::Yearly);

        let label = controller.profile().subscription.label();
        assert!(label.contains("Pro") && label.contains("Yearly"));
        assert!(controller.profile().subscription.is_pro());
        assert_eq!(controller.screen(), Screen::Dashboard);
        assert_eq!(
            controller.notice().unwrap().text,
            "Welcome to Pro! You subscribed to the Yearly plan."
        );
    }

    #[test]
    fn stale_dismissals_leave_newer_notices_alone() {
        let mut controller = Controller::default();
        let first = controller.subscribe(PlanKind::Monthly);
        controller.save_workout_log(&input("Row", "60", "10"));

        assert!(!controller.dismiss_notice(first));
        assert_eq!(controller.notice().unwrap().text, LOG_SAVED_NOTICE);

        let current = controller.notice().unwrap().id;
        assert!(controller.dismiss_notice(current));
        assert!(controller.notice().is_none());
    }

    #[test]
    fn back_returns_to_the_dashboard() {
        let mut controller = Controller::default();
        assert!(!controller.go_back());

        controller.navigate(Screen::Profile);
        assert!(controller.go_back());
        assert_eq!(controller.screen(), Screen::Dashboard);
    }
}
