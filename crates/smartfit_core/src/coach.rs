//! crates/smartfit_core/src/coach.rs
//!
//! Assembles the contextual request sent to the coach service and classifies
//! what comes back.

use serde::Serialize;

use crate::domain::{ChatMessage, Delivery, Role, UserProfile, WorkoutLog};
use crate::ports::PortResult;

/// Sampling temperature sent with every coach request.
pub const COACH_TEMPERATURE: f32 = 0.7;

/// Shown when the service answered but produced no text.
pub const EMPTY_REPLY_TEXT: &str =
    "I apologize, I couldn't generate a response based on the scientific literature at this moment.";

/// Shown when the service call failed for any reason.
pub const CONNECTION_ERROR_TEXT: &str = "Connection error. Please check your network or API key.";

/// One prior conversational turn, stripped of ids and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl From<&ChatMessage> for Turn {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role,
            text: message.text.clone(),
        }
    }
}

/// Everything a provider needs to produce one coach reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoachRequest {
    pub system_instruction: String,
    pub history: Vec<Turn>,
    pub message: String,
    pub temperature: f32,
}

/// Formats one log line as it appears in the coach's context.
pub fn format_log_line(log: &WorkoutLog) -> String {
    let rpe = log
        .rpe
        .map(|value| value.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    format!(
        "- [{}] {}: {}kg x {} reps (RPE {})",
        log.date, log.exercise, log.weight_kg, log.reps, rpe
    )
}

/// Renders the persona instruction with the user's profile and full log history.
pub fn system_instruction(profile: &UserProfile, logs: &[WorkoutLog]) -> String {
    let log_lines = if logs.is_empty() {
        "- none logged yet".to_string()
    } else {
        logs.iter().map(format_log_line).collect::<Vec<_>>().join("\n")
    };

    format!(
        r#"You are the "SmartFit Coach", a scientific, evidence-based fitness expert.
Your goal is to help the user "{name}" achieve "{goal}".

GUIDELINES:
1. Base all answers ONLY on evidence-based science (peer-reviewed studies, biomechanics, physiology).
2. REJECT "bro-science", myths, or unproven supplements.
3. Be concise, motivating, but objective.
4. Use the user's "Recent Workout Logs" to provide specific feedback if asked about progress.
5. If the user asks about something dangerous, warn them.

USER CONTEXT:
Name: {name}
Level: {level}
Goal: {goal}

RECENT WORKOUT LOGS:
{log_lines}"#,
        name = profile.name,
        level = profile.level,
        goal = profile.goal,
    )
}

/// Builds the outbound request from the new message and the transcript that preceded it.
pub fn build_request(
    message: &str,
    profile: &UserProfile,
    logs: &[WorkoutLog],
    prior_transcript: &[ChatMessage],
) -> CoachRequest {
    CoachRequest {
        system_instruction: system_instruction(profile, logs),
        history: prior_transcript.iter().map(Turn::from).collect(),
        message: message.to_string(),
        temperature: COACH_TEMPERATURE,
    }
}

//=========================================================================================
// Reply Classification
//=========================================================================================

/// The outcome of one coach call, kept distinct instead of folded into a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoachReply {
    Answer(String),
    Empty,
    ServiceError(String),
}

impl CoachReply {
    pub fn from_result(result: PortResult<String>) -> Self {
        match result {
            Ok(text) if text.trim().is_empty() => CoachReply::Empty,
            Ok(text) => CoachReply::Answer(text),
            Err(e) => CoachReply::ServiceError(e.to_string()),
        }
    }

    /// The text that goes into the transcript.
    pub fn text(&self) -> &str {
        match self {
            CoachReply::Answer(text) => text,
            CoachReply::Empty => EMPTY_REPLY_TEXT,
            CoachReply::ServiceError(_) => CONNECTION_ERROR_TEXT,
        }
    }

    pub fn delivery(&self) -> Delivery {
        match self {
            CoachReply::Answer(_) => Delivery::Generated,
            CoachReply::Empty => Delivery::Empty,
            CoachReply::ServiceError(reason) => Delivery::Failed {
                reason: reason.clone(),
            },
        }
    }

    pub fn into_message(self) -> ChatMessage {
        let delivery = self.delivery();
        match self {
            CoachReply::Answer(text) => ChatMessage::coach(text, delivery),
            other => ChatMessage::coach(other.text(), delivery),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Subscription;
    use crate::ports::PortError;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn profile() -> UserProfile {
        UserProfile {
            name: "Ahmet".to_string(),
            level: "Intermediate Lifter".to_string(),
            goal: "Hypertrophy".to_string(),
            subscription: Subscription::Free,
        }
    }

    fn log(exercise: &str, weight_kg: f64, reps: u32, rpe: Option<u8>) -> WorkoutLog {
        WorkoutLog {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2023, 12, 20).unwrap(),
            exercise: exercise.to_string(),
            weight_kg,
            reps,
            rpe,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn log_lines_render_weight_reps_and_rpe() {
        assert_eq!(
            format_log_line(&log("Bench Press", 80.0, 8, Some(9))),
            "- [2023-12-20] Bench Press: 80kg x 8 reps (RPE 9)"
        );
        assert_eq!(
            format_log_line(&log("Curl", 12.5, 12, None)),
            "- [2023-12-20] Curl: 12.5kg x 12 reps (RPE N/A)"
        );
    }

    #[test]
    fn instruction_embeds_profile_and_every_log() {
        let logs = vec![log("Squat", 100.0, 5, Some(8)), log("Row", 60.0, 10, None)];
        let instruction = system_instruction(&profile(), &logs);

        assert!(instruction.contains(r#"help the user "Ahmet" achieve "Hypertrophy""#));
        assert!(instruction.contains("Level: Intermediate Lifter"));
        assert!(instruction.contains("Squat: 100kg x 5 reps (RPE 8)"));
        assert!(instruction.contains("Row: 60kg x 10 reps (RPE N/A)"));
    }

    #[test]
    fn request_history_keeps_only_role_and_text() {
        let prior = vec![ChatMessage::coach("Hello", Delivery::Generated)];
        let request = build_request("What's RPE?", &profile(), &[], &prior);

        assert_eq!(
            request.history,
            vec![Turn {
                role: Role::Coach,
                text: "Hello".to_string()
            }]
        );
        assert_eq!(request.message, "What's RPE?");
        assert_eq!(request.temperature, COACH_TEMPERATURE);
        assert!(request.system_instruction.contains("none logged yet"));
    }

    #[test]
    fn replies_are_classified_by_outcome() {
        assert_eq!(
            CoachReply::from_result(Ok("Train hard".to_string())),
            CoachReply::Answer("Train hard".to_string())
        );
        assert_eq!(CoachReply::from_result(Ok("  \n".to_string())), CoachReply::Empty);

        let failed = CoachReply::from_result(Err(PortError::Unauthorized));
        assert_eq!(failed.text(), CONNECTION_ERROR_TEXT);
        assert_eq!(
            failed.delivery(),
            Delivery::Failed {
                reason: "Unauthorized".to_string()
            }
        );
    }

    #[test]
    fn empty_reply_becomes_the_apology() {
        let message = CoachReply::Empty.into_message();
        assert_eq!(message.role, Role::Coach);
        assert_eq!(message.text, EMPTY_REPLY_TEXT);
        assert_eq!(message.delivery, Delivery::Empty);
    }
}
