//! crates/smartfit_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs carry no behaviour beyond small derived predicates and are
//! independent of any transport.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

//=========================================================================================
// Screens
//=========================================================================================

/// The mutually exclusive views the controller can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Dashboard,
    Tracker,
    KnowledgeHub,
    AiCoach,
    Profile,
    Subscription,
}

impl Screen {
    /// Where the back button of this screen leads. The dashboard has none.
    pub fn back_target(self) -> Option<Screen> {
        match self {
            Screen::Dashboard => None,
            _ => Some(Screen::Dashboard),
        }
    }

    /// Header title shown for the screen.
    pub fn title(self) -> &'static str {
        match self {
            Screen::Dashboard => "SmartFit OS",
            Screen::Tracker => "Log Workout",
            Screen::KnowledgeHub => "Knowledge Hub",
            Screen::AiCoach => "AI Coach",
            Screen::Profile => "Profile",
            Screen::Subscription => "Subscription",
        }
    }
}

//=========================================================================================
// Profile & Subscription
//=========================================================================================

/// The billing period a user can pick on the paywall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanKind {
    Monthly,
    Yearly,
}

impl PlanKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PlanKind::Monthly => "Monthly",
            PlanKind::Yearly => "Yearly",
        }
    }
}

/// The user's subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subscription {
    #[default]
    Free,
    ProMonthly,
    ProYearly,
}

impl Subscription {
    /// The Pro tier matching a chosen plan.
    pub fn pro(plan: PlanKind) -> Self {
        match plan {
            PlanKind::Monthly => Subscription::ProMonthly,
            PlanKind::Yearly => Subscription::ProYearly,
        }
    }

    /// Whether Pro-only affordances should be shown.
    pub fn is_pro(self) -> bool {
        !matches!(self, Subscription::Free)
    }

    /// Human readable label, e.g. "Pro Yearly".
    pub fn label(self) -> &'static str {
        match self {
            Subscription::Free => "Free Tier",
            Subscription::ProMonthly => "Pro Monthly",
            Subscription::ProYearly => "Pro Yearly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub level: String,
    pub goal: String,
    pub subscription: Subscription,
}

//=========================================================================================
// Workout Logs
//=========================================================================================

/// A single recorded exercise set. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLog {
    pub id: Uuid,
    pub date: NaiveDate,
    pub exercise: String,
    pub weight_kg: f64,
    pub reps: u32,
    /// Rate of perceived exertion, 1-10.
    pub rpe: Option<u8>,
    pub created_at: DateTime<Utc>,
}

//=========================================================================================
// Knowledge Hub & Paywall Catalog
//=========================================================================================

/// Static, read-only reference article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub id: &'static str,
    pub title: &'static str,
    pub authors: &'static str,
    pub summary: &'static str,
}

/// One purchasable plan on the subscription screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub kind: PlanKind,
    pub title: &'static str,
    pub price: &'static str,
    pub period: &'static str,
    pub features: &'static [&'static str],
    pub highlighted: bool,
}

//=========================================================================================
// Chat
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Coach,
}

/// How a transcript entry came to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Delivery {
    /// Typed by the user.
    Typed,
    /// Produced by the coach service.
    Generated,
    /// The coach service answered with no text; the apology was shown instead.
    Empty,
    /// The coach service failed; the connection error text was shown instead.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub delivery: Delivery,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            text: text.into(),
            timestamp: Utc::now(),
            delivery: Delivery::Typed,
        }
    }

    pub fn coach(text: impl Into<String>, delivery: Delivery) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Coach,
            text: text.into(),
            timestamp: Utc::now(),
            delivery,
        }
    }
}

//=========================================================================================
// Notices
//=========================================================================================

/// A transient confirmation banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub id: u64,
    pub text: String,
    pub raised_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pro_tiers_unlock_pro_affordances() {
        assert!(!Subscription::Free.is_pro());
        assert!(Subscription::pro(PlanKind::Monthly).is_pro());
        assert!(Subscription::pro(PlanKind::Yearly).is_pro());
    }

    #[test]
    fn plan_labels_name_the_tier() {
        let label = Subscription::pro(PlanKind::Yearly).label();
        assert!(label.contains("Pro"));
        assert!(label.contains("Yearly"));
        assert_eq!(Subscription::Free.label(), "Free Tier");
        assert_eq!(Subscription::pro(PlanKind::Monthly).label(), "Pro Monthly");
    }

    #[test]
    fn every_screen_but_the_dashboard_goes_back_to_it() {
        assert_eq!(Screen::Dashboard.back_target(), None);
        for screen in [
            Screen::Tracker,
            Screen::KnowledgeHub,
            Screen::AiCoach,
            Screen::Profile,
            Screen::Subscription,
        ] {
            assert_eq!(screen.back_target(), Some(Screen::Dashboard));
        }
    }

    #[test]
    fn screens_use_snake_case_on_the_wire() {
        let json = serde_json::to_string(&Screen::KnowledgeHub).unwrap();
        assert_eq!(json, "\"knowledge_hub\"");
        let back: Screen = serde_json::from_str("\"ai_coach\"").unwrap();
        assert_eq!(back, Screen::AiCoach);
    }
}
