//! crates/smartfit_core/src/catalog.rs
//!
//! Static reference data and the state a fresh session starts from.

use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::{Article, Plan, PlanKind, Subscription, UserProfile, WorkoutLog};

pub const ARTICLES: &[Article] = &[
    Article {
        id: "A",
        title: "Mechanisms of Hypertrophy",
        authors: "Schoenfeld et al.",
        summary: "Hypertrophy is mediated by mechanical tension, metabolic stress, and muscle damage. Mechanical tension is the primary driver. Progressive overload is essential for continued adaptation.",
    },
    Article {
        id: "B",
        title: "Protein Timing: Myth or Reality?",
        authors: "Aragon et al.",
        summary: "Total daily protein intake is more critical than immediate post-workout timing (the \"anabolic window\"). However, feeding intervals of 3-4 hours may optimize muscle protein synthesis.",
    },
];

pub const PLANS: &[Plan] = &[
    Plan {
        kind: PlanKind::Monthly,
        title: "Monthly Plan",
        price: "$4.99",
        period: "month",
        features: &["Unlimited AI Coach", "Advanced Hypertrophy Stats"],
        highlighted: false,
    },
    Plan {
        kind: PlanKind::Yearly,
        title: "Yearly Plan",
        price: "$49.99",
        period: "year",
        features: &[
            "All Monthly Features",
            "Priority Support",
            "Exclusive Science Articles",
        ],
        highlighted: true,
    },
];

pub fn initial_profile() -> UserProfile {
    UserProfile {
        name: "Ahmet".to_string(),
        level: "Intermediate Lifter".to_string(),
        goal: "Hypertrophy".to_string(),
        subscription: Subscription::Free,
    }
}

/// Seed history, newest first.
pub fn initial_logs() -> Vec<WorkoutLog> {
    vec![
        seed_log((2023, 12, 22), "Squat", 100.0, 5, 8),
        seed_log((2023, 12, 20), "Bench Press", 80.0, 8, 9),
    ]
}

pub fn greeting(profile: &UserProfile) -> String {
    format!(
        "Hello {}. I am your evidence-based AI coach. How can I help you optimize your hypertrophy training today?",
        profile.name
    )
}

fn seed_log(
    (year, month, day): (i32, u32, u32),
    exercise: &str,
    weight_kg: f64,
    reps: u32,
    rpe: u8,
) -> WorkoutLog {
    let date = NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default();
    let created_at = date
        .and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .unwrap_or_default();
    WorkoutLog {
        id: Uuid::new_v4(),
        date,
        exercise: exercise.to_string(),
        weight_kg,
        reps,
        rpe: Some(rpe),
        created_at,
    }
}
