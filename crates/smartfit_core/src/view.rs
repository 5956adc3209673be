//! crates/smartfit_core/src/view.rs
//!
//! The render model: a serializable description of what each screen shows,
//! derived from the controller's state on every request.

use serde::Serialize;
use uuid::Uuid;

use crate::catalog;
use crate::controller::Controller;
use crate::domain::{Article, ChatMessage, Notice, Plan, Screen, WorkoutLog};

/// Fixed progress figure shown on the dashboard goal card.
const GOAL_PROGRESS_PERCENT: u8 = 66;

/// Fields shared by every screen.
#[derive(Debug, Clone, Serialize)]
pub struct Header {
    pub title: &'static str,
    pub back: Option<Screen>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ScreenView {
    Dashboard {
        header: Header,
        name: String,
        pro_badge: bool,
        upgrade_banner: bool,
        goal: String,
        goal_progress_percent: u8,
        notice: Option<Notice>,
    },
    Tracker {
        header: Header,
        history: Vec<WorkoutLog>,
    },
    KnowledgeHub {
        header: Header,
        goal: String,
        articles: &'static [Article],
    },
    AiCoach {
        header: Header,
        transcript: Vec<ChatMessage>,
        composing: bool,
        /// Newest message; the client keeps it scrolled into view.
        scroll_anchor: Option<Uuid>,
    },
    Profile {
        header: Header,
        name: String,
        initial: Option<char>,
        level: String,
        goal: String,
        subscription: &'static str,
        pro: bool,
        total_workouts: usize,
        upgrade_button: bool,
    },
    Subscription {
        header: Header,
        plans: &'static [Plan],
    },
}

impl ScreenView {
    pub fn screen(&self) -> Screen {
        match self {
            ScreenView::Dashboard { .. } => Screen::Dashboard,
            ScreenView::Tracker { .. } => Screen::Tracker,
            ScreenView::KnowledgeHub { .. } => Screen::KnowledgeHub,
            ScreenView::AiCoach { .. } => Screen::AiCoach,
            ScreenView::Profile { .. } => Screen::Profile,
            ScreenView::Subscription { .. } => Screen::Subscription,
        }
    }
}

pub(crate) fn render(controller: &Controller) -> ScreenView {
    let screen = controller.screen();
    let header = Header {
        title: screen.title(),
        back: screen.back_target(),
    };
    let profile = controller.profile();
    let pro = profile.subscription.is_pro();

    match screen {
        Screen::Dashboard => ScreenView::Dashboard {
            header,
            name: profile.name.clone(),
            pro_badge: pro,
            upgrade_banner: !pro,
            goal: profile.goal.clone(),
            goal_progress_percent: GOAL_PROGRESS_PERCENT,
            notice: controller.notice().cloned(),
        },
        Screen::Tracker => ScreenView::Tracker {
            header,
            history: controller.logs().to_vec(),
        },
        Screen::KnowledgeHub => ScreenView::KnowledgeHub {
            header,
            goal: profile.goal.clone(),
            articles: catalog::ARTICLES,
        },
        Screen::AiCoach => ScreenView::AiCoach {
            header,
            transcript: controller.transcript().to_vec(),
            composing: controller.is_composing(),
            scroll_anchor: controller.transcript().last().map(|message| message.id),
        },
        Screen::Profile => ScreenView::Profile {
            header,
            name: profile.name.clone(),
            initial: profile.name.chars().next(),
            level: profile.level.clone(),
            goal: profile.goal.clone(),
            subscription: profile.subscription.label(),
            pro,
            total_workouts: controller.logs().len(),
            upgrade_button: !pro,
        },
        Screen::Subscription => ScreenView::Subscription {
            header,
            plans: catalog::PLANS,
        },
    }
}
