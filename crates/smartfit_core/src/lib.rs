pub mod catalog;
pub mod coach;
pub mod controller;
pub mod domain;
pub mod ports;
pub mod view;

pub use coach::{CoachReply, CoachRequest, Turn};
pub use controller::{ChatSubmission, Controller, LogInput, Snapshot, NOTICE_TTL};
pub use domain::{
    Article, ChatMessage, Delivery, Notice, Plan, PlanKind, Role, Screen, Subscription,
    UserProfile, WorkoutLog,
};
pub use ports::{CoachService, PortError, PortResult};
pub use view::ScreenView;
