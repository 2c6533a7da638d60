//! Database access layer for the upline escalation service.
//!
//! Provides the connection pool wrapper, embedded migrations, and the model
//! types for the feedback/escalation schema (`feedback_submissions`,
//! `escalations`, `escalation_activity_log`).

pub mod error;
pub mod migrations;
pub mod models;
pub mod pool;

pub use error::DbError;
pub use migrations::run_migrations;
pub use models::{
    ActivityType, Escalation, EscalationActivity, EscalationFilter, EscalationListRow,
    EscalationPriority, EscalationStatus, FeedbackStatus, FeedbackSubmission,
};
pub use pool::DbPool;
