//! Model types for the escalation schema.

pub mod escalation;
pub mod escalation_activity;
pub mod escalation_types;
pub mod feedback_submission;

pub use escalation::{Escalation, EscalationFilter, EscalationListRow};
pub use escalation_activity::EscalationActivity;
pub use escalation_types::{ActivityType, EscalationPriority, EscalationStatus, FeedbackStatus};
pub use feedback_submission::FeedbackSubmission;
